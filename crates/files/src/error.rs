// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::policy::UploadPolicyError;

/// Errors that can occur while storing attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStoreError {
    /// The attachment was rejected by the upload policy.
    Rejected(UploadPolicyError),
    /// The storage backend failed to persist the attachment.
    Io {
        /// The path that could not be written.
        path: String,
        /// The underlying error message.
        message: String,
    },
}

impl std::fmt::Display for FileStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "Rejected attachment: {err}"),
            Self::Io { path, message } => {
                write!(f, "Failed to write attachment '{path}': {message}")
            }
        }
    }
}

impl std::error::Error for FileStoreError {}

impl From<UploadPolicyError> for FileStoreError {
    fn from(err: UploadPolicyError) -> Self {
        Self::Rejected(err)
    }
}
