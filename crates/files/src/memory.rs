// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::FileStoreError;
use crate::policy::UploadPolicy;
use crate::store::{AttachmentStore, Upload, UploadScope};
use std::sync::Mutex;

/// A record of one stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// The ticket the upload was scoped to.
    pub ticket: String,
    /// The name the upload was stored under.
    pub stored_name: String,
    /// The upload size in bytes.
    pub size: usize,
}

/// In-memory attachment store for tests.
///
/// Applies the same upload policy as the disk store but keeps everything in
/// memory, with deterministic stored names (a running index instead of a
/// random tag) so tests can assert on substituted content.
pub struct MemoryAttachmentStore {
    policy: UploadPolicy,
    stored: Mutex<Vec<StoredUpload>>,
    fail_writes: bool,
}

impl MemoryAttachmentStore {
    /// Creates an empty in-memory store with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: UploadPolicy::default(),
            stored: Mutex::new(Vec::new()),
            fail_writes: false,
        }
    }

    /// Creates a store whose writes always fail, for exercising backend
    /// failure paths.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            policy: UploadPolicy::default(),
            stored: Mutex::new(Vec::new()),
            fail_writes: true,
        }
    }

    /// Returns a copy of everything stored so far, in storage order.
    ///
    /// # Panics
    ///
    /// Panics if the interior lock is poisoned, which only happens after a
    /// panic in another test thread.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn stored(&self) -> Vec<StoredUpload> {
        self.stored.lock().unwrap().clone()
    }

    fn record(&self, scope: &UploadScope, upload: &Upload) -> Result<String, FileStoreError> {
        if self.fail_writes {
            return Err(FileStoreError::Io {
                path: upload.name.clone(),
                message: String::from("simulated backend failure"),
            });
        }

        let mut stored = self.stored.lock().map_err(|_| FileStoreError::Io {
            path: upload.name.clone(),
            message: String::from("store lock poisoned"),
        })?;
        let stored_name: String = format!("{}_{}", stored.len(), upload.name);
        stored.push(StoredUpload {
            ticket: scope.ticket_number.value().to_owned(),
            stored_name: stored_name.clone(),
            size: upload.bytes.len(),
        });

        Ok(stored_name)
    }
}

impl Default for MemoryAttachmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachmentStore for MemoryAttachmentStore {
    fn store_images(
        &self,
        scope: &UploadScope,
        images: &[Upload],
    ) -> Result<Vec<String>, FileStoreError> {
        let mut paths: Vec<String> = Vec::with_capacity(images.len());
        for image in images {
            self.policy.validate_image(&image.name, image.bytes.len())?;
            let stored_name: String = self.record(scope, image)?;
            paths.push(format!(
                "/attachments/{}/{stored_name}",
                scope.ticket_number
            ));
        }
        Ok(paths)
    }

    fn store_file(&self, scope: &UploadScope, file: &Upload) -> Result<String, FileStoreError> {
        self.policy.validate_file(file.bytes.len())?;
        self.record(scope, file)
    }
}
