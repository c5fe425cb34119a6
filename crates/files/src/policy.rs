// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Upload policy validation.
//!
//! This module enforces type and size requirements for uploaded attachments.

use thiserror::Error;

/// Upload policy errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadPolicyError {
    /// Image extension is not on the allow-list.
    #[error("Image type '{extension}' is not allowed")]
    DisallowedImageType { extension: String },

    /// Attachment exceeds the size limit.
    #[error("Attachment of {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: usize, max: usize },

    /// Attachment has no content.
    #[error("Attachment is empty")]
    Empty,
}

/// Upload policy configuration.
pub struct UploadPolicy {
    /// Maximum size of a single uploaded image, in bytes.
    pub max_image_bytes: usize,
    /// Maximum size of a general file attachment, in bytes.
    pub max_file_bytes: usize,
    /// Allowed image extensions, lowercase, without the leading dot.
    pub image_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_image_bytes: 5 * 1024 * 1024,
            max_file_bytes: 10 * 1024 * 1024,
            image_extensions: vec![
                String::from("png"),
                String::from("jpg"),
                String::from("jpeg"),
                String::from("gif"),
                String::from("webp"),
            ],
        }
    }
}

impl UploadPolicy {
    /// Validates an uploaded image against the policy.
    ///
    /// # Arguments
    ///
    /// * `name` - The submitted file name
    /// * `size` - The upload size in bytes
    ///
    /// # Errors
    ///
    /// Returns an `UploadPolicyError` if the image is empty, too large, or
    /// its extension is not on the allow-list.
    pub fn validate_image(&self, name: &str, size: usize) -> Result<(), UploadPolicyError> {
        if size == 0 {
            return Err(UploadPolicyError::Empty);
        }

        if size > self.max_image_bytes {
            return Err(UploadPolicyError::TooLarge {
                size,
                max: self.max_image_bytes,
            });
        }

        let extension: String = extension_of(name);
        if !self.image_extensions.contains(&extension) {
            return Err(UploadPolicyError::DisallowedImageType { extension });
        }

        Ok(())
    }

    /// Validates a general file attachment against the policy.
    ///
    /// General files carry no extension restriction.
    ///
    /// # Arguments
    ///
    /// * `size` - The upload size in bytes
    ///
    /// # Errors
    ///
    /// Returns an `UploadPolicyError` if the file is empty or too large.
    pub const fn validate_file(&self, size: usize) -> Result<(), UploadPolicyError> {
        if size == 0 {
            return Err(UploadPolicyError::Empty);
        }

        if size > self.max_file_bytes {
            return Err(UploadPolicyError::TooLarge {
                size,
                max: self.max_file_bytes,
            });
        }

        Ok(())
    }
}

/// Extracts the lowercase extension of a file name, without the dot.
///
/// Names with no dot, or nothing after the last dot, yield an empty string.
fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map_or_else(String::new, |(_, ext)| ext.to_lowercase())
}
