// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::FileStoreError;
use crate::policy::UploadPolicy;
use crate::store::{AttachmentStore, Upload, UploadScope};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Disk-backed attachment store.
///
/// Uploads land under `<root>/<ticket number>/`, with stored names made of
/// a random hex tag plus the sanitized client name, so two uploads with the
/// same name never collide.
pub struct DiskAttachmentStore {
    /// The directory all attachments live under.
    root: PathBuf,
    /// The policy uploads are validated against.
    policy: UploadPolicy,
}

impl DiskAttachmentStore {
    /// Creates a store rooted at the given directory with the default policy.
    ///
    /// # Arguments
    ///
    /// * `root` - The directory all attachments live under
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            policy: UploadPolicy::default(),
        }
    }

    /// Creates a store with an explicit policy.
    ///
    /// # Arguments
    ///
    /// * `root` - The directory all attachments live under
    /// * `policy` - The policy uploads are validated against
    #[must_use]
    pub const fn with_policy(root: PathBuf, policy: UploadPolicy) -> Self {
        Self { root, policy }
    }

    /// Writes one upload into the scope's directory, returning the stored
    /// name relative to that directory.
    fn write_upload(&self, scope: &UploadScope, upload: &Upload) -> Result<String, FileStoreError> {
        let ticket_dir: PathBuf = self.root.join(scope.ticket_number.value());
        std::fs::create_dir_all(&ticket_dir).map_err(|err| FileStoreError::Io {
            path: ticket_dir.display().to_string(),
            message: err.to_string(),
        })?;

        let stored_name: String = stored_name_for(&upload.name);
        let target: PathBuf = ticket_dir.join(&stored_name);
        std::fs::write(&target, &upload.bytes).map_err(|err| FileStoreError::Io {
            path: target.display().to_string(),
            message: err.to_string(),
        })?;

        debug!(
            ticket = %scope.ticket_number,
            staff_upload = scope.staff_upload,
            stored_name = %stored_name,
            size = upload.bytes.len(),
            "Stored attachment"
        );

        Ok(stored_name)
    }
}

impl AttachmentStore for DiskAttachmentStore {
    fn store_images(
        &self,
        scope: &UploadScope,
        images: &[Upload],
    ) -> Result<Vec<String>, FileStoreError> {
        let mut paths: Vec<String> = Vec::with_capacity(images.len());
        for image in images {
            self.policy.validate_image(&image.name, image.bytes.len())?;
            let stored_name: String = self.write_upload(scope, image)?;
            paths.push(format!(
                "/attachments/{}/{stored_name}",
                scope.ticket_number
            ));
        }

        if !paths.is_empty() {
            info!(
                ticket = %scope.ticket_number,
                count = paths.len(),
                "Stored comment images"
            );
        }

        Ok(paths)
    }

    fn store_file(&self, scope: &UploadScope, file: &Upload) -> Result<String, FileStoreError> {
        self.policy.validate_file(file.bytes.len())?;
        let stored_name: String = self.write_upload(scope, file)?;

        info!(
            ticket = %scope.ticket_number,
            stored_name = %stored_name,
            "Stored comment attachment"
        );

        Ok(stored_name)
    }
}

/// Builds a collision-resistant stored name from a client-supplied one.
fn stored_name_for(name: &str) -> String {
    format!("{:016x}_{}", rand::random::<u64>(), sanitize_name(name))
}

/// Strips any path components and reduces the name to a safe character set.
///
/// Anything outside ASCII alphanumerics, dots, dashes, and underscores is
/// replaced with an underscore. A name that sanitizes to nothing becomes
/// "attachment".
fn sanitize_name(name: &str) -> String {
    let base: &str = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment");

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches('_').is_empty() {
        String::from("attachment")
    } else {
        sanitized
    }
}
