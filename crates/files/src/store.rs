// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::FileStoreError;
use opendesk_domain::TicketNumber;

/// The permission scope of an upload.
///
/// Attachments are namespaced per ticket, and the actor class is carried so
/// stores can attribute uploads in their logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadScope {
    /// The ticket the upload belongs to.
    pub ticket_number: TicketNumber,
    /// Whether the upload was submitted by a staff actor.
    pub staff_upload: bool,
}

impl UploadScope {
    /// Creates a new `UploadScope`.
    ///
    /// # Arguments
    ///
    /// * `ticket_number` - The ticket the upload belongs to
    /// * `staff_upload` - Whether the upload was submitted by a staff actor
    #[must_use]
    pub const fn new(ticket_number: TicketNumber, staff_upload: bool) -> Self {
        Self {
            ticket_number,
            staff_upload,
        }
    }
}

/// An uploaded blob as received from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// The file name the client submitted.
    pub name: String,
    /// The raw upload bytes.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Creates a new `Upload`.
    ///
    /// # Arguments
    ///
    /// * `name` - The file name the client submitted
    /// * `bytes` - The raw upload bytes
    #[must_use]
    pub const fn new(name: String, bytes: Vec<u8>) -> Self {
        Self { name, bytes }
    }
}

/// Storage backend for ticket attachments.
///
/// Stores validate uploads against their policy, persist them, and return
/// the reference the caller embeds in comment content (for images) or the
/// event's file field (for general files). Attachments are append-only and
/// orphan-tolerant: a stored attachment is never rolled back when a later
/// workflow phase fails.
pub trait AttachmentStore {
    /// Stores a batch of images, returning one path per image in input order.
    ///
    /// # Arguments
    ///
    /// * `scope` - The permission scope of the upload
    /// * `images` - The images, ordered by placeholder index
    ///
    /// # Errors
    ///
    /// Returns an error if any image fails the upload policy or the backend
    /// cannot persist it. Nothing before the failing image is rolled back.
    fn store_images(
        &self,
        scope: &UploadScope,
        images: &[Upload],
    ) -> Result<Vec<String>, FileStoreError>;

    /// Stores a general file attachment, returning its stored name.
    ///
    /// # Arguments
    ///
    /// * `scope` - The permission scope of the upload
    /// * `file` - The uploaded file
    ///
    /// # Errors
    ///
    /// Returns an error if the file fails the upload policy or the backend
    /// cannot persist it.
    fn store_file(&self, scope: &UploadScope, file: &Upload) -> Result<String, FileStoreError>;
}
