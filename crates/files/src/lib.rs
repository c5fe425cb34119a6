// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod disk;
mod error;
mod memory;
mod policy;
mod store;

pub use disk::DiskAttachmentStore;
pub use error::FileStoreError;
pub use memory::{MemoryAttachmentStore, StoredUpload};
pub use policy::{UploadPolicy, UploadPolicyError};
pub use store::{AttachmentStore, Upload, UploadScope};
