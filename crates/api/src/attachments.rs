// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attachment binding and image placeholder rewriting.

use opendesk_files::{AttachmentStore, Upload, UploadScope};

use crate::error::{SubmitError, translate_file_error};

/// The outcome of binding a request's uploads to stored attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAttachments {
    /// The comment content with image placeholders rewritten to paths.
    pub content: String,
    /// The stored name of the general attachment, if one was uploaded.
    pub file: Option<String>,
}

/// Stores a request's uploads and rewrites the content to reference them.
///
/// Images are stored in submission order and their placeholders replaced
/// by storage paths. The general file is stored last. Storage happens
/// before the ticket transaction, and stored attachments are never rolled
/// back; a comment that later fails to persist leaves orphaned files
/// behind, which the store tolerates.
///
/// # Arguments
///
/// * `store` - The attachment store
/// * `scope` - The ticket and actor class the uploads are bound to
/// * `content` - The validated comment content
/// * `images` - Inline images, indexed 0..N by submission order
/// * `file` - An optional general attachment
///
/// # Errors
///
/// Returns `InvalidFile` if the store rejects an upload, or `Internal`
/// if storage itself fails.
pub fn bind_attachments<S: AttachmentStore>(
    store: &S,
    scope: &UploadScope,
    content: &str,
    images: &[Upload],
    file: Option<&Upload>,
) -> Result<BoundAttachments, SubmitError> {
    let image_paths: Vec<String> = if images.is_empty() {
        Vec::new()
    } else {
        store
            .store_images(scope, images)
            .map_err(translate_file_error)?
    };

    let content: String = rewrite_image_placeholders(content, &image_paths);

    let stored_file: Option<String> = match file {
        Some(upload) => Some(
            store
                .store_file(scope, upload)
                .map_err(translate_file_error)?,
        ),
        None => None,
    };

    Ok(BoundAttachments {
        content,
        file: stored_file,
    })
}

/// Replaces `image_i` placeholders with the path of stored image `i`.
///
/// Replacement proceeds from the highest index down so the `image_1`
/// substitution never corrupts `image_10`. Every occurrence of a
/// placeholder is replaced; a placeholder with no corresponding image is
/// passed through untouched.
#[must_use]
pub fn rewrite_image_placeholders(content: &str, paths: &[String]) -> String {
    let mut rewritten: String = content.to_owned();
    for index in (0..paths.len()).rev() {
        let placeholder: String = format!("image_{index}");
        rewritten = rewritten.replace(&placeholder, &paths[index]);
    }
    rewritten
}
