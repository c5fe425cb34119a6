// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use opendesk_files::Upload;

/// API request to append a comment to a ticket.
///
/// This DTO is distinct from domain types and represents the API contract.
/// The uploads arrive already decoded; `images` preserves the submission
/// order because placeholder rewriting is index-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRequest {
    /// The public number of the ticket to comment on.
    pub ticket_number: String,
    /// The comment body (20-5000 characters).
    pub content: String,
    /// Whether the comment should be visible to staff only.
    ///
    /// Honored only for staff callers; forced to false for everyone else.
    pub private: bool,
    /// The CSRF token a guest must echo back. Ignored for staff and users.
    pub csrf_token: Option<String>,
    /// Inline images, indexed 0..N by submission order.
    pub images: Vec<Upload>,
    /// An optional general attachment.
    pub file: Option<Upload>,
}

/// API response for a successfully appended comment.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CommentResponse {
    /// The public number of the ticket that was commented on.
    pub ticket_number: String,
    /// The row identifier of the appended comment event.
    pub comment_event_id: i64,
    /// The event ID of the persisted audit event.
    pub audit_event_id: i64,
    /// The ticket revision after the append.
    pub revision: i64,
    /// A success message.
    pub message: String,
}
