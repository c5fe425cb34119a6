// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::validation::{MAX_COMMENT_LENGTH, MIN_COMMENT_LENGTH};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Comment content is outside the permitted length bounds.
    InvalidCommentContent {
        /// The measured character count.
        length: usize,
    },
    /// Ticket number is malformed.
    InvalidTicketNumber(String),
    /// No ticket exists with the given number.
    TicketNotFound {
        /// The unresolved ticket number.
        number: String,
    },
    /// Event kind string is not recognized.
    InvalidEventKind(String),
    /// Persisted authorship columns do not form a valid authorship.
    InvalidAuthorship(String),
    /// A guest session acted on a ticket other than the one it is bound to.
    GuestTicketMismatch {
        /// The ticket number the session is bound to.
        bound_number: String,
        /// The ticket number the request named.
        requested_number: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCommentContent { length } => {
                write!(
                    f,
                    "Comment content must be between {MIN_COMMENT_LENGTH} and {MAX_COMMENT_LENGTH} characters, got {length}"
                )
            }
            Self::InvalidTicketNumber(msg) => write!(f, "Invalid ticket number: {msg}"),
            Self::TicketNotFound { number } => write!(f, "Ticket '{number}' not found"),
            Self::InvalidEventKind(kind) => write!(f, "Invalid event kind: {kind}"),
            Self::InvalidAuthorship(msg) => write!(f, "Invalid authorship: {msg}"),
            Self::GuestTicketMismatch {
                bound_number,
                requested_number,
            } => {
                write!(
                    f,
                    "Guest session bound to ticket '{bound_number}' cannot act on ticket '{requested_number}'"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
