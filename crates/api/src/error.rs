// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the workflow boundary.
//!
//! `SubmitError` is the surfaced taxonomy: five terminal, user-visible
//! codes plus an `Internal` bucket for infrastructure failures. Lower-layer
//! errors are translated here explicitly and never leak through untranslated.

use opendesk::CoreError;
use opendesk_domain::DomainError;
use opendesk_files::FileStoreError;
use opendesk_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the actor may not perform it.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}': {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Errors surfaced by the comment submission workflow.
///
/// The first five variants are the request-level contract; their codes are
/// reported to the caller verbatim. `Internal` covers database and
/// filesystem failures and is never conflated with the contract codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Comment content fails the length bounds.
    InvalidContent {
        /// A human-readable description of the violation.
        message: String,
    },
    /// Ticket number malformed or unresolved, or a guest acted on a ticket
    /// other than the one its session is bound to.
    InvalidTicket {
        /// A human-readable description of the failure.
        message: String,
    },
    /// A guest's submitted token does not match its session token.
    InvalidToken {
        /// A human-readable description of the mismatch.
        message: String,
    },
    /// An attachment was rejected by the store.
    InvalidFile {
        /// A human-readable description of the rejection.
        message: String,
    },
    /// The actor failed an authorization gate.
    NoPermission {
        /// A human-readable description of the refusal.
        message: String,
    },
    /// An infrastructure failure occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl SubmitError {
    /// The wire code for this error, reported to the caller verbatim.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidContent { .. } => "INVALID_CONTENT",
            Self::InvalidTicket { .. } => "INVALID_TICKET",
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::InvalidFile { .. } => "INVALID_FILE",
            Self::NoPermission { .. } => "NO_PERMISSION",
            Self::Internal { .. } => "INTERNAL",
        }
    }
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidContent { message }
            | Self::InvalidTicket { message }
            | Self::InvalidToken { message }
            | Self::InvalidFile { message }
            | Self::NoPermission { message } => {
                write!(f, "{}: {message}", self.code())
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<AuthError> for SubmitError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::NoPermission { message: reason },
            AuthError::Unauthorized { action, reason } => Self::NoPermission {
                message: format!("'{action}': {reason}"),
            },
        }
    }
}

/// Translates a domain error into a workflow error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> SubmitError {
    match err {
        DomainError::InvalidCommentContent { .. } => SubmitError::InvalidContent {
            message: err.to_string(),
        },
        DomainError::InvalidTicketNumber(_)
        | DomainError::TicketNotFound { .. }
        | DomainError::GuestTicketMismatch { .. } => SubmitError::InvalidTicket {
            message: err.to_string(),
        },
        DomainError::InvalidEventKind(_) | DomainError::InvalidAuthorship(_) => {
            SubmitError::Internal {
                message: err.to_string(),
            }
        }
    }
}

/// Translates a core error into a workflow error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> SubmitError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into a workflow error.
///
/// A missing ticket is part of the request contract; everything else is an
/// infrastructure failure. `RevisionConflict` is handled by the recording
/// retry loop before this translation runs.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> SubmitError {
    match err {
        PersistenceError::TicketNotFound(number) => SubmitError::InvalidTicket {
            message: format!("Ticket '{number}' not found"),
        },
        _ => SubmitError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates an attachment store error into a workflow error.
///
/// Policy rejections are the caller's problem; backend write failures are
/// ours.
#[must_use]
pub fn translate_file_error(err: FileStoreError) -> SubmitError {
    match err {
        FileStoreError::Rejected(_) => SubmitError::InvalidFile {
            message: err.to_string(),
        },
        FileStoreError::Io { .. } => SubmitError::Internal {
            message: err.to_string(),
        },
    }
}
