// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::actor::GuestSession;
use crate::error::DomainError;
use crate::types::TicketNumber;

/// Minimum comment length in characters.
pub const MIN_COMMENT_LENGTH: usize = 20;

/// Maximum comment length in characters.
pub const MAX_COMMENT_LENGTH: usize = 5000;

/// Validates that comment content is within the permitted length bounds.
///
/// Length is measured in characters, not bytes, so multi-byte content is
/// not penalized. The bounds apply to the content as submitted, before any
/// attachment placeholder substitution.
///
/// # Arguments
///
/// * `content` - The comment content to validate
///
/// # Returns
///
/// * `Ok(())` if the content length is within bounds
/// * `Err(DomainError::InvalidCommentContent)` otherwise
///
/// # Errors
///
/// Returns an error if the content is shorter than [`MIN_COMMENT_LENGTH`]
/// or longer than [`MAX_COMMENT_LENGTH`] characters.
pub fn validate_comment_content(content: &str) -> Result<(), DomainError> {
    let length: usize = content.chars().count();
    if !(MIN_COMMENT_LENGTH..=MAX_COMMENT_LENGTH).contains(&length) {
        return Err(DomainError::InvalidCommentContent { length });
    }
    Ok(())
}

/// Validates that a guest session is acting on the ticket it is bound to.
///
/// The comparison runs before any store lookup, so a guest probing with a
/// foreign ticket number learns nothing about whether that ticket exists.
///
/// # Arguments
///
/// * `session` - The guest session
/// * `requested` - The ticket number named by the request
///
/// # Returns
///
/// * `Ok(())` if the numbers match
/// * `Err(DomainError::GuestTicketMismatch)` otherwise
///
/// # Errors
///
/// Returns an error if the session is bound to a different ticket.
pub fn validate_guest_binding(
    session: &GuestSession,
    requested: &TicketNumber,
) -> Result<(), DomainError> {
    // Rule: a guest session may only act on the ticket it was issued for
    if &session.ticket_number != requested {
        return Err(DomainError::GuestTicketMismatch {
            bound_number: session.ticket_number.value().to_owned(),
            requested_number: requested.value().to_owned(),
        });
    }
    Ok(())
}
