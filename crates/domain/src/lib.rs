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

mod actor;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use actor::{ActorContext, GuestSession, RegisteredUser, ResolvedActor, StaffAgent};
pub use error::DomainError;
pub use types::{
    Authorship, EventKind, StaffId, Ticket, TicketAuthor, TicketEvent, TicketNumber, TicketOwner,
    UserId,
};
pub use validation::{
    MAX_COMMENT_LENGTH, MIN_COMMENT_LENGTH, validate_comment_content, validate_guest_binding,
};
