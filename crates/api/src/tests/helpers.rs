// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use opendesk_audit::Cause;
use opendesk_domain::{
    ActorContext, GuestSession, RegisteredUser, StaffAgent, StaffId, Ticket, TicketAuthor,
    TicketNumber, TicketOwner, UserId,
};
use opendesk_persistence::Persistence;

use crate::{CommentRequest, Credentials, WorkflowConfig};

pub fn create_test_cause() -> Cause {
    Cause::new(
        String::from("api-req-456"),
        String::from("Comment submission"),
    )
}

/// A deployment with the user system enabled.
pub fn create_test_config() -> WorkflowConfig {
    WorkflowConfig::new(true, String::from("https://support.example.com"))
}

/// A deployment without a user system, the way guest-only installs run.
pub fn create_guest_config() -> WorkflowConfig {
    WorkflowConfig::new(false, String::from("https://support.example.com"))
}

/// Seeds an in-memory database with one staff member and one user.
///
/// Returns the persistence handle together with the staff and user ids.
pub fn setup_test_persistence() -> (Persistence, i64, i64) {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create persistence");
    let staff_id: i64 = persistence
        .insert_staff("Grace Hopper", "grace@example.com")
        .expect("Failed to insert staff");
    let user_id: i64 = persistence
        .insert_user("Ada Lovelace", "ada@example.com")
        .expect("Failed to insert user");
    (persistence, staff_id, user_id)
}

/// A ticket authored by the seeded user and owned by the seeded staff member.
pub fn create_test_ticket(user_id: i64, staff_id: i64) -> Ticket {
    Ticket::new(
        TicketNumber::new("481923").expect("valid number"),
        String::from("Printer is on fire"),
        TicketAuthor::Registered {
            id: UserId(user_id),
            name: String::from("Ada Lovelace"),
            email: String::from("ada@example.com"),
        },
        Some(TicketOwner {
            id: StaffId(staff_id),
            name: String::from("Grace Hopper"),
            email: String::from("grace@example.com"),
        }),
    )
}

/// An unassigned ticket opened through a guest session.
pub fn create_guest_ticket() -> Ticket {
    Ticket::new(
        TicketNumber::new("620017").expect("valid number"),
        String::from("Cannot reset password"),
        TicketAuthor::Guest {
            name: String::from("Sam Carter"),
            email: String::from("sam@example.com"),
        },
        None,
    )
}

/// Inserts a ticket and reloads it so it carries its database identity.
pub fn setup_ticket(persistence: &mut Persistence, ticket: &Ticket) -> Ticket {
    persistence
        .insert_ticket(ticket)
        .expect("Failed to insert ticket");
    persistence
        .get_ticket_by_number(&ticket.number)
        .expect("Failed to reload ticket")
}

pub fn staff_credentials(staff_id: i64) -> Credentials {
    Credentials::new(ActorContext::Staff(StaffAgent {
        id: StaffId(staff_id),
        name: String::from("Grace Hopper"),
    }))
}

pub fn user_credentials(user_id: i64) -> Credentials {
    Credentials::new(ActorContext::User(RegisteredUser {
        id: UserId(user_id),
        name: String::from("Ada Lovelace"),
    }))
}

pub fn guest_credentials(number: &str, token: &str) -> Credentials {
    Credentials::new(ActorContext::Guest(GuestSession {
        ticket_number: TicketNumber::new(number).expect("valid number"),
        csrf_token: String::from(token),
    }))
}

/// A valid comment request with no uploads.
pub fn create_comment_request(ticket_number: &str) -> CommentRequest {
    CommentRequest {
        ticket_number: String::from(ticket_number),
        content: String::from("The tray jams on every page since the update."),
        private: false,
        csrf_token: None,
        images: Vec::new(),
        file: None,
    }
}
