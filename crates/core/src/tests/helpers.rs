// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Command;
use opendesk_audit::{Actor, Cause};
use opendesk_domain::{
    ActorContext, GuestSession, RegisteredUser, StaffAgent, StaffId, Ticket, TicketAuthor,
    TicketNumber, TicketOwner, UserId,
};
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("user:7"), String::from("User"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Comment submission"))
}

pub fn create_test_owner() -> TicketOwner {
    TicketOwner {
        id: StaffId(3),
        name: String::from("Grace Hopper"),
        email: String::from("grace@example.com"),
    }
}

/// A ticket opened by registered user 7 and assigned to staff member 3.
pub fn create_test_ticket() -> Ticket {
    Ticket::new(
        TicketNumber::new("481923").unwrap(),
        String::from("Printer is on fire"),
        TicketAuthor::Registered {
            id: UserId(7),
            name: String::from("Ada Lovelace"),
            email: String::from("ada@example.com"),
        },
        Some(create_test_owner()),
    )
}

/// A ticket opened by staff member 3, with no assigned owner.
pub fn create_staff_authored_ticket() -> Ticket {
    Ticket::new(
        TicketNumber::new("771100").unwrap(),
        String::from("VPN certificate expired"),
        TicketAuthor::Staff {
            id: StaffId(3),
            name: String::from("Grace Hopper"),
            email: String::from("grace@example.com"),
        },
        None,
    )
}

pub fn create_staff_context(id: i64) -> ActorContext {
    ActorContext::Staff(StaffAgent {
        id: StaffId(id),
        name: String::from("Grace Hopper"),
    })
}

pub fn create_user_context(id: i64) -> ActorContext {
    ActorContext::User(RegisteredUser {
        id: UserId(id),
        name: String::from("Ada Lovelace"),
    })
}

pub fn create_guest_context(number: &str) -> ActorContext {
    ActorContext::Guest(GuestSession {
        ticket_number: TicketNumber::new(number).unwrap(),
        csrf_token: String::from("b2c3d4e5"),
    })
}

pub fn create_test_command(content: &str) -> Command {
    Command::SubmitComment {
        content: String::from(content),
        file: None,
        private: false,
        submitted_at: datetime!(2026-02-10 12:00 UTC),
    }
}
