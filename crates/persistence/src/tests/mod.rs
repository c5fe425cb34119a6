// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use opendesk_audit::{Actor, Cause};
use opendesk_domain::{StaffId, Ticket, TicketAuthor, TicketNumber, TicketOwner, UserId};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("user:1"), String::from("User"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-789"), String::from("Comment submission"))
}

/// Seeds an in-memory database with one staff member and one user.
///
/// Returns the adapter together with the assigned staff and user ids, in
/// that order. Ticket fixtures reference both, so the directory rows must
/// exist before any ticket insert to satisfy foreign keys.
pub fn create_seeded_persistence() -> (Persistence, i64, i64) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let staff_id: i64 = persistence
        .insert_staff("Grace Hopper", "grace@example.com")
        .unwrap();
    let user_id: i64 = persistence
        .insert_user("Ada Lovelace", "ada@example.com")
        .unwrap();
    (persistence, staff_id, user_id)
}

/// A ticket opened by the seeded user and assigned to the seeded staff member.
pub fn create_test_ticket(user_id: i64, staff_id: i64) -> Ticket {
    Ticket::new(
        TicketNumber::new("481923").unwrap(),
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

/// Seeds a database, inserts the standard test ticket, and loads it back.
///
/// The returned aggregate carries its assigned database identity, so it is
/// ready for comment persistence tests.
pub fn create_persisted_ticket() -> (Persistence, Ticket) {
    let (mut persistence, staff_id, user_id) = create_seeded_persistence();
    let ticket: Ticket = create_test_ticket(user_id, staff_id);
    persistence.insert_ticket(&ticket).unwrap();
    let stored: Ticket = persistence.get_ticket_by_number(&ticket.number).unwrap();
    (persistence, stored)
}
