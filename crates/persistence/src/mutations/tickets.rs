// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket and ticket event mutations.
//!
//! `persist_comment` is the write side of the comment workflow: the event
//! insert, the unread-flag update, and the audit row commit or roll back
//! together. Ticket inserts exist for seeding and for the intake surface.

use diesel::SqliteConnection;
use diesel::prelude::*;
use opendesk::TransitionResult;
use opendesk_domain::{Ticket, TicketAuthor, TicketEvent};
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;

/// The row identities assigned when a comment is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistCommentResult {
    /// The timeline event ID assigned to the comment.
    pub comment_event_id: i64,
    /// The audit event ID recorded alongside it.
    pub audit_event_id: i64,
    /// The ticket revision after the commit.
    pub revision: i64,
}

/// Persists a comment transition atomically.
///
/// Inserts the timeline event, applies the new unread flags, and records
/// the audit event in one transaction. The flag update is guarded by the
/// revision the transition was computed against; if another writer got
/// there first, nothing is committed and the caller re-reads and retries.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `result` - The transition to persist
///
/// # Errors
///
/// Returns `RevisionConflict` if the ticket changed since it was read, and
/// other errors if the ticket was never persisted or a statement fails.
pub fn persist_comment(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistCommentResult, PersistenceError> {
    let ticket_id: i64 = result.new_ticket.ticket_id.ok_or_else(|| {
        PersistenceError::Other(format!(
            "Ticket {} has no database identity",
            result.new_ticket.number
        ))
    })?;
    let expected_revision: i64 = result.new_ticket.revision;

    conn.transaction::<PersistCommentResult, PersistenceError, _>(|conn| {
        let comment_event_id: i64 = insert_ticket_event(conn, ticket_id, &result.comment)?;
        debug!(comment_event_id, "Inserted comment event");

        let rows_affected: usize = diesel::update(diesel_schema::tickets::table)
            .filter(diesel_schema::tickets::ticket_id.eq(ticket_id))
            .filter(diesel_schema::tickets::revision.eq(expected_revision))
            .set((
                diesel_schema::tickets::unread.eq(i32::from(result.new_ticket.unread)),
                diesel_schema::tickets::unread_staff.eq(i32::from(result.new_ticket.unread_staff)),
                diesel_schema::tickets::revision.eq(expected_revision + 1),
            ))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::RevisionConflict {
                number: result.new_ticket.number.to_string(),
            });
        }

        let audit_event_id: i64 = persist_audit_event(conn, &result.audit_event)?;

        info!(
            comment_event_id,
            audit_event_id,
            ticket = %result.new_ticket.number,
            revision = expected_revision + 1,
            "Persisted comment"
        );

        Ok(PersistCommentResult {
            comment_event_id,
            audit_event_id,
            revision: expected_revision + 1,
        })
    })
}

/// Inserts a ticket with its full timeline.
///
/// Used for seeding and intake; the ticket receives a fresh database
/// identity regardless of any identity on the value passed in.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `ticket` - The ticket to insert
///
/// # Returns
///
/// The ticket ID assigned by the database.
///
/// # Errors
///
/// Returns an error if the ticket or any of its events cannot be inserted.
pub fn insert_ticket(
    conn: &mut SqliteConnection,
    ticket: &Ticket,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(diesel_schema::tickets::table)
        .values((
            diesel_schema::tickets::number.eq(ticket.number.value()),
            diesel_schema::tickets::title.eq(&ticket.title),
            diesel_schema::tickets::author_kind.eq(author_kind(&ticket.author)),
            diesel_schema::tickets::author_staff_id
                .eq(ticket.author.staff_id().map(|id| id.0)),
            diesel_schema::tickets::author_user_id
                .eq(ticket.author.registered_id().map(|id| id.0)),
            diesel_schema::tickets::author_name.eq(ticket.author.name()),
            diesel_schema::tickets::author_email.eq(ticket.author.email()),
            diesel_schema::tickets::owner_staff_id.eq(ticket.owner_id().map(|id| id.0)),
            diesel_schema::tickets::unread.eq(i32::from(ticket.unread)),
            diesel_schema::tickets::unread_staff.eq(i32::from(ticket.unread_staff)),
            diesel_schema::tickets::revision.eq(ticket.revision),
        ))
        .execute(conn)?;

    let ticket_id: i64 = conn.get_last_insert_rowid()?;

    for event in &ticket.events {
        insert_ticket_event(conn, ticket_id, event)?;
    }

    info!(ticket_id, number = %ticket.number, "Inserted ticket");

    Ok(ticket_id)
}

/// Inserts one timeline event for a ticket.
fn insert_ticket_event(
    conn: &mut SqliteConnection,
    ticket_id: i64,
    event: &TicketEvent,
) -> Result<i64, PersistenceError> {
    let date_text: String = event
        .date
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    diesel::insert_into(diesel_schema::ticket_events::table)
        .values((
            diesel_schema::ticket_events::ticket_id.eq(ticket_id),
            diesel_schema::ticket_events::kind.eq(event.kind.as_str()),
            diesel_schema::ticket_events::content.eq(&event.content),
            diesel_schema::ticket_events::file.eq(event.file.as_deref()),
            diesel_schema::ticket_events::date.eq(date_text),
            diesel_schema::ticket_events::private.eq(i32::from(event.private)),
            diesel_schema::ticket_events::author_kind.eq(event.authorship.kind_str()),
            diesel_schema::ticket_events::author_id.eq(event.authorship.author_id()),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

/// The persisted kind string for a ticket author.
const fn author_kind(author: &TicketAuthor) -> &'static str {
    match author {
        TicketAuthor::Staff { .. } => "Staff",
        TicketAuthor::Registered { .. } => "User",
        TicketAuthor::Guest { .. } => "Guest",
    }
}
