// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket queries.
//!
//! Loads the full ticket aggregate: the ticket row, the assigned owner from
//! the staff directory, and the ordered event timeline.

use diesel::SqliteConnection;
use diesel::prelude::*;
use opendesk_domain::{
    Authorship, EventKind, StaffId, Ticket, TicketAuthor, TicketEvent, TicketNumber, TicketOwner,
    UserId,
};
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::data_models::StaffData;
use crate::diesel_schema::{ticket_events, tickets};
use crate::error::PersistenceError;
use crate::queries::accounts::get_staff_by_id;

/// Diesel Queryable struct for ticket rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = tickets)]
struct TicketRow {
    ticket_id: i64,
    number: String,
    title: String,
    author_kind: String,
    author_staff_id: Option<i64>,
    author_user_id: Option<i64>,
    author_name: String,
    author_email: String,
    owner_staff_id: Option<i64>,
    unread: i32,
    unread_staff: i32,
    revision: i64,
}

/// Diesel Queryable struct for ticket event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = ticket_events)]
struct TicketEventRow {
    event_id: i64,
    kind: String,
    content: String,
    file: Option<String>,
    date: String,
    private: i32,
    author_kind: String,
    author_id: Option<i64>,
}

/// Retrieves a ticket aggregate by its public number.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `number` - The public ticket number
///
/// # Errors
///
/// Returns `TicketNotFound` if no ticket has this number, and a
/// reconstruction error if stored rows cannot be rebuilt into domain types.
pub fn get_ticket_by_number(
    conn: &mut SqliteConnection,
    number: &TicketNumber,
) -> Result<Ticket, PersistenceError> {
    let result: Result<TicketRow, diesel::result::Error> = tickets::table
        .filter(tickets::number.eq(number.value()))
        .select(TicketRow::as_select())
        .first(conn);

    let row: TicketRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::TicketNotFound(number.to_string()));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    let owner: Option<TicketOwner> = match row.owner_staff_id {
        Some(staff_id) => {
            let staff: StaffData = get_staff_by_id(conn, staff_id)?.ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "Ticket {number} references missing staff member {staff_id}"
                ))
            })?;
            Some(TicketOwner {
                id: StaffId(staff.staff_id),
                name: staff.name,
                email: staff.email,
            })
        }
        None => None,
    };

    let author: TicketAuthor = match row.author_kind.as_str() {
        "Staff" => TicketAuthor::Staff {
            id: StaffId(row.author_staff_id.ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "Staff-authored ticket {number} has no author staff id"
                ))
            })?),
            name: row.author_name,
            email: row.author_email,
        },
        "User" => TicketAuthor::Registered {
            id: UserId(row.author_user_id.ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "User-authored ticket {number} has no author user id"
                ))
            })?),
            name: row.author_name,
            email: row.author_email,
        },
        "Guest" => TicketAuthor::Guest {
            name: row.author_name,
            email: row.author_email,
        },
        other => {
            return Err(PersistenceError::ReconstructionError(format!(
                "Unknown ticket author kind '{other}'"
            )));
        }
    };

    let events: Vec<TicketEvent> = load_events(conn, row.ticket_id)?;

    Ok(Ticket {
        ticket_id: Some(row.ticket_id),
        number: TicketNumber::new(&row.number)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
        title: row.title,
        author,
        owner,
        unread: row.unread != 0,
        unread_staff: row.unread_staff != 0,
        revision: row.revision,
        events,
    })
}

/// Loads the ordered event timeline for a ticket.
fn load_events(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Vec<TicketEvent>, PersistenceError> {
    let rows: Vec<TicketEventRow> = ticket_events::table
        .filter(ticket_events::ticket_id.eq(ticket_id))
        .order(ticket_events::event_id.asc())
        .select(TicketEventRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_event).collect()
}

fn row_to_event(row: TicketEventRow) -> Result<TicketEvent, PersistenceError> {
    let kind: EventKind = EventKind::from_str(&row.kind)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

    let authorship: Authorship = Authorship::from_parts(&row.author_kind, row.author_id)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

    let date: OffsetDateTime = OffsetDateTime::parse(&row.date, &Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    Ok(TicketEvent {
        event_id: Some(row.event_id),
        kind,
        content: row.content,
        file: row.file,
        date,
        private: row.private != 0,
        authorship,
    })
}
