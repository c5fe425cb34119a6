// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.
//!
//! Rebuilds audit events from their JSON columns. A row that cannot be
//! rebuilt is an error, never silently skipped; the audit log is only
//! useful if it is complete.

use diesel::SqliteConnection;
use diesel::prelude::*;
use opendesk_audit::{Action, Actor, AuditEvent, Cause, TicketSnapshot};
use opendesk_domain::TicketNumber;

use crate::data_models::{ActionData, ActorData, CauseData, TicketSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventDbRow {
    ticket_number: String,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
}

/// Retrieves an audit event by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID to retrieve
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let result: Result<AuditEventDbRow, diesel::result::Error> = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventDbRow::as_select())
        .first(conn);

    let row: AuditEventDbRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::EventNotFound(event_id));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    row_to_audit_event(row)
}

/// Retrieves the ordered audit timeline for a ticket.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `number` - The public ticket number
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized. A
/// ticket with no audit history yields an empty timeline.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    number: &TicketNumber,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventDbRow> = audit_events::table
        .filter(audit_events::ticket_number.eq(number.value()))
        .order(audit_events::event_id.asc())
        .select(AuditEventDbRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_audit_event).collect()
}

fn row_to_audit_event(row: AuditEventDbRow) -> Result<AuditEvent, PersistenceError> {
    let ticket_number: TicketNumber = TicketNumber::new(&row.ticket_number)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: TicketSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: TicketSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    Ok(AuditEvent::new(
        ticket_number,
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        snapshot_from_data(before_data),
        snapshot_from_data(after_data),
    ))
}

fn snapshot_from_data(data: TicketSnapshotData) -> TicketSnapshot {
    TicketSnapshot::new(data.number, data.event_count, data.unread, data.unread_staff)
}
