// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.
//!
//! Audit rows store the structured parts of an event as JSON columns so the
//! log can be rebuilt without joining live tables.

use diesel::SqliteConnection;
use diesel::prelude::*;
use opendesk_audit::AuditEvent;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{ActionData, ActorData, CauseData, TicketSnapshotData};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Persists an audit event.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The audit event to persist
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_data: ActorData = ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    };

    let cause_data: CauseData = CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    };

    let action_data: ActionData = ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    };

    let before_data: TicketSnapshotData = snapshot_data(&event.before);
    let after_data: TicketSnapshotData = snapshot_data(&event.after);

    // Serialize JSON fields
    let actor_json: String = serde_json::to_string(&actor_data)?;
    let cause_json: String = serde_json::to_string(&cause_data)?;
    let action_json: String = serde_json::to_string(&action_data)?;
    let before_json: String = serde_json::to_string(&before_data)?;
    let after_json: String = serde_json::to_string(&after_data)?;

    diesel::insert_into(diesel_schema::audit_events::table)
        .values((
            diesel_schema::audit_events::ticket_number.eq(event.ticket_number.value()),
            diesel_schema::audit_events::actor_json.eq(actor_json),
            diesel_schema::audit_events::cause_json.eq(cause_json),
            diesel_schema::audit_events::action_json.eq(action_json),
            diesel_schema::audit_events::before_snapshot_json.eq(before_json),
            diesel_schema::audit_events::after_snapshot_json.eq(after_json),
        ))
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;

    debug!(event_id, "Persisted audit event");

    Ok(event_id)
}

fn snapshot_data(snapshot: &opendesk_audit::TicketSnapshot) -> TicketSnapshotData {
    TicketSnapshotData {
        number: snapshot.number.clone(),
        event_count: snapshot.event_count,
        unread: snapshot.unread,
        unread_staff: snapshot.unread_staff,
    }
}
