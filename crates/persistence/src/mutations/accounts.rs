// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff, user, and session mutations.
//!
//! The directory tables are deliberately small: this system resolves
//! actors and notification recipients, it does not manage accounts.

use diesel::SqliteConnection;
use diesel::prelude::*;
use opendesk_domain::TicketNumber;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{sessions, staff, users};
use crate::error::PersistenceError;

/// The principal a bearer session authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPrincipal {
    /// A staff agent.
    Staff(i64),
    /// A registered user.
    User(i64),
    /// An anonymous holder bound to one ticket number.
    Guest(TicketNumber),
}

/// Creates a staff member.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The display name
/// * `email` - The contact email, unique across staff
///
/// # Errors
///
/// Returns an error if the row cannot be inserted, including when the
/// email is already taken.
pub fn insert_staff(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(staff::table)
        .values((staff::name.eq(name), staff::email.eq(email)))
        .execute(conn)?;

    let staff_id: i64 = conn.get_last_insert_rowid()?;

    info!(staff_id, name, "Created staff member");

    Ok(staff_id)
}

/// Creates a registered user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The display name
/// * `email` - The contact email, unique across users
///
/// # Errors
///
/// Returns an error if the row cannot be inserted, including when the
/// email is already taken.
pub fn insert_user(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(users::table)
        .values((users::name.eq(name), users::email.eq(email)))
        .execute(conn)?;

    let user_id: i64 = conn.get_last_insert_rowid()?;

    info!(user_id, name, "Created user");

    Ok(user_id)
}

/// Creates a bearer session for a principal.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The bearer token, unique across sessions
/// * `principal` - Who the session authenticates
/// * `expires_at` - RFC 3339 expiry; validation rejects the token afterward
///
/// # Errors
///
/// Returns an error if the row cannot be inserted, including when the
/// token is already taken.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    principal: &SessionPrincipal,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    let (staff_id, user_id, ticket_number): (Option<i64>, Option<i64>, Option<&str>) =
        match principal {
            SessionPrincipal::Staff(id) => (Some(*id), None, None),
            SessionPrincipal::User(id) => (None, Some(*id), None),
            SessionPrincipal::Guest(number) => (None, None, Some(number.value())),
        };

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::staff_id.eq(staff_id),
            sessions::user_id.eq(user_id),
            sessions::ticket_number.eq(ticket_number),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = conn.get_last_insert_rowid()?;

    debug!(session_id, "Session created");

    Ok(session_id)
}
