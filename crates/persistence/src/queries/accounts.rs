// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff, user, and session queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{SessionData, StaffData, UserData};
use crate::diesel_schema::{sessions, staff, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for staff rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = staff)]
struct StaffRow {
    staff_id: i64,
    name: String,
    email: String,
    created_at: Option<String>,
}

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    name: String,
    email: String,
    created_at: Option<String>,
}

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    staff_id: Option<i64>,
    user_id: Option<i64>,
    ticket_number: Option<String>,
    expires_at: String,
    created_at: Option<String>,
}

/// Retrieves a staff member by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `staff_id` - The staff ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the staff member is not found.
pub fn get_staff_by_id(
    conn: &mut SqliteConnection,
    staff_id: i64,
) -> Result<Option<StaffData>, PersistenceError> {
    debug!("Looking up staff member by ID: {}", staff_id);

    let result: Result<StaffRow, diesel::result::Error> = staff::table
        .filter(staff::staff_id.eq(staff_id))
        .select(StaffRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(StaffData {
            staff_id: row.staff_id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a user by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by ID: {}", user_id);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserData {
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a session by its bearer token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The bearer token to look up
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no session holds this token.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    let result: Result<SessionRow, diesel::result::Error> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SessionData {
            session_id: row.session_id,
            session_token: row.session_token,
            staff_id: row.staff_id,
            user_id: row.user_id,
            ticket_number: row.ticket_number,
            expires_at: row.expires_at,
            created_at: row.created_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
