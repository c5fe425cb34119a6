// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the OpenDesk support system.
//!
//! This crate persists ticket aggregates, their event timelines, the staff
//! and user directories, bearer sessions, and the audit log. It is built on
//! Diesel over `SQLite`.
//!
//! ## Storage Model
//!
//! - Tickets carry a `revision` column used for optimistic concurrency:
//!   the comment commit updates flags `WHERE revision = <read revision>`,
//!   so two writers racing on one ticket cannot stomp each other. The
//!   loser re-reads and retries at the workflow layer.
//! - Ticket events are append-only. Nothing in this crate updates or
//!   deletes a timeline row.
//! - Audit events are stored with their structured parts serialized into
//!   JSON columns, keyed by denormalized ticket number, so the log stands
//!   on its own.
//!
//! ## Testing
//!
//! `new_in_memory()` hands out an isolated shared-cache `SQLite` database
//! per call via an atomic counter, so tests are deterministic and need no
//! external infrastructure.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use opendesk::TransitionResult;
use opendesk_audit::AuditEvent;
use opendesk_domain::{Ticket, TicketNumber};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{SessionData, StaffData, UserData};
pub use error::PersistenceError;
pub use mutations::{PersistCommentResult, SessionPrincipal};

use backend::PersistenceBackend;

/// Persistence adapter for the support system.
///
/// Owns a single `SQLite` connection. Callers serialize access; the server
/// wraps one adapter in a mutex and the workflow holds it across the
/// read-apply-commit sequence of a request.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL gives concurrent readers a consistent view while a comment commits.
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure
    /// referential integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    /// Retrieves a ticket aggregate by its public number.
    ///
    /// # Arguments
    ///
    /// * `number` - The public ticket number
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` if no ticket has this number, and other
    /// errors if stored rows cannot be loaded or rebuilt.
    pub fn get_ticket_by_number(
        &mut self,
        number: &TicketNumber,
    ) -> Result<Ticket, PersistenceError> {
        queries::get_ticket_by_number(&mut self.conn, number)
    }

    /// Inserts a ticket with its full timeline, assigning a fresh identity.
    ///
    /// # Arguments
    ///
    /// * `ticket` - The ticket to insert
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket or any of its events cannot be
    /// inserted.
    pub fn insert_ticket(&mut self, ticket: &Ticket) -> Result<i64, PersistenceError> {
        mutations::insert_ticket(&mut self.conn, ticket)
    }

    /// Persists a comment transition atomically.
    ///
    /// The timeline insert, the unread-flag update, and the audit record
    /// commit together or not at all. The update is guarded by the revision
    /// the transition was computed against.
    ///
    /// # Arguments
    ///
    /// * `result` - The transition to persist
    ///
    /// # Errors
    ///
    /// Returns `RevisionConflict` if the ticket changed since it was read;
    /// the caller re-reads the ticket and re-applies the command.
    pub fn persist_comment(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistCommentResult, PersistenceError> {
        mutations::persist_comment(&mut self.conn, result)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Persists an audit event outside a comment commit.
    ///
    /// # Arguments
    ///
    /// * `event` - The audit event to persist
    ///
    /// # Returns
    ///
    /// The event ID assigned to the persisted audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Arguments
    ///
    /// * `event_id` - The event ID to retrieve
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the ordered audit timeline for a ticket.
    ///
    /// # Arguments
    ///
    /// * `number` - The public ticket number
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn get_audit_timeline(
        &mut self,
        number: &TicketNumber,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_timeline(&mut self.conn, number)
    }

    // ========================================================================
    // Directory & Sessions
    // ========================================================================

    /// Creates a staff member.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name
    /// * `email` - The contact email, unique across staff
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be inserted.
    pub fn insert_staff(&mut self, name: &str, email: &str) -> Result<i64, PersistenceError> {
        mutations::insert_staff(&mut self.conn, name, email)
    }

    /// Creates a registered user.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name
    /// * `email` - The contact email, unique across users
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be inserted.
    pub fn insert_user(&mut self, name: &str, email: &str) -> Result<i64, PersistenceError> {
        mutations::insert_user(&mut self.conn, name, email)
    }

    /// Creates a bearer session for a principal.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The bearer token, unique across sessions
    /// * `principal` - Who the session authenticates
    /// * `expires_at` - RFC 3339 expiry; validation rejects the token afterward
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be inserted.
    pub fn create_session(
        &mut self,
        session_token: &str,
        principal: &SessionPrincipal,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_session(&mut self.conn, session_token, principal, expires_at)
    }

    /// Retrieves a session by its bearer token.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The bearer token to look up
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    /// Returns `Ok(None)` if no session holds this token.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::get_session_by_token(&mut self.conn, session_token)
    }

    /// Retrieves a staff member by ID.
    ///
    /// # Arguments
    ///
    /// * `staff_id` - The staff ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    /// Returns `Ok(None)` if the staff member is not found.
    pub fn get_staff_by_id(
        &mut self,
        staff_id: i64,
    ) -> Result<Option<StaffData>, PersistenceError> {
        queries::get_staff_by_id(&mut self.conn, staff_id)
    }

    /// Retrieves a user by ID.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    /// Returns `Ok(None)` if the user is not found.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::get_user_by_id(&mut self.conn, user_id)
    }
}
