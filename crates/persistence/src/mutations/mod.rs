// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! All state-changing operations for the persistence layer. Everything is
//! Diesel DSL, with `last_insert_rowid()` reached through the
//! `PersistenceBackend` seam.
//!
//! ## Module Organization
//!
//! - `accounts` — Staff, user, and session mutations
//! - `audit` — Audit event persistence
//! - `tickets` — Ticket inserts and the atomic comment commit

pub mod accounts;
pub mod audit;
pub mod tickets;

pub use accounts::{SessionPrincipal, create_session, insert_staff, insert_user};
pub use audit::persist_audit_event;
pub use tickets::{PersistCommentResult, insert_ticket, persist_comment};
