// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `accounts` — Staff, user, and session lookups
//! - `audit` — Audit event and timeline retrieval
//! - `tickets` — Ticket aggregate loading

pub mod accounts;
pub mod audit;
pub mod tickets;

pub use accounts::{get_session_by_token, get_staff_by_id, get_user_by_id};
pub use audit::{get_audit_event, get_audit_timeline};
pub use tickets::get_ticket_by_number;
