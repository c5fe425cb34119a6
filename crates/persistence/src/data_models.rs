// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `TicketSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSnapshotData {
    pub number: String,
    pub event_count: usize,
    pub unread: bool,
    pub unread_staff: bool,
}

/// A staff directory row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffData {
    pub staff_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: Option<String>,
}

/// A user directory row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: Option<String>,
}

/// A bearer session row.
///
/// Exactly one of `staff_id`, `user_id`, and `ticket_number` is set; the
/// schema enforces this. `expires_at` is RFC 3339 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub staff_id: Option<i64>,
    pub user_id: Option<i64>,
    pub ticket_number: Option<String>,
    pub expires_at: String,
    pub created_at: Option<String>,
}
