// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{StaffId, Ticket, TicketNumber, UserId};
use serde::{Deserialize, Serialize};

/// A staff member acting on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffAgent {
    /// Canonical internal identifier of the staff member.
    pub id: StaffId,
    /// The staff member's display name.
    pub name: String,
}

/// A registered end user acting on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    /// Canonical internal identifier of the user.
    pub id: UserId,
    /// The user's display name.
    pub name: String,
}

/// An anonymous session bound to a single ticket.
///
/// Guest sessions carry no durable identity. They exist only in deployments
/// without a user system, and the binding restricts them to the one ticket
/// they were issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestSession {
    /// The number of the ticket this session is bound to.
    pub ticket_number: TicketNumber,
    /// The server-issued token the guest must echo back on every mutation.
    pub csrf_token: String,
}

/// Classifies the caller of a workflow operation.
///
/// The classification is decided once per request, when the session is
/// resolved, and threaded through the workflow. Downstream code matches on
/// the variant instead of re-deriving the class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorContext {
    /// A staff member.
    Staff(StaffAgent),
    /// A registered end user.
    User(RegisteredUser),
    /// An anonymous guest session.
    Guest(GuestSession),
}

impl ActorContext {
    /// Returns the string representation of this actor class.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::Staff(_) => "Staff",
            Self::User(_) => "User",
            Self::Guest(_) => "Guest",
        }
    }

    /// Returns whether this actor is a staff member.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Self::Staff(_))
    }

    /// Returns an identifier string suitable for audit attribution.
    ///
    /// Staff and users are identified by their numeric id; guests by the
    /// ticket number their session is bound to.
    #[must_use]
    pub fn audit_id(&self) -> String {
        match self {
            Self::Staff(agent) => format!("staff:{}", agent.id),
            Self::User(user) => format!("user:{}", user.id),
            Self::Guest(session) => format!("guest:{}", session.ticket_number),
        }
    }
}

/// An actor context together with its derived relationship to a ticket.
///
/// The booleans are snapshot once, against the resolved ticket, and reused
/// for every downstream decision in the same request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedActor {
    /// The classified actor.
    pub context: ActorContext,
    /// Whether the actor originated the ticket, or holds the guest session
    /// bound to it.
    pub is_author: bool,
    /// Whether the actor is the ticket's assigned staff owner.
    pub is_owner: bool,
}

impl ResolvedActor {
    /// Derives an actor's relationship to a ticket.
    ///
    /// # Arguments
    ///
    /// * `context` - The classified actor
    /// * `ticket` - The ticket the actor is acting on
    #[must_use]
    pub fn resolve(context: ActorContext, ticket: &Ticket) -> Self {
        let (is_author, is_owner): (bool, bool) = match &context {
            ActorContext::Staff(agent) => (
                ticket.is_authored_by_staff(agent.id),
                ticket.is_owned_by(agent.id),
            ),
            ActorContext::User(user) => (ticket.is_authored_by(user.id), false),
            ActorContext::Guest(session) => (session.ticket_number == ticket.number, false),
        };

        Self {
            context,
            is_author,
            is_owner,
        }
    }
}
