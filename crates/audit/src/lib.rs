// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use opendesk_domain::{Ticket, TicketNumber};

/// Represents the entity performing an action.
///
/// An actor is whoever initiated a state change: a staff member, a
/// registered user, or an anonymous guest session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The class of actor (e.g., "Staff", "User", "Guest").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The class of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause records why a state change happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
///
/// An action names the state change that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`Comment`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of a ticket's audit-relevant state at a point in time.
///
/// Snapshots capture only the fields the comment workflow mutates, so a
/// before/after pair makes the effect of a transition legible without
/// replaying the event timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSnapshot {
    /// The public ticket number.
    pub number: String,
    /// How many events the timeline held.
    pub event_count: usize,
    /// Whether the ticket held activity the author had not seen.
    pub unread: bool,
    /// Whether the ticket held activity staff had not seen.
    pub unread_staff: bool,
}

impl TicketSnapshot {
    /// Creates a new `TicketSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `number` - The public ticket number
    /// * `event_count` - How many events the timeline held
    /// * `unread` - The author-facing unread flag
    /// * `unread_staff` - The staff-facing unread flag
    #[must_use]
    pub const fn new(number: String, event_count: usize, unread: bool, unread_staff: bool) -> Self {
        Self {
            number,
            event_count,
            unread,
            unread_staff,
        }
    }

    /// Captures a snapshot of a ticket's current state.
    #[must_use]
    pub fn of(ticket: &Ticket) -> Self {
        Self {
            number: ticket.number.value().to_owned(),
            event_count: ticket.events.len(),
            unread: ticket.unread,
            unread_staff: ticket.unread_staff,
        }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Which ticket was affected (`ticket_number`)
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before the transition (before)
/// - The state after the transition (after)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The number of the ticket this event is scoped to.
    pub ticket_number: TicketNumber,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: TicketSnapshot,
    /// The state after the transition.
    pub after: TicketSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `ticket_number` - The ticket this event is scoped to
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        ticket_number: TicketNumber,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: TicketSnapshot,
        after: TicketSnapshot,
    ) -> Self {
        Self {
            ticket_number,
            actor,
            cause,
            action,
            before,
            after,
        }
    }
}
