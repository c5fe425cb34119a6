// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Maximum length of a public ticket number.
const TICKET_NUMBER_MAX_LENGTH: usize = 16;

/// Represents the public identifier of a ticket.
///
/// Ticket numbers are the external handle clients use to address a ticket.
/// They are opaque: the system never derives meaning from their content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketNumber {
    /// The number value (1-16 ASCII alphanumeric characters).
    value: String,
}

impl TicketNumber {
    /// Creates a new `TicketNumber`.
    ///
    /// # Arguments
    ///
    /// * `value` - The number value
    ///
    /// # Returns
    ///
    /// * `Ok(TicketNumber)` if the value is 1-16 ASCII alphanumeric characters
    /// * `Err(DomainError::InvalidTicketNumber)` otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty, too long, or contains a
    /// character that is not an ASCII letter or digit.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.is_empty() || value.len() > TICKET_NUMBER_MAX_LENGTH {
            return Err(DomainError::InvalidTicketNumber(String::from(
                "Ticket number must be between 1 and 16 characters",
            )));
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidTicketNumber(String::from(
                "Ticket number must contain only ASCII letters and digits",
            )));
        }
        Ok(Self {
            value: value.to_owned(),
        })
    }

    /// Returns the number value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Canonical internal identifier of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(pub i64);

impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical internal identifier of a registered end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents the kind of an entry in a ticket's event timeline.
///
/// The comment workflow only ever appends `Comment` events; the other kinds
/// exist so the timeline can represent the full history of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventKind {
    /// A comment appended by the author, owner, or other staff.
    #[default]
    Comment,
    /// The ticket was assigned to a staff member.
    Assign,
    /// The ticket's staff assignment was removed.
    Unassign,
    /// The ticket was closed.
    Close,
    /// The ticket was reopened.
    Reopen,
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Comment" => Ok(Self::Comment),
            "Assign" => Ok(Self::Assign),
            "Unassign" => Ok(Self::Unassign),
            "Close" => Ok(Self::Close),
            "Reopen" => Ok(Self::Reopen),
            _ => Err(DomainError::InvalidEventKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EventKind {
    /// Converts this event kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comment => "Comment",
            Self::Assign => "Assign",
            Self::Unassign => "Unassign",
            Self::Close => "Close",
            Self::Reopen => "Reopen",
        }
    }
}

/// Identifies who authored a ticket event.
///
/// Authorship is a closed set of variants rather than a pair of nullable
/// identifier columns: an event is authored by exactly one of a staff
/// member, a registered user, or an anonymous guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authorship {
    /// Authored by a staff member.
    Staff(StaffId),
    /// Authored by the registered user who opened the ticket.
    User(UserId),
    /// Authored through an anonymous guest session.
    Anonymous,
}

impl Authorship {
    /// Returns the string representation of this authorship class.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::Staff(_) => "Staff",
            Self::User(_) => "User",
            Self::Anonymous => "Anonymous",
        }
    }

    /// Returns the numeric identifier for staff or user authorship.
    #[must_use]
    pub const fn author_id(&self) -> Option<i64> {
        match self {
            Self::Staff(id) => Some(id.0),
            Self::User(id) => Some(id.0),
            Self::Anonymous => None,
        }
    }

    /// Reconstructs an `Authorship` from its persisted representation.
    ///
    /// # Arguments
    ///
    /// * `kind` - The authorship class string
    /// * `id` - The numeric identifier, required for staff and user authorship
    ///
    /// # Errors
    ///
    /// Returns an error if the kind string is unknown or the identifier is
    /// missing for a class that requires one.
    pub fn from_parts(kind: &str, id: Option<i64>) -> Result<Self, DomainError> {
        match (kind, id) {
            ("Staff", Some(id)) => Ok(Self::Staff(StaffId(id))),
            ("User", Some(id)) => Ok(Self::User(UserId(id))),
            ("Anonymous", None) => Ok(Self::Anonymous),
            _ => Err(DomainError::InvalidAuthorship(format!(
                "kind '{kind}' with author id {id:?}"
            ))),
        }
    }
}

/// Represents the identity that opened a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketAuthor {
    /// The ticket was opened by a registered user account.
    Registered {
        /// Canonical internal identifier of the user.
        id: UserId,
        /// The user's display name.
        name: String,
        /// The user's contact email.
        email: String,
    },
    /// The ticket was opened by a staff member, typically on a
    /// requester's behalf.
    Staff {
        /// Canonical internal identifier of the staff member.
        id: StaffId,
        /// The staff member's display name.
        name: String,
        /// The staff member's contact email.
        email: String,
    },
    /// The ticket was opened by an unregistered guest.
    Guest {
        /// The name the guest supplied when opening the ticket.
        name: String,
        /// The contact email the guest supplied.
        email: String,
    },
}

impl TicketAuthor {
    /// Returns the author's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Registered { name, .. } | Self::Staff { name, .. } | Self::Guest { name, .. } => {
                name
            }
        }
    }

    /// Returns the author's contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Registered { email, .. }
            | Self::Staff { email, .. }
            | Self::Guest { email, .. } => email,
        }
    }

    /// Returns the registered user identifier, if the author has an account.
    #[must_use]
    pub const fn registered_id(&self) -> Option<UserId> {
        match self {
            Self::Registered { id, .. } => Some(*id),
            Self::Staff { .. } | Self::Guest { .. } => None,
        }
    }

    /// Returns the staff identifier, if the author is a staff member.
    #[must_use]
    pub const fn staff_id(&self) -> Option<StaffId> {
        match self {
            Self::Staff { id, .. } => Some(*id),
            Self::Registered { .. } | Self::Guest { .. } => None,
        }
    }

    /// Returns whether the author is a staff member.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Self::Staff { .. })
    }
}

/// The staff member a ticket is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketOwner {
    /// Canonical internal identifier of the staff member.
    pub id: StaffId,
    /// The staff member's display name.
    pub name: String,
    /// The staff member's contact email.
    pub email: String,
}

/// A single entry in a ticket's append-only event timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketEvent {
    /// Canonical internal identifier assigned by the database.
    /// `None` indicates the event has not been persisted yet.
    pub event_id: Option<i64>,
    /// The kind of timeline entry.
    pub kind: EventKind,
    /// The textual content of the entry.
    pub content: String,
    /// Stored name of an attached file, if one was uploaded.
    pub file: Option<String>,
    /// When the entry was recorded.
    pub date: OffsetDateTime,
    /// Whether the entry is visible to staff only.
    pub private: bool,
    /// Who authored the entry.
    pub authorship: Authorship,
}

impl TicketEvent {
    /// Creates a new unpersisted `TicketEvent`.
    ///
    /// # Arguments
    ///
    /// * `kind` - The kind of timeline entry
    /// * `content` - The textual content
    /// * `file` - Stored name of an attached file, if any
    /// * `date` - When the entry was recorded
    /// * `private` - Whether the entry is staff-only
    /// * `authorship` - Who authored the entry
    #[must_use]
    pub const fn new(
        kind: EventKind,
        content: String,
        file: Option<String>,
        date: OffsetDateTime,
        private: bool,
        authorship: Authorship,
    ) -> Self {
        Self {
            event_id: None,
            kind,
            content,
            file,
            date,
            private,
            authorship,
        }
    }
}

/// Represents a support ticket.
///
/// The ticket is the aggregate the comment workflow operates on. It is
/// mutated only by appending events and recomputing the unread flags; this
/// workflow never deletes tickets or rewrites history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Canonical internal identifier assigned by the database.
    /// `None` indicates the ticket has not been persisted yet.
    pub ticket_id: Option<i64>,
    /// The public ticket number.
    pub number: TicketNumber,
    /// The ticket's title.
    pub title: String,
    /// The identity that opened the ticket.
    pub author: TicketAuthor,
    /// The staff member the ticket is assigned to, if any.
    pub owner: Option<TicketOwner>,
    /// Whether the ticket holds activity the author has not seen.
    pub unread: bool,
    /// Whether the ticket holds activity staff have not seen.
    pub unread_staff: bool,
    /// Optimistic concurrency token, bumped on every persisted mutation.
    pub revision: i64,
    /// The append-only event timeline, oldest first.
    pub events: Vec<TicketEvent>,
}

impl Ticket {
    /// Creates a new unpersisted `Ticket` with an empty timeline.
    ///
    /// Fresh tickets are unread for staff and read for their author.
    ///
    /// # Arguments
    ///
    /// * `number` - The public ticket number
    /// * `title` - The ticket's title
    /// * `author` - The identity opening the ticket
    /// * `owner` - The assigned staff member, if any
    #[must_use]
    pub const fn new(
        number: TicketNumber,
        title: String,
        author: TicketAuthor,
        owner: Option<TicketOwner>,
    ) -> Self {
        Self {
            ticket_id: None,
            number,
            title,
            author,
            owner,
            unread: false,
            unread_staff: true,
            revision: 0,
            events: Vec::new(),
        }
    }

    /// Returns the identifier of the assigned staff member, if any.
    #[must_use]
    pub fn owner_id(&self) -> Option<StaffId> {
        self.owner.as_ref().map(|owner| owner.id)
    }

    /// Checks whether a registered user is this ticket's author.
    #[must_use]
    pub const fn is_authored_by(&self, user_id: UserId) -> bool {
        match self.author.registered_id() {
            Some(author_id) => author_id.0 == user_id.0,
            None => false,
        }
    }

    /// Checks whether a staff member is this ticket's author.
    #[must_use]
    pub const fn is_authored_by_staff(&self, staff_id: StaffId) -> bool {
        match self.author.staff_id() {
            Some(author_id) => author_id.0 == staff_id.0,
            None => false,
        }
    }

    /// Checks whether a staff member is this ticket's assigned owner.
    #[must_use]
    pub fn is_owned_by(&self, staff_id: StaffId) -> bool {
        self.owner_id() == Some(staff_id)
    }
}
