// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use opendesk_audit::AuditEvent;
use opendesk_domain::{Ticket, TicketEvent};

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The persistence layer writes the appended event, the flag
/// changes, and the audit event as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new ticket value after the transition.
    pub new_ticket: Ticket,
    /// The event the transition appended to the timeline.
    pub comment: TicketEvent,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
