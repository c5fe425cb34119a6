// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::transition::TransitionResult;
use opendesk_audit::{Action, Actor, AuditEvent, Cause, TicketSnapshot};
use opendesk_domain::{
    ActorContext, Authorship, EventKind, ResolvedActor, Ticket, TicketEvent,
    validate_guest_binding,
};

/// Applies a command to a ticket, producing a new ticket value and audit event.
///
/// The function is pure: it never touches storage, and the input ticket is
/// left untouched. Unread flags are recomputed by assignment, not OR-ed, so
/// the final flags always reflect the most recent applicable rule:
///
/// - A staff actor marks the ticket unread for the author unless they are
///   the author, and unread for staff unless they are the owner.
/// - A registered user marks the ticket unread for staff; the author-facing
///   flag is left unchanged.
/// - A guest leaves both flags unchanged.
///
/// The `private` flag is honored only for staff actors and forced to false
/// for everyone else. The ticket's revision is carried through unchanged;
/// bumping it is the persistence layer's job.
///
/// # Arguments
///
/// * `ticket` - The current ticket (immutable)
/// * `command` - The command to apply
/// * `resolved` - The actor and its derived relationship to this ticket
/// * `actor` - The actor attribution for the audit trail
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new ticket, the appended comment,
///   and the audit event
/// * `Err(CoreError)` if the command violates a domain rule
///
/// # Errors
///
/// Returns an error if the command violates domain rules, including a guest
/// session acting on a ticket other than the one it is bound to.
pub fn apply(
    ticket: &Ticket,
    command: Command,
    resolved: &ResolvedActor,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SubmitComment {
            content,
            file,
            private,
            submitted_at,
        } => {
            // The orchestrator checks this earlier, before any store lookup;
            // re-checking here keeps the invariant local to the transition
            if let ActorContext::Guest(session) = &resolved.context {
                validate_guest_binding(session, &ticket.number)?;
            }

            // Only staff may mark a comment private
            let private: bool = resolved.context.is_staff() && private;

            let authorship: Authorship = match &resolved.context {
                ActorContext::Staff(agent) => Authorship::Staff(agent.id),
                ActorContext::User(user) => Authorship::User(user.id),
                ActorContext::Guest(_) => Authorship::Anonymous,
            };

            let comment: TicketEvent = TicketEvent::new(
                EventKind::Comment,
                content,
                file,
                submitted_at,
                private,
                authorship,
            );

            // Capture state before transition
            let before: TicketSnapshot = TicketSnapshot::of(ticket);

            // Create the new ticket value with recomputed flags and the
            // comment appended
            let mut new_ticket: Ticket = ticket.clone();
            match &resolved.context {
                ActorContext::Staff(_) => {
                    new_ticket.unread = !resolved.is_author;
                    new_ticket.unread_staff = !resolved.is_owner;
                }
                ActorContext::User(_) => {
                    new_ticket.unread_staff = true;
                }
                ActorContext::Guest(_) => {}
            }
            new_ticket.events.push(comment.clone());

            // Capture state after transition
            let after: TicketSnapshot = TicketSnapshot::of(&new_ticket);

            let action: Action = Action::new(
                String::from("Comment"),
                Some(format!(
                    "{} comment on ticket {} by {}",
                    if private { "Private" } else { "Public" },
                    ticket.number,
                    resolved.context.kind_str()
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                ticket.number.clone(),
                actor,
                cause,
                action,
                before,
                after,
            );

            Ok(TransitionResult {
                new_ticket,
                comment,
                audit_event,
            })
        }
    }
}
