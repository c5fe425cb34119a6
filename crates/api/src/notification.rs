// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Response notification decisions.

use opendesk_domain::{ResolvedActor, Ticket};
use opendesk_notify::{TicketResponded, response_link};

use crate::config::WorkflowConfig;

/// Decides whether a freshly recorded comment warrants a notification.
///
/// The rules form a first-match table. A comment by the ticket author
/// notifies the assigned owner, when there is one; staff want to hear
/// about requester activity even on private comments, since the author
/// cannot see privacy anyway. A non-private comment by the owner notifies
/// the author. Any other commenter, and any private owner comment,
/// notifies nobody.
///
/// The payload carries the content as stored, after placeholder
/// substitution, and a link built for the recipient's class.
///
/// # Arguments
///
/// * `ticket` - The ticket the comment landed on
/// * `resolved` - The commenting actor's relationship to the ticket
/// * `private` - The comment's effective private flag
/// * `content` - The stored comment content
/// * `config` - The deployment configuration
#[must_use]
pub fn decide_notification(
    ticket: &Ticket,
    resolved: &ResolvedActor,
    private: bool,
    content: &str,
    config: &WorkflowConfig,
) -> Option<TicketResponded> {
    if resolved.is_author {
        return ticket.owner.as_ref().map(|owner| {
            let url: String = response_link(
                &config.base_url,
                &ticket.number,
                &owner.email,
                config.user_system_enabled,
                true,
            );
            TicketResponded::new(
                owner.email.clone(),
                owner.name.clone(),
                true,
                ticket.title.clone(),
                ticket.number.clone(),
                content.to_owned(),
                url,
            )
        });
    }

    if resolved.is_owner && !private {
        let staff_recipient: bool = ticket.author.is_staff();
        let url: String = response_link(
            &config.base_url,
            &ticket.number,
            ticket.author.email(),
            config.user_system_enabled,
            staff_recipient,
        );
        return Some(TicketResponded::new(
            ticket.author.email().to_owned(),
            ticket.author.name().to_owned(),
            staff_recipient,
            ticket.title.clone(),
            ticket.number.clone(),
            content.to_owned(),
            url,
        ));
    }

    None
}
