// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use opendesk_domain::TicketNumber;

/// The payload of a "ticket responded" notification.
///
/// Carries the comment content as stored, after image placeholder
/// substitution, so the recipient sees exactly what the ticket timeline
/// shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketResponded {
    /// The recipient's email address.
    pub to: String,
    /// The recipient's display name.
    pub name: String,
    /// Whether the recipient is a staff agent.
    pub staff_recipient: bool,
    /// The ticket title.
    pub title: String,
    /// The ticket the response landed on.
    pub ticket_number: TicketNumber,
    /// The stored comment content.
    pub content: String,
    /// The link the notification points the recipient at.
    pub url: String,
}

impl TicketResponded {
    /// Creates a new `TicketResponded` payload.
    ///
    /// # Arguments
    ///
    /// * `to` - The recipient's email address
    /// * `name` - The recipient's display name
    /// * `staff_recipient` - Whether the recipient is a staff agent
    /// * `title` - The ticket title
    /// * `ticket_number` - The ticket the response landed on
    /// * `content` - The stored comment content
    /// * `url` - The link the notification points the recipient at
    #[must_use]
    pub const fn new(
        to: String,
        name: String,
        staff_recipient: bool,
        title: String,
        ticket_number: TicketNumber,
        content: String,
        url: String,
    ) -> Self {
        Self {
            to,
            name,
            staff_recipient,
            title,
            ticket_number,
            content,
            url,
        }
    }
}

/// Builds the link a response notification carries.
///
/// Deployments without a user system have no account pages for ticket
/// authors, so non-staff recipients get a check-ticket deep link they can
/// open anonymously. Staff recipients, and any recipient on a deployment
/// with the user system enabled, get the application root.
///
/// # Arguments
///
/// * `base_url` - The deployment's public URL
/// * `ticket_number` - The ticket the response landed on
/// * `recipient_email` - The recipient's email address
/// * `user_system_enabled` - Whether the deployment runs a user system
/// * `staff_recipient` - Whether the recipient is a staff agent
#[must_use]
pub fn response_link(
    base_url: &str,
    ticket_number: &TicketNumber,
    recipient_email: &str,
    user_system_enabled: bool,
    staff_recipient: bool,
) -> String {
    let root: &str = base_url.trim_end_matches('/');
    if user_system_enabled || staff_recipient {
        root.to_owned()
    } else {
        format!("{root}/check-ticket/{ticket_number}/{recipient_email}")
    }
}
