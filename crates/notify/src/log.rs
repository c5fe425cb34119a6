// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::NotifyError;
use crate::notification::TicketResponded;
use crate::notifier::Notifier;
use tracing::info;

/// Notifier that writes notifications to the log instead of sending them.
///
/// The default transport for development deployments and the reference
/// implementation of the trait; production deployments substitute a real
/// mail transport behind the same seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    /// Creates a new `LogNotifier`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for LogNotifier {
    async fn send_ticket_responded(
        &self,
        notification: TicketResponded,
    ) -> Result<(), NotifyError> {
        info!(
            to = %notification.to,
            name = %notification.name,
            staff_recipient = notification.staff_recipient,
            ticket = %notification.ticket_number,
            title = %notification.title,
            url = %notification.url,
            "Ticket responded notification"
        );
        Ok(())
    }
}
