// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::NotifyError;
use crate::notification::TicketResponded;
use crate::notifier::Notifier;
use std::sync::Mutex;

/// Notifier test double.
///
/// Records every payload it is handed so tests can assert on the exact
/// notification a workflow produced, and can be flipped to fail so delivery
/// errors stay best-effort.
pub struct MockNotifier {
    should_succeed: bool,
    sent: Mutex<Vec<TicketResponded>>,
}

impl MockNotifier {
    /// Creates a mock that delivers successfully.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            should_succeed: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock whose deliveries always fail.
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            should_succeed: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every notification delivered so far.
    ///
    /// # Panics
    ///
    /// Panics if the interior lock is poisoned, which only happens after a
    /// panic in another test thread.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn sent(&self) -> Vec<TicketResponded> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for MockNotifier {
    fn send_ticket_responded(
        &self,
        notification: TicketResponded,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send {
        let result: Result<(), NotifyError> = if self.should_succeed {
            match self.sent.lock() {
                Ok(mut sent) => {
                    sent.push(notification);
                    Ok(())
                }
                Err(_) => Err(NotifyError::Delivery {
                    recipient: notification.to,
                    message: String::from("mock lock poisoned"),
                }),
            }
        } else {
            Err(NotifyError::Delivery {
                recipient: notification.to,
                message: String::from("simulated delivery failure"),
            })
        };
        async move { result }
    }
}
