// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::NotifyError;
use crate::notification::TicketResponded;

/// Outbound notification transport.
///
/// This trait abstracts over delivery channels (SMTP, a transactional mail
/// API, a chat webhook). Implementations own their templating; callers hand
/// over a fully populated payload and nothing else.
pub trait Notifier: Send + Sync {
    /// Delivers a "ticket responded" notification.
    ///
    /// # Arguments
    ///
    /// * `notification` - The populated payload
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver. Callers treat this
    /// as best-effort: a delivery failure is logged, never propagated to the
    /// actor whose comment triggered it.
    fn send_ticket_responded(
        &self,
        notification: TicketResponded,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}
