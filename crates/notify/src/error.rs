// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur when delivering a notification.
///
/// Delivery failures are never surfaced to the commenting caller; the
/// dispatching layer logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The provider failed to deliver the notification.
    Delivery {
        /// Who the notification was addressed to.
        recipient: String,
        /// What the provider reported.
        message: String,
    },
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivery { recipient, message } => {
                write!(f, "Failed to notify {recipient}: {message}")
            }
        }
    }
}

impl std::error::Error for NotifyError {}
