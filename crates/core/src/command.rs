// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a comment to a ticket's event timeline.
    SubmitComment {
        /// The comment content, after attachment placeholder substitution.
        content: String,
        /// Stored name of an attached file, if one was uploaded.
        file: Option<String>,
        /// Whether the comment should be visible to staff only.
        /// Honored only for staff actors; forced to false otherwise.
        private: bool,
        /// When the submission was received.
        submitted_at: OffsetDateTime,
    },
}
