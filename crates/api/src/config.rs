// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Deployment configuration consumed by the workflow.

/// Deployment-level switches the comment workflow branches on.
///
/// Built once at startup from the server's arguments and handed down
/// immutably; the workflow never mutates or re-reads configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WorkflowConfig {
    /// Whether this deployment runs a registered-user system.
    ///
    /// Without one, tickets are opened and followed by anonymous guests
    /// and notification links must carry the check-ticket deep link.
    pub user_system_enabled: bool,
    /// The deployment's public base URL, used to build notification links.
    pub base_url: String,
}

impl WorkflowConfig {
    /// Creates a new `WorkflowConfig`.
    ///
    /// # Arguments
    ///
    /// * `user_system_enabled` - Whether the deployment runs a user system
    /// * `base_url` - The deployment's public base URL
    #[must_use]
    pub const fn new(user_system_enabled: bool, base_url: String) -> Self {
        Self {
            user_system_enabled,
            base_url,
        }
    }
}
