// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod attachments;
mod auth;
mod config;
mod error;
mod handlers;
mod notification;
mod request_response;

#[cfg(test)]
mod tests;

pub use attachments::{BoundAttachments, bind_attachments, rewrite_image_placeholders};
pub use auth::{AuthenticationService, AuthorizationService, Credentials};
pub use config::WorkflowConfig;
pub use error::{
    AuthError, SubmitError, translate_core_error, translate_domain_error, translate_file_error,
    translate_persistence_error,
};
pub use handlers::{SubmitOutcome, submit_comment};
pub use notification::decide_notification;
pub use request_response::{CommentRequest, CommentResponse};
