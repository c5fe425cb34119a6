// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler for the comment submission workflow.

use time::OffsetDateTime;
use tracing::{info, warn};

use opendesk::{Command, TransitionResult, apply};
use opendesk_audit::{Actor, Cause};
use opendesk_domain::{
    ActorContext, ResolvedActor, Ticket, TicketNumber, validate_comment_content,
    validate_guest_binding,
};
use opendesk_files::{AttachmentStore, UploadScope};
use opendesk_notify::TicketResponded;
use opendesk_persistence::{PersistCommentResult, Persistence, PersistenceError};

use crate::attachments::{BoundAttachments, bind_attachments};
use crate::auth::{AuthorizationService, Credentials};
use crate::config::WorkflowConfig;
use crate::error::{
    SubmitError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::notification::decide_notification;
use crate::request_response::{CommentRequest, CommentResponse};

/// Maximum number of persist attempts when racing concurrent writers.
const MAX_PERSIST_ATTEMPTS: u32 = 3;

/// The result of a successful comment submission.
///
/// The comment and its audit record are already committed by the time a
/// caller holds one of these. The notification payload, if any, has NOT
/// been dispatched: delivery is the transport layer's job, off the
/// request path, so a slow or failing notifier can never unwind a
/// committed comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The API response.
    pub response: CommentResponse,
    /// The ticket as committed, with the comment appended.
    pub new_ticket: Ticket,
    /// The notification to dispatch, when the comment warrants one.
    pub notification: Option<TicketResponded>,
}

/// Submits a comment to a ticket via the API boundary.
///
/// This function:
/// - Validates the content and ticket number before any store lookup
/// - Verifies a guest's ticket binding and CSRF token
/// - Resolves the ticket and the caller's relationship to it
/// - Enforces the comment permission rules
/// - Stores attachments and rewrites image placeholders
/// - Applies the command and persists the transition atomically
/// - Decides whether the committed comment warrants a notification
///
/// A revision conflict with a concurrent writer is retried a bounded
/// number of times; each retry re-reads the ticket and re-checks
/// authorization against the fresh copy, because ownership or authorship
/// may have changed under the race.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `store` - The attachment store
/// * `config` - The deployment configuration
/// * `credentials` - The authenticated caller
/// * `request` - The API request to submit a comment
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if validation fails, the ticket does not resolve,
/// the caller lacks permission, an upload is rejected, or persistence
/// fails beyond the retry budget.
pub fn submit_comment<S: AttachmentStore>(
    persistence: &mut Persistence,
    store: &S,
    config: &WorkflowConfig,
    credentials: &Credentials,
    request: CommentRequest,
    cause: Cause,
) -> Result<SubmitOutcome, SubmitError> {
    // Structural validation before any store lookup
    validate_comment_content(&request.content).map_err(translate_domain_error)?;

    let number: TicketNumber =
        TicketNumber::new(&request.ticket_number).map_err(translate_domain_error)?;

    // A guest proves its binding and echoes the CSRF token before the
    // ticket store is consulted, so the existence of other tickets never
    // leaks through error codes
    if let ActorContext::Guest(session) = &credentials.context {
        validate_guest_binding(session, &number).map_err(translate_domain_error)?;

        let token: &str = request.csrf_token.as_deref().unwrap_or("");
        if token != session.csrf_token {
            return Err(SubmitError::InvalidToken {
                message: String::from("CSRF token does not match the session"),
            });
        }
    }

    // Resolve the ticket and the caller's relationship to it
    let mut ticket: Ticket = persistence
        .get_ticket_by_number(&number)
        .map_err(translate_persistence_error)?;
    let mut resolved: ResolvedActor = ResolvedActor::resolve(credentials.context.clone(), &ticket);

    // Enforce authorization before executing command
    AuthorizationService::authorize_comment(&resolved, config.user_system_enabled)?;

    // Bind attachments; files are stored before the ticket transaction
    // and are never rolled back
    let scope: UploadScope = UploadScope::new(number.clone(), resolved.context.is_staff());
    let bound: BoundAttachments = bind_attachments(
        store,
        &scope,
        &request.content,
        &request.images,
        request.file.as_ref(),
    )?;

    let actor: Actor = credentials.audit_actor();
    let submitted_at: OffsetDateTime = OffsetDateTime::now_utc();

    // Apply the command and persist the transition, re-reading on
    // revision conflicts until the retry budget runs out
    let mut attempts: u32 = 0;
    let (transition, persisted): (TransitionResult, PersistCommentResult) = loop {
        attempts += 1;

        let command: Command = Command::SubmitComment {
            content: bound.content.clone(),
            file: bound.file.clone(),
            private: request.private,
            submitted_at,
        };

        let transition: TransitionResult =
            apply(&ticket, command, &resolved, actor.clone(), cause.clone())
                .map_err(translate_core_error)?;

        match persistence.persist_comment(&transition) {
            Ok(persisted) => break (transition, persisted),
            Err(PersistenceError::RevisionConflict { number: contested })
                if attempts < MAX_PERSIST_ATTEMPTS =>
            {
                warn!(
                    ticket_number = %contested,
                    attempt = attempts,
                    "Revision conflict, re-reading ticket"
                );
                ticket = persistence
                    .get_ticket_by_number(&number)
                    .map_err(translate_persistence_error)?;
                resolved = ResolvedActor::resolve(credentials.context.clone(), &ticket);
                // The race may have moved authorship or ownership
                AuthorizationService::authorize_comment(&resolved, config.user_system_enabled)?;
            }
            Err(PersistenceError::RevisionConflict { number: contested }) => {
                return Err(SubmitError::Internal {
                    message: format!(
                        "Ticket {contested} kept changing under the submission; gave up after {MAX_PERSIST_ATTEMPTS} attempts"
                    ),
                });
            }
            Err(e) => return Err(translate_persistence_error(e)),
        }
    };

    // Decide the notification against the comment as committed
    let notification: Option<TicketResponded> = decide_notification(
        &transition.new_ticket,
        &resolved,
        transition.comment.private,
        &transition.comment.content,
        config,
    );

    info!(
        ticket_number = %number,
        actor = resolved.context.kind_str(),
        comment_event_id = persisted.comment_event_id,
        audit_event_id = persisted.audit_event_id,
        revision = persisted.revision,
        notifying = notification.is_some(),
        "Comment recorded"
    );

    let response: CommentResponse = CommentResponse {
        ticket_number: number.value().to_string(),
        comment_event_id: persisted.comment_event_id,
        audit_event_id: persisted.audit_event_id,
        revision: persisted.revision,
        message: format!("Comment appended to ticket {number}"),
    };

    Ok(SubmitOutcome {
        response,
        new_ticket: transition.new_ticket,
        notification,
    })
}
