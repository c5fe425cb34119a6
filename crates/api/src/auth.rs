// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use opendesk_audit::Actor;
use opendesk_domain::{
    ActorContext, GuestSession, RegisteredUser, ResolvedActor, StaffAgent, StaffId, TicketNumber,
    UserId,
};
use opendesk_persistence::{Persistence, PersistenceError, SessionData, StaffData, UserData};

use crate::error::AuthError;

/// An authenticated caller.
///
/// Produced once per request by [`AuthenticationService::validate_session`]
/// and threaded through the workflow; downstream code reads the classified
/// context instead of re-touching the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The classified actor behind the session.
    pub context: ActorContext,
}

impl Credentials {
    /// Creates new credentials.
    ///
    /// # Arguments
    ///
    /// * `context` - The classified actor behind the session
    #[must_use]
    pub const fn new(context: ActorContext) -> Self {
        Self { context }
    }

    /// Converts these credentials into an audit `Actor`.
    ///
    /// This is used when recording audit events to attribute actions
    /// to the authenticated caller.
    #[must_use]
    pub fn audit_actor(&self) -> Actor {
        Actor::new(self.context.audit_id(), String::from(self.context.kind_str()))
    }
}

/// Authorization service for enforcing the comment permission rules.
///
/// This service decides whether a resolved actor may append a comment to
/// the ticket it resolved against. It runs after the ticket lookup, so a
/// failure here means the caller knows the ticket exists but may not
/// touch it.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a resolved actor is authorized to comment on its ticket.
    ///
    /// Staff may comment on any ticket. In a deployment with a user
    /// system, everyone else must be the ticket's author. Independently,
    /// the actor must pass the manage-ticket policy.
    ///
    /// # Arguments
    ///
    /// * `resolved` - The actor together with its relationship to the ticket
    /// * `user_system_enabled` - Whether the deployment runs a user system
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have permission.
    pub fn authorize_comment(
        resolved: &ResolvedActor,
        user_system_enabled: bool,
    ) -> Result<(), AuthError> {
        if user_system_enabled && !resolved.context.is_staff() && !resolved.is_author {
            return Err(AuthError::Unauthorized {
                action: String::from("comment"),
                reason: String::from("Only staff or the ticket author may comment"),
            });
        }
        if Self::may_manage_ticket(resolved) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("comment"),
                reason: String::from("Actor may not manage this ticket"),
            })
        }
    }

    /// Checks if a resolved actor may manage the ticket it resolved against.
    ///
    /// Staff manage any ticket. A registered user manages the tickets
    /// they authored. A guest manages the one ticket their session is
    /// bound to, which resolution records as authorship.
    #[must_use]
    pub const fn may_manage_ticket(resolved: &ResolvedActor) -> bool {
        match resolved.context {
            ActorContext::Staff(_) => true,
            ActorContext::User(_) | ActorContext::Guest(_) => resolved.is_author,
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Validates a session token and returns the caller's credentials.
    ///
    /// The session row names exactly one principal: a staff id, a user
    /// id, or a bound ticket number. Staff and users are looked up in
    /// their directories so the credentials carry current display names;
    /// a guest session is rebuilt from its bound number, with the bearer
    /// token doubling as the CSRF token the guest must echo back.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown, expired, or names a
    /// principal that no longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<Credentials, AuthError> {
        // Retrieve session
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        // Check if session is expired
        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Rfc3339)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        // Rebuild the principal the session names
        let context: ActorContext = if let Some(staff_id) = session.staff_id {
            let staff: StaffData = persistence
                .get_staff_by_id(staff_id)
                .map_err(Self::map_persistence_error)?
                .ok_or_else(|| AuthError::AuthenticationFailed {
                    reason: String::from("Staff member not found"),
                })?;
            ActorContext::Staff(StaffAgent {
                id: StaffId(staff.staff_id),
                name: staff.name,
            })
        } else if let Some(user_id) = session.user_id {
            let user: UserData = persistence
                .get_user_by_id(user_id)
                .map_err(Self::map_persistence_error)?
                .ok_or_else(|| AuthError::AuthenticationFailed {
                    reason: String::from("User not found"),
                })?;
            ActorContext::User(RegisteredUser {
                id: UserId(user.user_id),
                name: user.name,
            })
        } else if let Some(number) = session.ticket_number {
            let ticket_number: TicketNumber =
                TicketNumber::new(&number).map_err(|e| AuthError::AuthenticationFailed {
                    reason: format!("Session carries an invalid ticket binding: {e}"),
                })?;
            ActorContext::Guest(GuestSession {
                ticket_number,
                csrf_token: session.session_token,
            })
        } else {
            // The schema requires exactly one principal per session
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session names no principal"),
            });
        };

        Ok(Credentials::new(context))
    }

    /// Generates a session token.
    ///
    /// In a production system, this would use a cryptographically secure
    /// random number generator. For simplicity, we use a timestamp-based
    /// approach here.
    #[must_use]
    pub fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionNotFound(msg) => AuthError::AuthenticationFailed {
                reason: msg,
            },
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
