// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction and authentication middleware for the server.
//!
//! This module provides an Axum extractor for validating session tokens
//! and enforcing authentication at the server boundary.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use opendesk_api::{AuthenticationService, Credentials};
use tracing::{debug, warn};

use crate::AppState;

/// Extractor for authenticated actors.
///
/// This extractor validates the session token from the Authorization header
/// and returns the credentials the session resolves to: a staff agent, a
/// registered user, or a guest bound to a single ticket.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionActor(credentials): SessionActor,
/// ) -> Result<Json<Response>, HttpError> {
///     // credentials: Credentials
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Validate session token via `AuthenticationService::validate_session`
/// 3. Check session expiration
/// 4. Return `Credentials` carrying the resolved actor context
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - Authorization header is missing
/// - Authorization header format is invalid
/// - Session token is invalid
/// - Session is expired
pub struct SessionActor(pub Credentials);

impl FromRequestParts<AppState> for SessionActor {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        // Parse Bearer token
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        // Validate session
        let mut persistence = state.persistence.lock().await;
        let credentials: Credentials =
            AuthenticationService::validate_session(&mut persistence, token).map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(
            actor = %credentials.context.audit_id(),
            kind = credentials.context.kind_str(),
            "Session validated successfully"
        );

        Ok(Self(credentials))
    }
}

/// Session extraction errors.
///
/// These errors are returned when session validation fails and are
/// automatically converted to HTTP responses.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingAuthorizationHeader => {
                (StatusCode::UNAUTHORIZED, "Missing Authorization header")
            }
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    format!("Session validation failed: {reason}"),
                )
                    .into_response();
            }
        };

        (status, message).into_response()
    }
}
