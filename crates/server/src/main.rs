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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State as AxumState, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use opendesk_api::{CommentRequest, SubmitError, SubmitOutcome, WorkflowConfig, submit_comment};
use opendesk_audit::Cause;
use opendesk_files::{DiskAttachmentStore, Upload};
use opendesk_notify::{LogNotifier, Notifier, TicketResponded};
use opendesk_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

mod session;

use session::SessionActor;

/// Upper bound on a multipart request body.
///
/// Generous enough for a comment carrying several images plus a general
/// attachment; the per-upload limits are enforced by the store policy.
const MAX_REQUEST_BYTES: usize = 64 * 1024 * 1024;

/// OpenDesk Server - HTTP server for the OpenDesk ticket system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Public base URL used when building notification links
    #[arg(short, long, default_value = "http://localhost:3000")]
    base_url: String,

    /// Directory uploaded attachments are stored under
    #[arg(short, long, default_value = "attachments")]
    attachments: String,

    /// Disable the registered-user system (guest-only portal)
    #[arg(long)]
    no_user_system: bool,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the attachment store, the notification
/// transport, and the workflow configuration.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for tickets, sessions, and audit events.
    persistence: Arc<Mutex<Persistence>>,
    /// The store uploaded attachments are written to.
    store: Arc<DiskAttachmentStore>,
    /// The transport ticket notifications are delivered through.
    notifier: LogNotifier,
    /// Toggles and links the comment workflow depends on.
    config: WorkflowConfig,
}

/// API response for a successful comment submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CommentApiResponse {
    /// Success indicator.
    success: bool,
    /// The ticket the comment was appended to.
    ticket_number: String,
    /// The event ID of the persisted comment.
    comment_event_id: i64,
    /// The event ID of the persisted audit record.
    audit_event_id: i64,
    /// The ticket revision after the append.
    revision: i64,
    /// A success message.
    message: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Success indicator, always `false` for errors.
    success: bool,
    /// The wire error code (e.g. `INVALID_CONTENT`).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The wire error code.
    code: String,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            code: self.code,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<SubmitError> for HttpError {
    fn from(err: SubmitError) -> Self {
        let code: &'static str = err.code();
        let (status, message) = match err {
            SubmitError::InvalidContent { message }
            | SubmitError::InvalidTicket { message }
            | SubmitError::InvalidToken { message }
            | SubmitError::InvalidFile { message } => (StatusCode::BAD_REQUEST, message),
            SubmitError::NoPermission { message } => (StatusCode::FORBIDDEN, message),
            SubmitError::Internal { message } => {
                error!(message = %message, "Internal error during comment submission");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        Self {
            status,
            code: code.to_string(),
            message,
        }
    }
}

/// Maps a malformed multipart payload to a 400 response.
fn multipart_error(err: &MultipartError) -> HttpError {
    HttpError {
        status: StatusCode::BAD_REQUEST,
        code: String::from("INVALID_REQUEST"),
        message: format!("Malformed multipart payload: {err}"),
    }
}

/// Parses the multipart comment form into an API request.
///
/// The form carries `content`, `ticketNumber`, and `private` text fields,
/// a numeric `images` count with `image_0..image_{N-1}` file parts, an
/// optional general `file` part, and an optional `csrf_token`.
async fn parse_comment_form(mut multipart: Multipart) -> Result<CommentRequest, HttpError> {
    let mut content: String = String::new();
    let mut ticket_number: String = String::new();
    let mut private: bool = false;
    let mut csrf_token: Option<String> = None;
    let mut image_count: usize = 0;
    let mut image_parts: HashMap<String, Upload> = HashMap::new();
    let mut file: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        let name: String = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "content" => content = field.text().await.map_err(|e| multipart_error(&e))?,
            "ticketNumber" => {
                ticket_number = field.text().await.map_err(|e| multipart_error(&e))?;
            }
            "private" => {
                let value: String = field.text().await.map_err(|e| multipart_error(&e))?;
                private = value == "true" || value == "1";
            }
            "csrf_token" => {
                csrf_token = Some(field.text().await.map_err(|e| multipart_error(&e))?);
            }
            "images" => {
                let value: String = field.text().await.map_err(|e| multipart_error(&e))?;
                image_count = value.parse().map_err(|_| HttpError {
                    status: StatusCode::BAD_REQUEST,
                    code: String::from("INVALID_FILE"),
                    message: format!("Field 'images' must be a count, got '{value}'"),
                })?;
            }
            "file" => {
                let client_name: String = field.file_name().unwrap_or("attachment").to_string();
                let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
                file = Some(Upload::new(client_name, bytes.to_vec()));
            }
            other if other.starts_with("image_") => {
                let client_name: String = field.file_name().unwrap_or("image").to_string();
                let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
                image_parts.insert(name, Upload::new(client_name, bytes.to_vec()));
            }
            other => {
                debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let mut images: Vec<Upload> = Vec::new();
    for index in 0..image_count {
        let key: String = format!("image_{index}");
        let upload: Upload = image_parts.remove(&key).ok_or_else(|| HttpError {
            status: StatusCode::BAD_REQUEST,
            code: String::from("INVALID_FILE"),
            message: format!("Declared {image_count} images but part '{key}' is missing"),
        })?;
        images.push(upload);
    }

    Ok(CommentRequest {
        ticket_number,
        content,
        private,
        csrf_token,
        images,
        file,
    })
}

/// Builds the audit cause for an HTTP submission.
///
/// Each request gets a distinct cause ID so audit events can be traced
/// back to the individual HTTP call that produced them.
fn request_cause() -> Cause {
    let stamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
    Cause::new(
        format!("http-{stamp}"),
        String::from("Ticket comment via HTTP"),
    )
}

/// Sends a notification outside the request path.
///
/// Delivery is best-effort: failures are logged and never surfaced to the
/// actor whose comment triggered the notification.
fn dispatch_notification(notifier: LogNotifier, notification: TicketResponded) {
    tokio::spawn(async move {
        if let Err(err) = notifier.send_ticket_responded(notification).await {
            warn!(error = %err, "Ticket responded notification failed");
        }
    });
}

/// Handler for POST `/ticket/comment` endpoint.
///
/// Appends a comment to a ticket on behalf of the authenticated actor.
async fn handle_submit_comment(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(credentials): SessionActor,
    multipart: Multipart,
) -> Result<Json<CommentApiResponse>, HttpError> {
    let request: CommentRequest = parse_comment_form(multipart).await?;

    info!(
        ticket_number = %request.ticket_number,
        actor = %credentials.context.audit_id(),
        images = request.images.len(),
        has_file = request.file.is_some(),
        private = request.private,
        "Handling comment submission"
    );

    let cause: Cause = request_cause();

    // Execute the workflow under the persistence lock
    let mut persistence = app_state.persistence.lock().await;
    let outcome: SubmitOutcome = submit_comment(
        &mut persistence,
        app_state.store.as_ref(),
        &app_state.config,
        &credentials,
        request,
        cause,
    )?;
    drop(persistence);

    // Notification delivery happens after the commit, off the request path
    if let Some(notification) = outcome.notification {
        dispatch_notification(app_state.notifier, notification);
    }

    info!(
        ticket_number = %outcome.response.ticket_number,
        comment_event_id = outcome.response.comment_event_id,
        "Successfully appended comment"
    );

    Ok(Json(CommentApiResponse {
        success: true,
        ticket_number: outcome.response.ticket_number,
        comment_event_id: outcome.response.comment_event_id,
        audit_event_id: outcome.response.audit_event_id,
        revision: outcome.response.revision,
        message: outcome.response.message,
    }))
}

/// Handler for GET `/health` endpoint.
#[allow(clippy::unused_async)]
async fn handle_health() -> &'static str {
    "OK"
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/ticket/comment", post(handle_submit_comment))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing OpenDesk Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let config: WorkflowConfig = WorkflowConfig::new(!args.no_user_system, args.base_url);
    info!(
        user_system_enabled = config.user_system_enabled,
        base_url = %config.base_url,
        attachments = %args.attachments,
        "Configured comment workflow"
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        store: Arc::new(DiskAttachmentStore::new(PathBuf::from(args.attachments))),
        notifier: LogNotifier::new(),
        config,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use opendesk_domain::{StaffId, Ticket, TicketAuthor, TicketNumber, TicketOwner, UserId};
    use opendesk_persistence::SessionPrincipal;
    use std::fmt::Write as _;
    use tower::ServiceExt;

    const BOUNDARY: &str = "opendesk-test-boundary";
    const VALID_CONTENT: &str = "The tray jams on every page since the update.";
    const FUTURE_EXPIRY: &str = "2030-01-01T00:00:00Z";

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        let stamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
        let attachments_root: PathBuf =
            std::env::temp_dir().join(format!("opendesk-server-test-{stamp}"));
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            store: Arc::new(DiskAttachmentStore::new(attachments_root)),
            notifier: LogNotifier::new(),
            config: WorkflowConfig::new(true, String::from("https://support.example.com")),
        }
    }

    /// Seeds one staff member, one registered user, and a ticket authored
    /// by the user and owned by the staff member.
    async fn seed_ticket_fixture(app_state: &AppState) -> (i64, i64) {
        let mut persistence = app_state.persistence.lock().await;
        let staff_id: i64 = persistence
            .insert_staff("Grace Hopper", "grace@example.com")
            .expect("Failed to insert staff");
        let user_id: i64 = persistence
            .insert_user("Ada Lovelace", "ada@example.com")
            .expect("Failed to insert user");
        let ticket: Ticket = Ticket::new(
            TicketNumber::new("481923").expect("valid number"),
            String::from("Printer is on fire"),
            TicketAuthor::Registered {
                id: UserId(user_id),
                name: String::from("Ada Lovelace"),
                email: String::from("ada@example.com"),
            },
            Some(TicketOwner {
                id: StaffId(staff_id),
                name: String::from("Grace Hopper"),
                email: String::from("grace@example.com"),
            }),
        );
        persistence
            .insert_ticket(&ticket)
            .expect("Failed to insert ticket");
        (staff_id, user_id)
    }

    /// Seeds an unassigned guest ticket together with its guest session.
    async fn seed_guest_fixture(app_state: &AppState) {
        let mut persistence = app_state.persistence.lock().await;
        let ticket: Ticket = Ticket::new(
            TicketNumber::new("620017").expect("valid number"),
            String::from("Cannot reset password"),
            TicketAuthor::Guest {
                name: String::from("Sam Carter"),
                email: String::from("sam@example.com"),
            },
            None,
        );
        persistence
            .insert_ticket(&ticket)
            .expect("Failed to insert ticket");
        persistence
            .create_session(
                "tok-620017",
                &SessionPrincipal::Guest(TicketNumber::new("620017").expect("valid number")),
                FUTURE_EXPIRY,
            )
            .expect("Failed to create session");
    }

    /// Seeds a bearer session for the given principal.
    async fn seed_session(
        app_state: &AppState,
        token: &str,
        principal: &SessionPrincipal,
        expires_at: &str,
    ) {
        let mut persistence = app_state.persistence.lock().await;
        persistence
            .create_session(token, principal, expires_at)
            .expect("Failed to create session");
    }

    /// Builds a multipart/form-data body from text fields and file parts.
    fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &str)]) -> String {
        let mut body: String = String::new();
        for (name, value) in fields {
            write!(
                body,
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .expect("write to string");
        }
        for (name, filename, contents) in files {
            write!(
                body,
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{contents}\r\n"
            )
            .expect("write to string");
        }
        write!(body, "--{BOUNDARY}--\r\n").expect("write to string");
        body
    }

    /// Form fields for a valid public comment on the given ticket.
    fn base_fields(ticket_number: &str) -> Vec<(&str, &str)> {
        vec![
            ("ticketNumber", ticket_number),
            ("content", VALID_CONTENT),
            ("private", "false"),
            ("images", "0"),
        ]
    }

    /// Posts a multipart comment request through the router.
    async fn post_comment(
        app: Router,
        token: &str,
        fields: &[(&str, &str)],
        files: &[(&str, &str, &str)],
    ) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/ticket/comment")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::from(multipart_body(fields, files)))
                .expect("request"),
        )
        .await
        .expect("response")
    }

    /// Reads the response body into the given deserializable type.
    async fn read_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&body_bytes).expect("valid JSON body")
    }

    #[tokio::test]
    async fn test_comment_submission_succeeds() {
        let app_state: AppState = create_test_app_state();
        let (_, user_id) = seed_ticket_fixture(&app_state).await;
        seed_session(
            &app_state,
            "tok-ada",
            &SessionPrincipal::User(user_id),
            FUTURE_EXPIRY,
        )
        .await;
        let app: Router = build_router(app_state);

        let response: Response = post_comment(app, "tok-ada", &base_fields("481923"), &[]).await;

        assert_eq!(response.status(), HttpStatusCode::OK);

        let api_response: CommentApiResponse = read_body(response).await;
        assert!(api_response.success);
        assert_eq!(api_response.ticket_number, "481923");
        assert!(api_response.comment_event_id > 0);
        assert!(api_response.audit_event_id > 0);
        assert_eq!(api_response.revision, 1);
    }

    #[tokio::test]
    async fn test_comment_submission_appends_event() {
        let app_state: AppState = create_test_app_state();
        let (_, user_id) = seed_ticket_fixture(&app_state).await;
        seed_session(
            &app_state,
            "tok-ada",
            &SessionPrincipal::User(user_id),
            FUTURE_EXPIRY,
        )
        .await;
        let app: Router = build_router(app_state.clone());

        let response: Response = post_comment(app, "tok-ada", &base_fields("481923"), &[]).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let mut persistence = app_state.persistence.lock().await;
        let ticket: Ticket = persistence
            .get_ticket_by_number(&TicketNumber::new("481923").expect("valid number"))
            .expect("ticket exists");
        assert_eq!(ticket.events.len(), 1);
        assert_eq!(ticket.events[0].content, VALID_CONTENT);
        assert_eq!(ticket.revision, 1);
    }

    #[tokio::test]
    async fn test_missing_authorization_header_rejected() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ticket/comment")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(multipart_body(&base_fields("481923"), &[])))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_authorization_header_rejected() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ticket/comment")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .header("Authorization", "Token tok-ada")
                    .body(Body::from(multipart_body(&base_fields("481923"), &[])))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_session_token_rejected() {
        let app_state: AppState = create_test_app_state();
        seed_ticket_fixture(&app_state).await;
        let app: Router = build_router(app_state);

        let response: Response =
            post_comment(app, "tok-nobody", &base_fields("481923"), &[]).await;

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_session_rejected() {
        let app_state: AppState = create_test_app_state();
        let (_, user_id) = seed_ticket_fixture(&app_state).await;
        seed_session(
            &app_state,
            "tok-stale",
            &SessionPrincipal::User(user_id),
            "2020-01-01T00:00:00Z",
        )
        .await;
        let app: Router = build_router(app_state);

        let response: Response = post_comment(app, "tok-stale", &base_fields("481923"), &[]).await;

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_short_content_rejected() {
        let app_state: AppState = create_test_app_state();
        let (_, user_id) = seed_ticket_fixture(&app_state).await;
        seed_session(
            &app_state,
            "tok-ada",
            &SessionPrincipal::User(user_id),
            FUTURE_EXPIRY,
        )
        .await;
        let app: Router = build_router(app_state);

        let fields: Vec<(&str, &str)> = vec![
            ("ticketNumber", "481923"),
            ("content", "Too short."),
            ("private", "false"),
            ("images", "0"),
        ];
        let response: Response = post_comment(app, "tok-ada", &fields, &[]).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let error_response: ErrorResponse = read_body(response).await;
        assert!(!error_response.success);
        assert_eq!(error_response.code, "INVALID_CONTENT");
    }

    #[tokio::test]
    async fn test_unknown_ticket_rejected() {
        let app_state: AppState = create_test_app_state();
        let (_, user_id) = seed_ticket_fixture(&app_state).await;
        seed_session(
            &app_state,
            "tok-ada",
            &SessionPrincipal::User(user_id),
            FUTURE_EXPIRY,
        )
        .await;
        let app: Router = build_router(app_state);

        let response: Response = post_comment(app, "tok-ada", &base_fields("999999"), &[]).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let error_response: ErrorResponse = read_body(response).await;
        assert_eq!(error_response.code, "INVALID_TICKET");
        assert!(error_response.message.contains("999999"));
    }

    #[tokio::test]
    async fn test_unrelated_user_rejected() {
        let app_state: AppState = create_test_app_state();
        seed_ticket_fixture(&app_state).await;
        let bob_id: i64 = {
            let mut persistence = app_state.persistence.lock().await;
            persistence
                .insert_user("Bob Stone", "bob@example.com")
                .expect("Failed to insert user")
        };
        seed_session(
            &app_state,
            "tok-bob",
            &SessionPrincipal::User(bob_id),
            FUTURE_EXPIRY,
        )
        .await;
        let app: Router = build_router(app_state.clone());

        let response: Response = post_comment(app, "tok-bob", &base_fields("481923"), &[]).await;

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);

        let error_response: ErrorResponse = read_body(response).await;
        assert_eq!(error_response.code, "NO_PERMISSION");

        let mut persistence = app_state.persistence.lock().await;
        let ticket: Ticket = persistence
            .get_ticket_by_number(&TicketNumber::new("481923").expect("valid number"))
            .expect("ticket exists");
        assert!(ticket.events.is_empty());
    }

    #[tokio::test]
    async fn test_guest_comment_succeeds() {
        let app_state: AppState = create_test_app_state();
        seed_guest_fixture(&app_state).await;
        let app: Router = build_router(app_state);

        let mut fields: Vec<(&str, &str)> = base_fields("620017");
        fields.push(("csrf_token", "tok-620017"));
        let response: Response = post_comment(app, "tok-620017", &fields, &[]).await;

        assert_eq!(response.status(), HttpStatusCode::OK);

        let api_response: CommentApiResponse = read_body(response).await;
        assert!(api_response.success);
        assert_eq!(api_response.ticket_number, "620017");
    }

    #[tokio::test]
    async fn test_guest_wrong_csrf_token_rejected() {
        let app_state: AppState = create_test_app_state();
        seed_guest_fixture(&app_state).await;
        let app: Router = build_router(app_state);

        let mut fields: Vec<(&str, &str)> = base_fields("620017");
        fields.push(("csrf_token", "forged"));
        let response: Response = post_comment(app, "tok-620017", &fields, &[]).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let error_response: ErrorResponse = read_body(response).await;
        assert_eq!(error_response.code, "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_staff_private_comment_round_trips() {
        let app_state: AppState = create_test_app_state();
        let (staff_id, _) = seed_ticket_fixture(&app_state).await;
        seed_session(
            &app_state,
            "tok-grace",
            &SessionPrincipal::Staff(staff_id),
            FUTURE_EXPIRY,
        )
        .await;
        let app: Router = build_router(app_state.clone());

        let fields: Vec<(&str, &str)> = vec![
            ("ticketNumber", "481923"),
            ("content", VALID_CONTENT),
            ("private", "true"),
            ("images", "0"),
        ];
        let response: Response = post_comment(app, "tok-grace", &fields, &[]).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let mut persistence = app_state.persistence.lock().await;
        let ticket: Ticket = persistence
            .get_ticket_by_number(&TicketNumber::new("481923").expect("valid number"))
            .expect("ticket exists");
        assert!(ticket.events[0].private);
    }

    #[tokio::test]
    async fn test_image_upload_rewrites_placeholders() {
        let app_state: AppState = create_test_app_state();
        let (_, user_id) = seed_ticket_fixture(&app_state).await;
        seed_session(
            &app_state,
            "tok-ada",
            &SessionPrincipal::User(user_id),
            FUTURE_EXPIRY,
        )
        .await;
        let app: Router = build_router(app_state.clone());

        let fields: Vec<(&str, &str)> = vec![
            ("ticketNumber", "481923"),
            ("content", "Compare image_0 with the jam photo from before."),
            ("private", "false"),
            ("images", "1"),
        ];
        let files: Vec<(&str, &str, &str)> = vec![("image_0", "before.png", "fakepngbytes")];
        let response: Response = post_comment(app, "tok-ada", &fields, &files).await;

        assert_eq!(response.status(), HttpStatusCode::OK);

        let mut persistence = app_state.persistence.lock().await;
        let ticket: Ticket = persistence
            .get_ticket_by_number(&TicketNumber::new("481923").expect("valid number"))
            .expect("ticket exists");
        assert!(ticket.events[0].content.contains("/attachments/481923/"));
        assert!(!ticket.events[0].content.contains("image_0"));
    }

    #[tokio::test]
    async fn test_disallowed_upload_rejected() {
        let app_state: AppState = create_test_app_state();
        let (_, user_id) = seed_ticket_fixture(&app_state).await;
        seed_session(
            &app_state,
            "tok-ada",
            &SessionPrincipal::User(user_id),
            FUTURE_EXPIRY,
        )
        .await;
        let app: Router = build_router(app_state.clone());

        let fields: Vec<(&str, &str)> = vec![
            ("ticketNumber", "481923"),
            ("content", VALID_CONTENT),
            ("private", "false"),
            ("images", "1"),
        ];
        let files: Vec<(&str, &str, &str)> = vec![("image_0", "script.sh", "#!/bin/sh")];
        let response: Response = post_comment(app, "tok-ada", &fields, &files).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let error_response: ErrorResponse = read_body(response).await;
        assert_eq!(error_response.code, "INVALID_FILE");

        let mut persistence = app_state.persistence.lock().await;
        let ticket: Ticket = persistence
            .get_ticket_by_number(&TicketNumber::new("481923").expect("valid number"))
            .expect("ticket exists");
        assert!(ticket.events.is_empty());
    }

    #[tokio::test]
    async fn test_image_count_must_be_numeric() {
        let app_state: AppState = create_test_app_state();
        let (_, user_id) = seed_ticket_fixture(&app_state).await;
        seed_session(
            &app_state,
            "tok-ada",
            &SessionPrincipal::User(user_id),
            FUTURE_EXPIRY,
        )
        .await;
        let app: Router = build_router(app_state);

        let fields: Vec<(&str, &str)> = vec![
            ("ticketNumber", "481923"),
            ("content", VALID_CONTENT),
            ("private", "false"),
            ("images", "several"),
        ];
        let response: Response = post_comment(app, "tok-ada", &fields, &[]).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let error_response: ErrorResponse = read_body(response).await;
        assert_eq!(error_response.code, "INVALID_FILE");
    }

    #[tokio::test]
    async fn test_missing_declared_image_part_rejected() {
        let app_state: AppState = create_test_app_state();
        let (_, user_id) = seed_ticket_fixture(&app_state).await;
        seed_session(
            &app_state,
            "tok-ada",
            &SessionPrincipal::User(user_id),
            FUTURE_EXPIRY,
        )
        .await;
        let app: Router = build_router(app_state);

        let fields: Vec<(&str, &str)> = vec![
            ("ticketNumber", "481923"),
            ("content", VALID_CONTENT),
            ("private", "false"),
            ("images", "2"),
        ];
        let files: Vec<(&str, &str, &str)> = vec![("image_0", "before.png", "fakepngbytes")];
        let response: Response = post_comment(app, "tok-ada", &fields, &files).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let error_response: ErrorResponse = read_body(response).await;
        assert_eq!(error_response.code, "INVALID_FILE");
        assert!(error_response.message.contains("image_1"));
    }

    #[tokio::test]
    async fn test_health_route_responds() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), HttpStatusCode::OK);
    }
}
