// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end tests for the comment submission workflow.

use opendesk_audit::AuditEvent;
use opendesk_domain::{Authorship, Ticket, TicketEvent, UserId};
use opendesk_files::MemoryAttachmentStore;

use crate::{CommentRequest, SubmitError, SubmitOutcome, submit_comment};

use super::helpers::{
    create_comment_request, create_guest_ticket, create_test_cause, create_test_config,
    create_test_ticket, guest_credentials, setup_test_persistence, setup_ticket,
    staff_credentials, user_credentials,
};

#[test]
fn test_author_comment_round_trips() {
    let (mut persistence, staff_id, user_id) = setup_test_persistence();
    let ticket: Ticket = setup_ticket(&mut persistence, &create_test_ticket(user_id, staff_id));
    let store = MemoryAttachmentStore::new();

    let outcome: SubmitOutcome = submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        create_comment_request("481923"),
        create_test_cause(),
    )
    .expect("submission should succeed");

    assert_eq!(outcome.response.ticket_number, "481923");
    assert_eq!(outcome.response.revision, 1);
    assert!(outcome.response.message.contains("481923"));

    let reloaded: Ticket = persistence
        .get_ticket_by_number(&ticket.number)
        .expect("Failed to reload ticket");
    assert_eq!(reloaded.events.len(), 1);
    assert_eq!(reloaded.revision, 1);

    let comment: &TicketEvent = &reloaded.events[0];
    assert_eq!(comment.event_id, Some(outcome.response.comment_event_id));
    assert_eq!(
        comment.content,
        "The tray jams on every page since the update."
    );
    assert_eq!(comment.authorship, Authorship::User(UserId(user_id)));
    assert!(!comment.private);
    assert_eq!(comment.file, None);
}

#[test]
fn test_author_comment_marks_ticket_unread_for_staff() {
    let (mut persistence, staff_id, user_id) = setup_test_persistence();
    let mut fixture: Ticket = create_test_ticket(user_id, staff_id);
    fixture.unread_staff = false;
    setup_ticket(&mut persistence, &fixture);
    let store = MemoryAttachmentStore::new();

    let outcome: SubmitOutcome = submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        create_comment_request("481923"),
        create_test_cause(),
    )
    .expect("submission should succeed");

    assert!(!outcome.new_ticket.unread);
    assert!(outcome.new_ticket.unread_staff);

    let reloaded: Ticket = persistence
        .get_ticket_by_number(&fixture.number)
        .expect("Failed to reload ticket");
    assert!(!reloaded.unread);
    assert!(reloaded.unread_staff);
}

#[test]
fn test_owner_comment_marks_ticket_unread_for_author() {
    let (mut persistence, staff_id, user_id) = setup_test_persistence();
    let ticket: Ticket = setup_ticket(&mut persistence, &create_test_ticket(user_id, staff_id));
    let store = MemoryAttachmentStore::new();

    submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &staff_credentials(staff_id),
        create_comment_request("481923"),
        create_test_cause(),
    )
    .expect("submission should succeed");

    // The owner is neither the author nor behind on their own comment
    let reloaded: Ticket = persistence
        .get_ticket_by_number(&ticket.number)
        .expect("Failed to reload ticket");
    assert!(reloaded.unread);
    assert!(!reloaded.unread_staff);
}

#[test]
fn test_staff_private_comment_is_honored() {
    let (mut persistence, staff_id, user_id) = setup_test_persistence();
    let ticket: Ticket = setup_ticket(&mut persistence, &create_test_ticket(user_id, staff_id));
    let store = MemoryAttachmentStore::new();

    let mut request: CommentRequest = create_comment_request("481923");
    request.private = true;

    submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &staff_credentials(staff_id),
        request,
        create_test_cause(),
    )
    .expect("submission should succeed");

    let reloaded: Ticket = persistence
        .get_ticket_by_number(&ticket.number)
        .expect("Failed to reload ticket");
    assert!(reloaded.events[0].private);
}

#[test]
fn test_user_private_flag_is_forced_public() {
    let (mut persistence, staff_id, user_id) = setup_test_persistence();
    let ticket: Ticket = setup_ticket(&mut persistence, &create_test_ticket(user_id, staff_id));
    let store = MemoryAttachmentStore::new();

    let mut request: CommentRequest = create_comment_request("481923");
    request.private = true;

    submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        request,
        create_test_cause(),
    )
    .expect("submission should succeed");

    let reloaded: Ticket = persistence
        .get_ticket_by_number(&ticket.number)
        .expect("Failed to reload ticket");
    assert!(!reloaded.events[0].private);
}

#[test]
fn test_short_content_rejected_without_persisting() {
    let (mut persistence, staff_id, user_id) = setup_test_persistence();
    let ticket: Ticket = setup_ticket(&mut persistence, &create_test_ticket(user_id, staff_id));
    let store = MemoryAttachmentStore::new();

    let mut request: CommentRequest = create_comment_request("481923");
    request.content = String::from("Too short.");

    let result: Result<SubmitOutcome, SubmitError> = submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        request,
        create_test_cause(),
    );

    let err: SubmitError = result.expect_err("short content must be rejected");
    assert_eq!(err.code(), "INVALID_CONTENT");

    let reloaded: Ticket = persistence
        .get_ticket_by_number(&ticket.number)
        .expect("Failed to reload ticket");
    assert!(reloaded.events.is_empty());
    assert_eq!(reloaded.revision, 0);
}

#[test]
fn test_content_length_bounds_are_inclusive() {
    let (mut persistence, staff_id, user_id) = setup_test_persistence();
    setup_ticket(&mut persistence, &create_test_ticket(user_id, staff_id));
    let store = MemoryAttachmentStore::new();

    let mut at_minimum: CommentRequest = create_comment_request("481923");
    at_minimum.content = String::from("Printer still broken");
    assert_eq!(at_minimum.content.chars().count(), 20);

    submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        at_minimum,
        create_test_cause(),
    )
    .expect("20 characters should be accepted");

    let mut at_maximum: CommentRequest = create_comment_request("481923");
    at_maximum.content = "x".repeat(5000);

    submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        at_maximum,
        create_test_cause(),
    )
    .expect("5000 characters should be accepted");

    let mut over_maximum: CommentRequest = create_comment_request("481923");
    over_maximum.content = "x".repeat(5001);

    let err: SubmitError = submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        over_maximum,
        create_test_cause(),
    )
    .expect_err("5001 characters must be rejected");
    assert_eq!(err.code(), "INVALID_CONTENT");
}

#[test]
fn test_content_length_counts_characters_not_bytes() {
    let (mut persistence, staff_id, user_id) = setup_test_persistence();
    setup_ticket(&mut persistence, &create_test_ticket(user_id, staff_id));
    let store = MemoryAttachmentStore::new();

    // 19 two-byte characters: 38 bytes, still under the character minimum
    let mut too_short: CommentRequest = create_comment_request("481923");
    too_short.content = "é".repeat(19);

    let err: SubmitError = submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        too_short,
        create_test_cause(),
    )
    .expect_err("19 characters must be rejected regardless of byte length");
    assert_eq!(err.code(), "INVALID_CONTENT");

    let mut at_minimum: CommentRequest = create_comment_request("481923");
    at_minimum.content = "é".repeat(20);

    submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        at_minimum,
        create_test_cause(),
    )
    .expect("20 characters should be accepted regardless of byte length");
}

#[test]
fn test_unknown_ticket_rejected() {
    let (mut persistence, staff_id, user_id) = setup_test_persistence();
    setup_ticket(&mut persistence, &create_test_ticket(user_id, staff_id));
    let store = MemoryAttachmentStore::new();

    let err: SubmitError = submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        create_comment_request("999999"),
        create_test_cause(),
    )
    .expect_err("unknown ticket must be rejected");

    assert_eq!(err.code(), "INVALID_TICKET");
    assert!(err.to_string().contains("999999"));
}

#[test]
fn test_malformed_ticket_number_rejected() {
    let (mut persistence, _staff_id, user_id) = setup_test_persistence();
    let store = MemoryAttachmentStore::new();

    let err: SubmitError = submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        create_comment_request("not-a-number!"),
        create_test_cause(),
    )
    .expect_err("malformed ticket number must be rejected");

    assert_eq!(err.code(), "INVALID_TICKET");
}

#[test]
fn test_audit_trail_records_submission() {
    let (mut persistence, staff_id, user_id) = setup_test_persistence();
    let ticket: Ticket = setup_ticket(&mut persistence, &create_test_ticket(user_id, staff_id));
    let store = MemoryAttachmentStore::new();

    let outcome: SubmitOutcome = submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        create_comment_request("481923"),
        create_test_cause(),
    )
    .expect("submission should succeed");

    let event: AuditEvent = persistence
        .get_audit_event(outcome.response.audit_event_id)
        .expect("audit event should be retrievable");

    assert_eq!(event.ticket_number, ticket.number);
    assert_eq!(event.actor.id, format!("user:{user_id}"));
    assert_eq!(event.actor.actor_type, "User");
    assert_eq!(event.cause.id, "api-req-456");
    assert_eq!(event.action.name, "Comment");
    assert!(
        event
            .action
            .details
            .as_deref()
            .expect("details should be set")
            .contains("Public")
    );
    assert_eq!(event.before.event_count, 0);
    assert_eq!(event.after.event_count, 1);
}

#[test]
fn test_guest_comment_round_trips() {
    let (mut persistence, _staff_id, _user_id) = setup_test_persistence();
    let mut fixture: Ticket = create_guest_ticket();
    fixture.unread_staff = false;
    setup_ticket(&mut persistence, &fixture);
    let store = MemoryAttachmentStore::new();

    let mut request: CommentRequest = create_comment_request("620017");
    request.csrf_token = Some(String::from("tok-620017"));

    let outcome: SubmitOutcome = submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &guest_credentials("620017", "tok-620017"),
        request,
        create_test_cause(),
    )
    .expect("guest submission should succeed");

    assert_eq!(outcome.response.revision, 1);

    let reloaded: Ticket = persistence
        .get_ticket_by_number(&fixture.number)
        .expect("Failed to reload ticket");
    assert_eq!(reloaded.events.len(), 1);
    assert_eq!(reloaded.events[0].authorship, Authorship::Anonymous);
    // Guests never move the unread flags
    assert!(!reloaded.unread);
    assert!(!reloaded.unread_staff);
}

#[test]
fn test_revision_increments_across_comments() {
    let (mut persistence, staff_id, user_id) = setup_test_persistence();
    let ticket: Ticket = setup_ticket(&mut persistence, &create_test_ticket(user_id, staff_id));
    let store = MemoryAttachmentStore::new();

    let first: SubmitOutcome = submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &user_credentials(user_id),
        create_comment_request("481923"),
        create_test_cause(),
    )
    .expect("first submission should succeed");

    let second: SubmitOutcome = submit_comment(
        &mut persistence,
        &store,
        &create_test_config(),
        &staff_credentials(staff_id),
        create_comment_request("481923"),
        create_test_cause(),
    )
    .expect("second submission should succeed");

    assert_eq!(first.response.revision, 1);
    assert_eq!(second.response.revision, 2);

    let reloaded: Ticket = persistence
        .get_ticket_by_number(&ticket.number)
        .expect("Failed to reload ticket");
    assert_eq!(reloaded.events.len(), 2);
    assert_eq!(reloaded.revision, 2);
}
