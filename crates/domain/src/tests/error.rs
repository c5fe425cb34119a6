// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidCommentContent { length: 3 };
    assert_eq!(
        format!("{err}"),
        "Comment content must be between 20 and 5000 characters, got 3"
    );

    let err: DomainError = DomainError::InvalidTicketNumber(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid ticket number: test");

    let err: DomainError = DomainError::TicketNotFound {
        number: String::from("481923"),
    };
    assert_eq!(format!("{err}"), "Ticket '481923' not found");

    let err: DomainError = DomainError::InvalidEventKind(String::from("Escalate"));
    assert_eq!(format!("{err}"), "Invalid event kind: Escalate");

    let err: DomainError = DomainError::InvalidAuthorship(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid authorship: test");

    let err: DomainError = DomainError::GuestTicketMismatch {
        bound_number: String::from("481923"),
        requested_number: String::from("990011"),
    };
    assert_eq!(
        format!("{err}"),
        "Guest session bound to ticket '481923' cannot act on ticket '990011'"
    );
}
