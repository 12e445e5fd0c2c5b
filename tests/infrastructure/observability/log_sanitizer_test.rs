use kargoline::infrastructure::observability::{mask_email, sanitize_text};

#[test]
fn given_multiline_text_when_sanitizing_then_whitespace_is_collapsed() {
    let result = sanitize_text("  Two armchairs\n\tand   a table  ");
    assert_eq!(result, "Two armchairs and a table");
}

#[test]
fn given_blank_text_when_sanitizing_then_marked_empty() {
    assert_eq!(sanitize_text(""), "[EMPTY]");
    assert_eq!(sanitize_text(" \n "), "[EMPTY]");
}

#[test]
fn given_long_text_when_sanitizing_then_truncated_with_total_length() {
    let text = "a".repeat(150);

    let result = sanitize_text(&text);

    assert!(result.starts_with(&"a".repeat(100)));
    assert!(result.ends_with("... (150 chars total)"));
}

#[test]
fn given_review_with_email_when_sanitizing_then_address_is_masked() {
    let result = sanitize_text("Call me at jane.doe@example.com please");
    assert_eq!(result, "Call me at j***@example.com please");
}

#[test]
fn given_email_when_masking_then_only_first_letter_and_domain_remain() {
    assert_eq!(mask_email("dana@example.com"), "d***@example.com");
}

#[test]
fn given_text_without_at_sign_when_masking_then_fully_redacted() {
    assert_eq!(mask_email("not-an-email"), "[REDACTED]");
}
