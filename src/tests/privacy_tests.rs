use crate::core::anchor::AnchorMessage;
use crate::core::errors::LedgerError;
use crate::core::privacy::{self, PrivacyCategory, contains_email, contains_payment_terms, contains_phone_number};

#[test]
fn test_detects_email_addresses() {
    let _ = env_logger::try_init();
    assert!(contains_email("write to alice.smith+pots@example.co.uk today"));
    assert!(contains_email(r#"{"name":"bob@mail.org"}"#));
    assert!(!contains_email("meet @ the station"));
    assert!(!contains_email("user@localhost"));
    assert!(!contains_email("v1@2.0"));
}

#[test]
fn test_detects_phone_numbers() {
    let _ = env_logger::try_init();
    assert!(contains_phone_number(r#"{"name":"Alice +41 79 123 45 67"}"#));
    assert!(contains_phone_number("call (555) 123-4567 tonight"));
    assert!(contains_phone_number("0791234567"));
}

#[test]
fn test_phone_scan_ignores_ledger_numbers() {
    let _ = env_logger::try_init();
    assert!(!contains_phone_number(r#"{"amount":33.333333333333336}"#));
    assert!(!contains_phone_number(r#"{"date":"2024-06-01"}"#));
    assert!(!contains_phone_number("9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"));
    assert!(!contains_phone_number("123e4567-e89b-12d3-a456-426614174000"));
    assert!(!contains_phone_number("12345678"));
    assert!(!contains_phone_number("tx_1234567890"));
}

#[test]
fn test_phone_scan_ignores_runs_of_years() {
    let _ = env_logger::try_init();
    assert!(!contains_phone_number(r#"{"name":"Trips 2023 2024 2025"}"#));
    assert!(!contains_phone_number("Ski 1998 1999 2000"));
    assert!(contains_phone_number("Trips 2023 2024 25"));
    assert!(contains_phone_number("call 0791 2345 6789"));
}

#[test]
fn test_detects_payment_vocabulary_as_whole_words() {
    let _ = env_logger::try_init();
    assert!(contains_payment_terms("Send to my IBAN please"));
    assert!(contains_payment_terms("paid via PayPal"));
    assert!(contains_payment_terms("credit card ending"));
    assert!(!contains_payment_terms("bicycle rental"));
    assert!(!contains_payment_terms("Taylor Swift tickets"));
}

#[test]
fn test_scan_reports_first_category_only() {
    let _ = env_logger::try_init();
    assert_eq!(
        privacy::scan("iban or bob@example.com"),
        Some(PrivacyCategory::EmailAddress)
    );
    assert_eq!(privacy::scan("venmo"), Some(PrivacyCategory::PaymentDetails));
    assert_eq!(privacy::scan(r#"{"name":"Dinner"}"#), None);
}

#[test]
fn test_violation_message_names_only_the_category() {
    let _ = env_logger::try_init();
    let error = LedgerError::PrivacyViolation(PrivacyCategory::PhoneNumber);
    assert_eq!(error.to_string(), "Snapshot refused: possible phone number in ledger data");
}

#[test]
fn test_anchor_message_round_trips_through_display() {
    let _ = env_logger::try_init();
    let message = "potledger:v1:9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08 locator:ipfs://bafy";
    let anchor = AnchorMessage::parse(message).unwrap();
    assert_eq!(anchor.app_id, "potledger");
    assert_eq!(anchor.schema_version, 1);
    assert_eq!(anchor.locator.as_deref(), Some("ipfs://bafy"));
    assert_eq!(anchor.to_string(), message);
}

#[test]
fn test_anchor_parse_skips_unknown_suffixes() {
    let _ = env_logger::try_init();
    let anchor = AnchorMessage::parse("potledger:v2:ABCDEF01 chain:polkadot locator:ar://x extra").unwrap();
    assert_eq!(anchor.schema_version, 2);
    assert_eq!(anchor.commitment_hash, "abcdef01");
    assert_eq!(anchor.locator.as_deref(), Some("ar://x"));

    let anchor = AnchorMessage::parse("potledger:v1:abcdef01").unwrap();
    assert_eq!(anchor.locator, None);
}

#[test]
fn test_anchor_parse_rejects_malformed_messages() {
    let _ = env_logger::try_init();
    for message in [
        "",
        "potledger",
        "potledger:v1",
        ":v1:abcd",
        "potledger:1:abcd",
        "potledger:vx:abcd",
        "potledger:v1:",
        "potledger:v1:xyz",
        "potledger:v1:abc",
    ] {
        assert!(
            matches!(AnchorMessage::parse(message), Err(LedgerError::MalformedAnchor(_))),
            "{:?} should be rejected",
            message
        );
    }
}
