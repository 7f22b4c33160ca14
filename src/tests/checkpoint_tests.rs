use chrono::{Duration, TimeZone, Utc};

use super::ledger_with;
use crate::core::checkpoint;
use crate::core::errors::LedgerError;
use crate::core::models::{CheckpointStatus, Currency};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_checkpoint_lifecycle() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice", "bob"]);

    let created = checkpoint::create(&mut ledger, "owner", now()).unwrap();
    assert_eq!(created.status, CheckpointStatus::Pending);
    assert_eq!(created.confirmations.len(), 3);
    assert!(created.confirmations.values().all(|c| !c.confirmed && c.confirmed_at.is_none()));
    assert_eq!(created.expires_at, now() + Duration::hours(48));
    assert!(!ledger.settlement_allowed());

    assert_eq!(checkpoint::confirm(&mut ledger, "owner", now()).unwrap(), CheckpointStatus::Pending);
    assert_eq!(checkpoint::confirm(&mut ledger, "alice", now()).unwrap(), CheckpointStatus::Pending);
    assert_eq!(checkpoint::confirm(&mut ledger, "bob", now()).unwrap(), CheckpointStatus::Confirmed);
    assert!(ledger.settlement_allowed());

    let replacement = checkpoint::create(&mut ledger, "alice", now()).unwrap();
    assert_ne!(replacement.id, created.id);
    assert_eq!(ledger.checkpoint.as_ref().unwrap().id, replacement.id);

    checkpoint::bypass(&mut ledger, "owner", now()).unwrap();
    let bypassed = ledger.checkpoint.as_ref().unwrap();
    assert_eq!(bypassed.status, CheckpointStatus::Bypassed);
    assert_eq!(bypassed.bypassed_by.as_deref(), Some("owner"));
    assert!(ledger.settlement_allowed());

    let result = checkpoint::confirm(&mut ledger, "bob", now());
    assert!(matches!(result, Err(LedgerError::NotFound(_))));
}

#[test]
fn test_create_while_pending_fails() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice"]);
    checkpoint::create(&mut ledger, "owner", now()).unwrap();

    let result = checkpoint::create(&mut ledger, "alice", now());
    assert!(matches!(result, Err(LedgerError::InvalidState(_))));
}

#[test]
fn test_confirm_without_checkpoint_fails() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice"]);
    let result = checkpoint::confirm(&mut ledger, "owner", now());
    assert!(matches!(result, Err(LedgerError::NotFound(_))));
}

#[test]
fn test_outsiders_cannot_create_or_confirm() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice"]);
    assert_eq!(
        checkpoint::create(&mut ledger, "mallory", now()),
        Err(LedgerError::NotAParticipant("mallory".to_string()))
    );

    checkpoint::create(&mut ledger, "owner", now()).unwrap();
    assert_eq!(
        checkpoint::confirm(&mut ledger, "mallory", now()),
        Err(LedgerError::NotAParticipant("mallory".to_string()))
    );
}

#[test]
fn test_expiry_is_only_reported() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice"]);
    checkpoint::create(&mut ledger, "owner", now()).unwrap();
    checkpoint::confirm(&mut ledger, "owner", now()).unwrap();

    let before = checkpoint::describe(&ledger, now() + Duration::hours(47));
    assert!(!before.expired);
    assert_eq!(before.awaiting, vec!["alice".to_string()]);

    let after = checkpoint::describe(&ledger, now() + Duration::hours(49));
    assert!(after.expired);
    assert!(!after.settlement_allowed);
    assert_eq!(after.checkpoint.unwrap().status, CheckpointStatus::Pending);

    // Still confirmable after expiry.
    assert_eq!(
        checkpoint::confirm(&mut ledger, "alice", now() + Duration::hours(50)).unwrap(),
        CheckpointStatus::Confirmed
    );
}

#[test]
fn test_edit_resets_owner_confirmation() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice", "bob"]);
    checkpoint::create(&mut ledger, "owner", now()).unwrap();
    checkpoint::confirm(&mut ledger, "owner", now()).unwrap();
    checkpoint::confirm(&mut ledger, "alice", now()).unwrap();

    assert!(checkpoint::invalidate_on_edit(&mut ledger));
    let pending = ledger.checkpoint.as_ref().unwrap();
    assert!(!pending.has_confirmed("owner"));
    assert!(pending.has_confirmed("alice"));
    assert_eq!(pending.status, CheckpointStatus::Pending);

    // Nothing left to reset.
    assert!(!checkpoint::invalidate_on_edit(&mut ledger));
}

#[test]
fn test_edit_after_confirmation_leaves_checkpoint_alone() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice"]);
    checkpoint::create(&mut ledger, "owner", now()).unwrap();
    checkpoint::confirm(&mut ledger, "owner", now()).unwrap();
    checkpoint::confirm(&mut ledger, "alice", now()).unwrap();

    assert!(!checkpoint::invalidate_on_edit(&mut ledger));
    assert_eq!(ledger.checkpoint.as_ref().unwrap().status, CheckpointStatus::Confirmed);
}

#[test]
fn test_removed_participant_no_longer_blocks_confirmation() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice", "bob"]);
    checkpoint::create(&mut ledger, "owner", now()).unwrap();
    let bob = ledger.participants.remove(2);
    ledger.former_participants.push(bob);

    checkpoint::confirm(&mut ledger, "owner", now()).unwrap();
    assert_eq!(
        checkpoint::confirm(&mut ledger, "alice", now()).unwrap(),
        CheckpointStatus::Confirmed
    );
    let confirmed = ledger.checkpoint.as_ref().unwrap();
    assert!(confirmed.confirmations.contains_key("bob"));
    assert!(!confirmed.has_confirmed("bob"));

    let result = checkpoint::confirm(&mut ledger, "bob", now());
    assert!(matches!(result, Err(LedgerError::NotFound(_))));
}

#[test]
fn test_completion_rechecked_after_removal() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice", "bob"]);
    checkpoint::create(&mut ledger, "owner", now()).unwrap();
    checkpoint::confirm(&mut ledger, "owner", now()).unwrap();
    checkpoint::confirm(&mut ledger, "alice", now()).unwrap();
    assert!(!checkpoint::complete_if_confirmed(&mut ledger));

    let bob = ledger.participants.remove(2);
    ledger.former_participants.push(bob);
    assert!(checkpoint::complete_if_confirmed(&mut ledger));
    assert_eq!(ledger.checkpoint.as_ref().unwrap().status, CheckpointStatus::Confirmed);
    assert!(ledger.settlement_allowed());

    assert!(!checkpoint::complete_if_confirmed(&mut ledger));
}
