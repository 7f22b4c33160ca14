use chrono::Utc;

use super::{entry, ledger_with};
use crate::core::balance::{ParticipantDirectory, compute_global_balances, compute_ledger_balances};
use crate::core::models::entry::upgrade_confirmations;
use crate::core::models::{
    Currency, EntryConfirmation, SettlementMethod, SettlementRecord, SettlementStatus, StoredConfirmation,
};

fn settlement(from_id: &str, to_id: &str, amount: f64, status: SettlementStatus) -> SettlementRecord {
    SettlementRecord {
        id: format!("s-{}-{}", from_id, to_id),
        from_id: from_id.to_string(),
        to_id: to_id.to_string(),
        amount,
        currency: Currency::Usd,
        method: SettlementMethod::Cash,
        tx_ref: None,
        block_ref: None,
        status,
        timestamp: Utc::now(),
    }
}

#[test]
fn test_payer_is_owed_the_other_share() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice"]);
    ledger
        .entries
        .push(entry("e1", 100.0, "owner", &[("owner", 50.0), ("alice", 50.0)]));

    let owner_view = compute_ledger_balances(&ledger, "owner");
    assert_eq!(owner_view.owed_to_viewer.len(), 1);
    assert_eq!(owner_view.owed_to_viewer[0].participant_id, "alice");
    assert_eq!(owner_view.owed_to_viewer[0].amount, 50.0);
    assert_eq!(owner_view.owed_to_viewer[0].ledger_breakdown[0].ledger_name, "Ledger l1");
    assert!(owner_view.viewer_owes.is_empty());

    let alice_view = compute_ledger_balances(&ledger, "alice");
    assert!(alice_view.owed_to_viewer.is_empty());
    let owed = alice_view.owed_to("owner").unwrap();
    assert_eq!(owed.amount, 50.0);
    assert_eq!(owed.ledger_breakdown[0].amount, -50.0);
}

#[test]
fn test_finalized_settlement_offsets_debt() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice"]);
    ledger
        .entries
        .push(entry("e1", 100.0, "owner", &[("owner", 50.0), ("alice", 50.0)]));
    ledger
        .settlements
        .push(settlement("alice", "owner", 50.0, SettlementStatus::Finalized));

    assert!(compute_ledger_balances(&ledger, "owner").is_settled());
    assert!(compute_ledger_balances(&ledger, "alice").is_settled());
}

#[test]
fn test_unfinalized_settlements_do_not_count() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice"]);
    ledger
        .entries
        .push(entry("e1", 100.0, "owner", &[("owner", 50.0), ("alice", 50.0)]));
    ledger
        .settlements
        .push(settlement("alice", "owner", 50.0, SettlementStatus::Submitted));
    ledger
        .settlements
        .push(settlement("alice", "owner", 50.0, SettlementStatus::Failed));

    let summary = compute_ledger_balances(&ledger, "owner");
    assert_eq!(summary.owed_by("alice").map(|b| b.amount), Some(50.0));
}

#[test]
fn test_threshold_depends_on_currency() {
    let _ = env_logger::try_init();
    for (currency, expect_listed) in [(Currency::Dot, true), (Currency::Usd, false)] {
        let mut ledger = ledger_with("l1", currency, &["owner", "alice"]);
        ledger
            .entries
            .push(entry("e1", 0.01, "owner", &[("owner", 0.005), ("alice", 0.005)]));

        let summary = compute_ledger_balances(&ledger, "owner");
        assert_eq!(summary.owed_by("alice").is_some(), expect_listed, "{}", currency);
    }

    // Below even the fine-grained threshold.
    let mut ledger = ledger_with("l2", Currency::Dot, &["owner", "alice"]);
    ledger
        .entries
        .push(entry("e1", 0.000001, "owner", &[("owner", 0.0000005), ("alice", 0.0000005)]));
    assert!(compute_ledger_balances(&ledger, "owner").is_settled());
}

#[test]
fn test_results_sort_by_amount_and_keep_ties_in_order() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Eur, &["owner", "bob", "carol", "dave", "erin"]);
    ledger.entries.push(entry(
        "e1",
        100.0,
        "owner",
        &[("bob", 20.0), ("carol", 20.0), ("dave", 40.0), ("erin", 20.0)],
    ));

    let summary = compute_ledger_balances(&ledger, "owner");
    let order: Vec<&str> = summary
        .owed_to_viewer
        .iter()
        .map(|b| b.participant_id.as_str())
        .collect();
    assert_eq!(order, vec!["dave", "bob", "carol", "erin"]);
}

#[test]
fn test_balances_are_deterministic() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Chf, &["owner", "alice", "bob"]);
    ledger
        .entries
        .push(entry("e1", 90.0, "owner", &[("owner", 30.0), ("alice", 30.0), ("bob", 30.0)]));
    ledger.entries.push(entry("e2", 60.0, "bob", &[("owner", 30.0), ("alice", 30.0)]));

    let first = compute_ledger_balances(&ledger, "alice");
    let second = compute_ledger_balances(&ledger, "alice");
    assert_eq!(first, second);
    assert_eq!(first.viewer_owes.len(), 2);
}

#[test]
fn test_unknown_viewer_sees_nothing() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice"]);
    ledger
        .entries
        .push(entry("e1", 100.0, "owner", &[("owner", 50.0), ("alice", 50.0)]));

    assert!(compute_ledger_balances(&ledger, "mallory").is_settled());
}

#[test]
fn test_former_participant_keeps_their_balance() {
    let _ = env_logger::try_init();
    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice"]);
    ledger
        .entries
        .push(entry("e1", 100.0, "owner", &[("owner", 50.0), ("alice", 50.0)]));
    let alice = ledger.participants.remove(1);
    ledger.former_participants.push(alice);

    let summary = compute_ledger_balances(&ledger, "owner");
    assert_eq!(summary.owed_by("alice").map(|b| b.amount), Some(50.0));
}

#[test]
fn test_global_balances_merge_aliases_across_ledgers() {
    let _ = env_logger::try_init();
    let mut trip = ledger_with("trip", Currency::Usd, &["owner", "alice"]);
    trip.entries
        .push(entry("e1", 100.0, "owner", &[("owner", 50.0), ("alice", 50.0)]));

    let mut flat = ledger_with("flat", Currency::Usd, &["alice-f", "owner-f"]);
    flat.entries.push(entry("e2", 30.0, "alice-f", &[("owner-f", 30.0)]));

    let directory = ParticipantDirectory::new()
        .with_alias("alice-f", "alice")
        .with_alias("owner-f", "owner");

    let summary = compute_global_balances(&[trip, flat], &directory, "owner");
    let alice = summary.owed_by("alice").unwrap();
    assert_eq!(alice.amount, 20.0);
    let breakdown: Vec<(&str, f64)> = alice
        .ledger_breakdown
        .iter()
        .map(|b| (b.ledger_id.as_str(), b.amount))
        .collect();
    assert_eq!(breakdown, vec![("trip", 50.0), ("flat", -30.0)]);
    assert!(summary.viewer_owes.is_empty());
}

#[test]
fn test_global_total_that_nets_out_is_settled() {
    let _ = env_logger::try_init();
    let mut a = ledger_with("a", Currency::Usd, &["owner", "alice"]);
    a.entries.push(entry("e1", 40.0, "owner", &[("alice", 40.0)]));
    let mut b = ledger_with("b", Currency::Usd, &["alice", "owner"]);
    b.entries.push(entry("e2", 40.0, "alice", &[("owner", 40.0)]));

    let summary = compute_global_balances(&[a, b], &ParticipantDirectory::new(), "owner");
    assert!(summary.is_settled());
}

#[test]
fn test_global_skips_ledgers_without_the_viewer() {
    let _ = env_logger::try_init();
    let mut other = ledger_with("other", Currency::Usd, &["bob", "carol"]);
    other.entries.push(entry("e1", 10.0, "bob", &[("carol", 10.0)]));

    let summary = compute_global_balances(&[other], &ParticipantDirectory::new(), "owner");
    assert!(summary.is_settled());
}

#[test]
fn test_legacy_confirmations_are_upgraded_on_read() {
    let _ = env_logger::try_init();
    let stored = serde_json::json!({
        "id": "e1",
        "amount": 100.0,
        "payer_id": "owner",
        "date": "2024-06-01",
        "split": [
            { "participant_id": "owner", "amount": 50.0 },
            { "participant_id": "alice", "amount": 50.0 }
        ],
        "confirmations": [
            "alice",
            { "participantId": "owner", "confirmedAt": "2024-06-02T09:00:00Z" },
            { "participant_id": "alice", "confirmed_at": "2024-06-03T09:00:00Z" }
        ]
    });
    let entry: crate::core::models::Entry = serde_json::from_value(stored).unwrap();

    assert_eq!(entry.confirmations.len(), 2);
    assert_eq!(entry.confirmations[0].participant_id, "alice");
    assert!(entry.confirmations[0].confirmed_at.is_some());
    assert!(entry.is_confirmed_by("owner"));

    let mut ledger = ledger_with("l1", Currency::Usd, &["owner", "alice"]);
    ledger.entries.push(entry);
    assert_eq!(
        compute_ledger_balances(&ledger, "owner").owed_by("alice").map(|b| b.amount),
        Some(50.0)
    );
}

#[test]
fn test_bare_id_confirmation_has_no_timestamp() {
    let _ = env_logger::try_init();
    let upgraded = upgrade_confirmations(vec![StoredConfirmation::BareId("bob".to_string())]);
    assert_eq!(
        upgraded,
        vec![EntryConfirmation {
            participant_id: "bob".to_string(),
            confirmed_at: None
        }]
    );
}
