//! Net pairwise balances between a viewer and everyone they share a ledger with.
//!
//! Everything here is a pure function of the ledger values passed in. Callers that want
//! memoization put a cache in front (see `infrastructure::cache`).

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::core::models::Ledger;

/// One ledger's contribution to a pairwise balance. `amount` is signed from the
/// viewer's side: positive when the counterparty owes the viewer.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LedgerBreakdown {
    pub ledger_id: String,
    pub ledger_name: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PairwiseBalance {
    pub participant_id: String,
    /// Always non-negative; direction is given by the list the balance sits in.
    pub amount: f64,
    pub ledger_breakdown: Vec<LedgerBreakdown>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BalanceSummary {
    pub owed_to_viewer: Vec<PairwiseBalance>,
    pub viewer_owes: Vec<PairwiseBalance>,
}

impl BalanceSummary {
    pub fn is_settled(&self) -> bool {
        self.owed_to_viewer.is_empty() && self.viewer_owes.is_empty()
    }

    pub fn owed_by(&self, participant_id: &str) -> Option<&PairwiseBalance> {
        self.owed_to_viewer.iter().find(|b| b.participant_id == participant_id)
    }

    pub fn owed_to(&self, participant_id: &str) -> Option<&PairwiseBalance> {
        self.viewer_owes.iter().find(|b| b.participant_id == participant_id)
    }

    fn push(&mut self, participant_id: String, signed: f64, ledger_breakdown: Vec<LedgerBreakdown>) {
        let balance = PairwiseBalance {
            participant_id,
            amount: signed.abs(),
            ledger_breakdown,
        };
        if signed > 0.0 {
            self.owed_to_viewer.push(balance);
        } else {
            self.viewer_owes.push(balance);
        }
    }

    // Stable sort: equal amounts keep encounter order.
    fn sort(&mut self) {
        self.owed_to_viewer.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        self.viewer_owes.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    }
}

/// Maps ledger-local participant ids onto the person they stand for, so the same
/// counterparty is recognised across ledgers. Unknown ids resolve to themselves.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ParticipantDirectory {
    aliases: HashMap<String, String>,
}

impl ParticipantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias(mut self, local_id: impl Into<String>, person_id: impl Into<String>) -> Self {
        self.insert(local_id, person_id);
        self
    }

    pub fn insert(&mut self, local_id: impl Into<String>, person_id: impl Into<String>) {
        self.aliases.insert(local_id.into(), person_id.into());
    }

    pub fn resolve<'a>(&'a self, local_id: &'a str) -> &'a str {
        self.aliases.get(local_id).map(String::as_str).unwrap_or(local_id)
    }
}

/// Signed balance against every other current or former participant, in ledger order.
/// Positive: they owe the viewer.
fn signed_balances(ledger: &Ledger, viewer_id: &str) -> Vec<(String, f64)> {
    let counterparties = ledger
        .participants
        .iter()
        .chain(ledger.former_participants.iter())
        .filter(|p| p.id != viewer_id);

    let mut balances = Vec::new();
    for participant in counterparties {
        let pid = participant.id.as_str();

        let their_share: f64 = ledger
            .entries
            .iter()
            .filter(|e| e.payer_id == viewer_id)
            .map(|e| e.share_of(pid))
            .sum();
        let viewer_share: f64 = ledger
            .entries
            .iter()
            .filter(|e| e.payer_id == pid)
            .map(|e| e.share_of(viewer_id))
            .sum();
        let mut balance = their_share - viewer_share;

        for settlement in ledger
            .settlements
            .iter()
            .filter(|s| s.counts_toward_balance() && s.is_between(viewer_id, pid))
        {
            if settlement.from_id == viewer_id {
                balance += settlement.amount;
            } else {
                balance -= settlement.amount;
            }
        }

        balances.push((participant.id.clone(), balance));
    }
    balances
}

/// Pairwise balances between `viewer_id` and every other participant of one ledger.
/// A viewer who is not in the ledger sees nothing.
pub fn compute_ledger_balances(ledger: &Ledger, viewer_id: &str) -> BalanceSummary {
    let mut summary = BalanceSummary::default();
    if !ledger.knows_participant(viewer_id) {
        debug!("Viewer {} is not part of ledger {}", viewer_id, ledger.id);
        return summary;
    }

    for (participant_id, balance) in signed_balances(ledger, viewer_id) {
        if ledger.currency.is_negligible(balance) {
            continue;
        }
        let breakdown = vec![LedgerBreakdown {
            ledger_id: ledger.id.clone(),
            ledger_name: ledger.name.clone(),
            amount: balance,
        }];
        summary.push(participant_id, balance, breakdown);
    }

    summary.sort();
    debug!(
        "Ledger {} balances for {}: {} owed to viewer, {} owed by viewer",
        ledger.id,
        viewer_id,
        summary.owed_to_viewer.len(),
        summary.viewer_owes.len()
    );
    summary
}

struct Accumulated {
    person_id: String,
    total: f64,
    // Coarsest threshold among contributing currencies decides whether the total settles.
    threshold: f64,
    breakdown: Vec<LedgerBreakdown>,
}

/// Balances between `viewer_id` and every counterparty across all ledgers the viewer
/// belongs to. Participant ids are resolved through `directory` before summing.
///
/// Amounts are summed as plain numbers without currency conversion, so a DOT ledger and
/// a USD ledger add into one `total`. Callers needing per-currency figures read
/// `ledger_breakdown`, whose entries keep each ledger's own signed amount.
pub fn compute_global_balances(
    ledgers: &[Ledger],
    directory: &ParticipantDirectory,
    viewer_id: &str,
) -> BalanceSummary {
    let mut accumulated: Vec<Accumulated> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for ledger in ledgers {
        let Some(viewer_local) = ledger
            .participants
            .iter()
            .chain(ledger.former_participants.iter())
            .find(|p| directory.resolve(&p.id) == viewer_id)
        else {
            continue;
        };

        for (participant_id, balance) in signed_balances(ledger, &viewer_local.id) {
            let person_id = directory.resolve(&participant_id);
            if person_id == viewer_id || ledger.currency.is_negligible(balance) {
                continue;
            }

            let slot = match index.get(person_id) {
                Some(&i) => i,
                None => {
                    index.insert(person_id.to_string(), accumulated.len());
                    accumulated.push(Accumulated {
                        person_id: person_id.to_string(),
                        total: 0.0,
                        threshold: 0.0,
                        breakdown: Vec::new(),
                    });
                    accumulated.len() - 1
                }
            };
            let acc = &mut accumulated[slot];
            acc.total += balance;
            acc.threshold = acc.threshold.max(ledger.currency.negligible_threshold());
            acc.breakdown.push(LedgerBreakdown {
                ledger_id: ledger.id.clone(),
                ledger_name: ledger.name.clone(),
                amount: balance,
            });
        }
    }

    let mut summary = BalanceSummary::default();
    for acc in accumulated {
        if acc.total.abs() < acc.threshold {
            continue;
        }
        summary.push(acc.person_id, acc.total, acc.breakdown);
    }
    summary.sort();
    debug!(
        "Global balances for {} over {} ledgers computed",
        viewer_id,
        ledgers.len()
    );
    summary
}
