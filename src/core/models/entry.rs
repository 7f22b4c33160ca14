use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use super::currency::Currency;
use crate::core::errors::LedgerError;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SplitShare {
    pub participant_id: String,
    pub amount: f64,
}

impl SplitShare {
    pub fn new(participant_id: impl Into<String>, amount: f64) -> Self {
        SplitShare {
            participant_id: participant_id.into(),
            amount,
        }
    }
}

/// A participant's attestation that an entry is accurate.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryConfirmation {
    #[serde(alias = "participant_id")]
    pub participant_id: String,
    /// `None` when the confirmation predates timestamped records.
    #[serde(alias = "confirmed_at", default)]
    #[schema(value_type = Option<String>)]
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// Confirmation as it may be found in persisted documents: older documents hold bare ids.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StoredConfirmation {
    BareId(String),
    Record(EntryConfirmation),
}

impl StoredConfirmation {
    pub fn upgrade(self) -> EntryConfirmation {
        match self {
            StoredConfirmation::BareId(participant_id) => EntryConfirmation {
                participant_id,
                confirmed_at: None,
            },
            StoredConfirmation::Record(record) => record,
        }
    }
}

/// Upgrades a persisted confirmation list, collapsing duplicate ids. A timestamped
/// record wins over a bare id for the same participant.
pub fn upgrade_confirmations(stored: Vec<StoredConfirmation>) -> Vec<EntryConfirmation> {
    let mut upgraded: Vec<EntryConfirmation> = Vec::with_capacity(stored.len());
    for confirmation in stored.into_iter().map(StoredConfirmation::upgrade) {
        match upgraded
            .iter_mut()
            .find(|c| c.participant_id == confirmation.participant_id)
        {
            Some(existing) => {
                if existing.confirmed_at.is_none() {
                    existing.confirmed_at = confirmation.confirmed_at;
                }
            }
            None => upgraded.push(confirmation),
        }
    }
    upgraded
}

fn deserialize_confirmations<'de, D>(deserializer: D) -> Result<Vec<EntryConfirmation>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Vec::<StoredConfirmation>::deserialize(deserializer)?;
    Ok(upgrade_confirmations(stored))
}

/// An expense recorded in a ledger.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Entry {
    pub id: String,
    pub amount: f64,
    pub payer_id: String,
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: NaiveDate,
    /// Free text. Never leaves the ledger in a snapshot.
    #[serde(default)]
    pub memo: Option<String>,
    pub split: Vec<SplitShare>,
    #[serde(default, deserialize_with = "deserialize_confirmations")]
    pub confirmations: Vec<EntryConfirmation>,
}

impl Entry {
    pub fn share_of(&self, participant_id: &str) -> f64 {
        self.split
            .iter()
            .find(|s| s.participant_id == participant_id)
            .map(|s| s.amount)
            .unwrap_or(0.0)
    }

    pub fn is_confirmed_by(&self, participant_id: &str) -> bool {
        self.confirmations
            .iter()
            .any(|c| c.participant_id == participant_id)
    }

    pub fn referenced_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.payer_id.as_str()).chain(self.split.iter().map(|s| s.participant_id.as_str()))
    }

    /// Checks that the split is well formed for the given currency: positive amount,
    /// no repeated participant, no negative share, and shares summing to the amount.
    pub fn validate_split(&self, currency: Currency) -> Result<(), LedgerError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(LedgerError::malformed_split(&self.id, "amount must be positive"));
        }
        if self.split.is_empty() {
            return Err(LedgerError::malformed_split(&self.id, "split is empty"));
        }

        let mut seen = HashSet::new();
        for share in &self.split {
            if !seen.insert(share.participant_id.as_str()) {
                return Err(LedgerError::malformed_split(
                    &self.id,
                    format!("participant {} appears more than once", share.participant_id),
                ));
            }
            if !share.amount.is_finite() || share.amount < 0.0 {
                return Err(LedgerError::malformed_split(
                    &self.id,
                    format!("share of {} must not be negative", share.participant_id),
                ));
            }
        }

        let total: f64 = self.split.iter().map(|s| s.amount).sum();
        if currency.is_negligible(total - self.amount) {
            Ok(())
        } else {
            Err(LedgerError::malformed_split(
                &self.id,
                format!("shares sum to {} but amount is {}", total, self.amount),
            ))
        }
    }
}
