//! Privacy-filtered projection of a ledger, its commitment hash, and the anchor message
//! built from it.

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use crate::core::anchor::AnchorMessage;
use crate::core::canonical::canonical_json;
use crate::core::constants::{DEFAULT_APP_ID, SNAPSHOT_SCHEMA_VERSION};
use crate::core::errors::{FieldError, LedgerError};
use crate::core::models::{Currency, Ledger, SplitShare};
use crate::core::privacy;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotMode {
    #[default]
    Casual,
    Auditable,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyCheck {
    #[default]
    Enforce,
    /// For hashes shown locally and never anchored.
    SkipForLocalDisplay,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SnapshotOptions {
    pub backup_locator: Option<String>,
    #[serde(default)]
    pub mode: SnapshotMode,
    #[serde(default)]
    pub privacy: PrivacyCheck,
    #[serde(default = "default_app_id")]
    pub app_id: String,
}

fn default_app_id() -> String {
    DEFAULT_APP_ID.to_string()
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        SnapshotOptions {
            backup_locator: None,
            mode: SnapshotMode::Casual,
            privacy: PrivacyCheck::Enforce,
            app_id: default_app_id(),
        }
    }
}

impl SnapshotOptions {
    pub fn casual() -> Self {
        Self::default()
    }

    pub fn auditable(backup_locator: Option<String>) -> Self {
        SnapshotOptions {
            backup_locator,
            mode: SnapshotMode::Auditable,
            ..Self::default()
        }
    }

    pub fn with_backup_locator(mut self, locator: impl Into<String>) -> Self {
        self.backup_locator = Some(locator.into());
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    pub fn local_display_only(mut self) -> Self {
        self.privacy = PrivacyCheck::SkipForLocalDisplay;
        self
    }

    fn effective_locator(&self) -> Result<Option<String>, LedgerError> {
        match self.mode {
            SnapshotMode::Auditable => normalize_locator(self.backup_locator.as_deref()),
            SnapshotMode::Casual => Ok(None),
        }
    }
}

/// Trims a backup locator. Blank becomes `None`; inner whitespace is refused because
/// the anchor message is whitespace-delimited.
pub fn normalize_locator(locator: Option<&str>) -> Result<Option<String>, LedgerError> {
    let Some(locator) = locator.map(str::trim).filter(|l| !l.is_empty()) else {
        return Ok(None);
    };
    if locator.contains(char::is_whitespace) {
        return Err(LedgerError::InvalidInput(
            "locator".to_string(),
            FieldError {
                field: "locator".to_string(),
                title: "Invalid locator".to_string(),
                description: "locator cannot contain whitespace".to_string(),
            },
        ));
    }
    Ok(Some(locator.to_string()))
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SnapshotParticipant {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SnapshotEntry {
    pub id: String,
    pub amount: f64,
    pub payer_id: String,
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: NaiveDate,
    pub split: Vec<SplitShare>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Snapshot {
    pub id: String,
    pub name: String,
    pub currency: Currency,
    pub participants: Vec<SnapshotParticipant>,
    pub entries: Vec<SnapshotEntry>,
    pub locator: Option<String>,
}

impl Snapshot {
    // Participants sorted by id, entries by (date, id), splits by participant id.
    pub fn project(ledger: &Ledger, locator: Option<String>) -> Self {
        let mut participants: Vec<SnapshotParticipant> = ledger
            .participants
            .iter()
            .map(|p| SnapshotParticipant {
                id: p.id.clone(),
                name: p.name.clone(),
                address: p.address.clone(),
            })
            .collect();
        participants.sort_by(|a, b| a.id.cmp(&b.id));

        let mut entries: Vec<SnapshotEntry> = ledger
            .entries
            .iter()
            .map(|e| {
                let mut split = e.split.clone();
                split.sort_by(|a, b| a.participant_id.cmp(&b.participant_id));
                SnapshotEntry {
                    id: e.id.clone(),
                    amount: e.amount,
                    payer_id: e.payer_id.clone(),
                    date: e.date,
                    split,
                }
            })
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        Snapshot {
            id: ledger.id.clone(),
            name: ledger.name.clone(),
            currency: ledger.currency,
            participants,
            entries,
            locator,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CheckpointSnapshot {
    pub snapshot: Snapshot,
    pub canonical_form: String,
    pub commitment_hash: String,
    pub anchor_message: String,
}

pub fn commitment_hash(canonical_form: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_form.as_bytes());
    hex::encode(hasher.finalize())
}

/// Builds the snapshot, its commitment and the anchor message. Fails with
/// `PrivacyViolation` when the canonical form looks like it carries personal data,
/// unless the caller opted out for a local-only hash.
pub fn build_checkpoint_snapshot(
    ledger: &Ledger,
    options: &SnapshotOptions,
) -> Result<CheckpointSnapshot, LedgerError> {
    let locator = options.effective_locator()?;
    let snapshot = Snapshot::project(ledger, locator.clone());
    let canonical_form = canonical_json(&snapshot);

    if options.privacy == PrivacyCheck::Enforce {
        if let Some(category) = privacy::scan(&canonical_form) {
            warn!("Snapshot of ledger {} refused: possible {}", ledger.id, category);
            return Err(LedgerError::PrivacyViolation(category));
        }
    }

    let commitment_hash = commitment_hash(&canonical_form);
    let anchor_message = AnchorMessage {
        app_id: options.app_id.clone(),
        schema_version: SNAPSHOT_SCHEMA_VERSION,
        commitment_hash: commitment_hash.clone(),
        locator,
    }
    .to_string();
    debug!("Snapshot of ledger {} committed as {}", ledger.id, commitment_hash);

    Ok(CheckpointSnapshot {
        snapshot,
        canonical_form,
        commitment_hash,
        anchor_message,
    })
}

pub fn verify_anchor(ledger: &Ledger, message: &str) -> Result<bool, LedgerError> {
    let anchor = AnchorMessage::parse(message)?;
    let options = SnapshotOptions {
        backup_locator: anchor.locator.clone(),
        mode: if anchor.locator.is_some() {
            SnapshotMode::Auditable
        } else {
            SnapshotMode::Casual
        },
        privacy: PrivacyCheck::SkipForLocalDisplay,
        app_id: anchor.app_id.clone(),
    };
    let rebuilt = build_checkpoint_snapshot(ledger, &options)?;
    Ok(rebuilt.commitment_hash == anchor.commitment_hash)
}
