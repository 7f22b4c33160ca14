use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::checkpoint::{Checkpoint, CheckpointStatus};
use super::currency::Currency;
use super::entry::Entry;
use super::participant::Participant;
use super::settlement::SettlementRecord;
use crate::core::errors::LedgerError;

/// A pot: one independent set of participants, expenses and settlements.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Ledger {
    pub id: String,
    pub name: String,
    pub currency: Currency,
    pub participants: Vec<Participant>,
    /// Removed participants, kept so old entries still resolve.
    #[serde(default)]
    pub former_participants: Vec<Participant>,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub settlements: Vec<SettlementRecord>,
    #[serde(default)]
    pub checkpoint: Option<Checkpoint>,
    #[serde(default)]
    pub last_backup_locator: Option<String>,
}

impl Ledger {
    pub fn new(id: impl Into<String>, name: impl Into<String>, currency: Currency) -> Self {
        Ledger {
            id: id.into(),
            name: name.into(),
            currency,
            participants: Vec::new(),
            former_participants: Vec::new(),
            entries: Vec::new(),
            settlements: Vec::new(),
            checkpoint: None,
            last_backup_locator: None,
        }
    }

    pub fn participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    pub fn is_participant(&self, participant_id: &str) -> bool {
        self.participant(participant_id).is_some()
    }

    /// Current or former participant.
    pub fn knows_participant(&self, participant_id: &str) -> bool {
        self.is_participant(participant_id) || self.former_participants.iter().any(|p| p.id == participant_id)
    }

    pub fn owner(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_owner())
    }

    pub fn require_participant(&self, participant_id: &str) -> Result<&Participant, LedgerError> {
        self.participant(participant_id)
            .ok_or_else(|| LedgerError::NotAParticipant(participant_id.to_string()))
    }

    pub fn require_owner(&self, participant_id: &str) -> Result<&Participant, LedgerError> {
        let participant = self.require_participant(participant_id)?;
        if !participant.is_owner() {
            return Err(LedgerError::NotLedgerOwner(participant_id.to_string()));
        }
        Ok(participant)
    }

    pub fn entry(&self, entry_id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    pub fn entry_mut(&mut self, entry_id: &str) -> Result<&mut Entry, LedgerError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| LedgerError::NotFound(format!("Entry {}", entry_id)))
    }

    pub fn settlement_mut(&mut self, settlement_id: &str) -> Result<&mut SettlementRecord, LedgerError> {
        self.settlements
            .iter_mut()
            .find(|s| s.id == settlement_id)
            .ok_or_else(|| LedgerError::NotFound(format!("Settlement {}", settlement_id)))
    }

    /// Gate for new entries: the split must be well formed and everyone it names must
    /// currently belong to the ledger.
    pub fn validate_entry(&self, entry: &Entry) -> Result<(), LedgerError> {
        entry.validate_split(self.currency)?;
        for id in entry.referenced_ids() {
            self.require_participant(id)?;
        }
        Ok(())
    }

    pub fn pending_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoint.as_ref().filter(|c| c.status == CheckpointStatus::Pending)
    }

    /// Settlement is blocked only while a checkpoint is waiting for confirmations.
    pub fn settlement_allowed(&self) -> bool {
        self.pending_checkpoint().is_none()
    }
}
