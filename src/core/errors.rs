use serde::Serialize;
use thiserror::Error;

use crate::core::privacy::PrivacyCategory;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum LedgerError {
    /// Operation is not allowed in the current checkpoint/settlement state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Referenced ledger, checkpoint, entry or settlement does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Id is not a current member of the ledger
    #[error("{0} is not a participant of this ledger")]
    NotAParticipant(String),

    /// Disallowed pattern found while building a snapshot. Only the category is reported.
    #[error("Snapshot refused: possible {0} in ledger data")]
    PrivacyViolation(PrivacyCategory),

    /// Entry split does not add up to the entry amount
    #[error("Malformed split for entry {entry_id}: {reason}")]
    MalformedSplit { entry_id: String, reason: String },

    #[error("Cannot create settlement to self")]
    SelfSettlement,

    #[error("Invalid settlement amount")]
    InvalidSettlementAmount,

    #[error("Only the ledger owner may do this ({0})")]
    NotLedgerOwner(String),

    #[error("Participant {0} is already in the ledger")]
    AlreadyParticipant(String),

    #[error("Owner cannot remove themselves")]
    OwnerCannotRemoveSelf,

    #[error("Invalid anchor message: {0}")]
    MalformedAnchor(String),

    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

impl LedgerError {
    pub(crate) fn malformed_split(entry_id: &str, reason: impl Into<String>) -> Self {
        LedgerError::MalformedSplit {
            entry_id: entry_id.to_string(),
            reason: reason.into(),
        }
    }
}
