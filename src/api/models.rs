use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::core::errors::LedgerError;
use crate::core::models::{Currency, ParticipantStatus, SettlementMethod, SettlementStatus, SplitShare};
use crate::core::services::{NewEntry, NewSettlement, ParticipantUpdate};
use crate::core::snapshot::{PrivacyCheck, SnapshotMode, SnapshotOptions};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateLedgerRequest {
    pub name: String,
    pub currency: Currency,
    pub owner_id: String,
    pub owner_name: String,
    pub owner_address: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AddParticipantRequest {
    pub participant_id: String,
    pub name: String,
    pub address: Option<String>,
    pub added_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateParticipantRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub status: Option<ParticipantStatus>,
    pub updated_by_id: String,
}

impl UpdateParticipantRequest {
    pub fn into_update(self) -> (ParticipantUpdate, String) {
        (
            ParticipantUpdate {
                name: self.name,
                address: self.address,
                status: self.status,
            },
            self.updated_by_id,
        )
    }
}

#[derive(Deserialize, ToSchema)]
pub struct RemoveParticipantRequest {
    pub participant_id: String,
    pub removed_by_id: String,
}

/// Body for adding and editing entries.
#[derive(Deserialize, ToSchema)]
pub struct EntryRequest {
    pub amount: f64,
    pub payer_id: String,
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: NaiveDate,
    pub memo: Option<String>,
    pub split: Vec<SplitShare>,
    pub actor_id: String,
}

impl EntryRequest {
    pub fn into_entry(self) -> (NewEntry, String) {
        (
            NewEntry {
                amount: self.amount,
                payer_id: self.payer_id,
                date: self.date,
                memo: self.memo,
                split: self.split,
            },
            self.actor_id,
        )
    }
}

/// Body for actions that only need to know who performs them.
#[derive(Deserialize, ToSchema)]
pub struct ActorRequest {
    pub actor_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RecordSettlementRequest {
    pub from_id: String,
    pub to_id: String,
    pub amount: f64,
    pub method: SettlementMethod,
    pub tx_ref: Option<String>,
    pub recorded_by_id: String,
}

impl RecordSettlementRequest {
    pub fn into_settlement(self) -> (NewSettlement, String) {
        (
            NewSettlement {
                from_id: self.from_id,
                to_id: self.to_id,
                amount: self.amount,
                method: self.method,
                tx_ref: self.tx_ref,
            },
            self.recorded_by_id,
        )
    }
}

#[derive(Deserialize, ToSchema)]
pub struct SettlementStatusRequest {
    pub status: SettlementStatus,
    pub tx_ref: Option<String>,
    pub block_ref: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct GlobalBalancesRequest {
    pub viewer_id: String,
    /// Ledger-local participant id to person id.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

#[derive(Deserialize, ToSchema)]
pub struct BackupLocatorRequest {
    pub locator: Option<String>,
    pub set_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SnapshotRequest {
    #[serde(default)]
    pub mode: SnapshotMode,
    pub backup_locator: Option<String>,
    #[serde(default)]
    pub local_display_only: bool,
    pub requested_by_id: String,
}

impl SnapshotRequest {
    pub fn into_options(self) -> (SnapshotOptions, String) {
        (
            SnapshotOptions {
                backup_locator: self.backup_locator,
                mode: self.mode,
                privacy: if self.local_display_only {
                    PrivacyCheck::SkipForLocalDisplay
                } else {
                    PrivacyCheck::Enforce
                },
                ..SnapshotOptions::default()
            },
            self.requested_by_id,
        )
    }
}

#[derive(Deserialize, ToSchema)]
pub struct VerifyAnchorRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct VerifyAnchorResponse {
    pub matches: bool,
}

// Error response struct
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::InvalidState(_) | LedgerError::AlreadyParticipant(_) => StatusCode::CONFLICT,
            LedgerError::NotAParticipant(_) | LedgerError::NotLedgerOwner(_) | LedgerError::OwnerCannotRemoveSelf => {
                StatusCode::FORBIDDEN
            }
            LedgerError::PrivacyViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::MalformedSplit { .. }
            | LedgerError::SelfSettlement
            | LedgerError::InvalidSettlementAmount
            | LedgerError::MalformedAnchor(_) => StatusCode::BAD_REQUEST,
            LedgerError::StorageError(_) | LedgerError::LoggingError(_) | LedgerError::CacheError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            LedgerError::InvalidInput(..) => StatusCode::BAD_REQUEST,
        };
        let error_message = match self.0 {
            LedgerError::InvalidInput(field, detail) => {
                format!("Invalid input for {}: {}", field, detail.description)
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
