use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointStatus {
    Pending,
    Confirmed,
    Bypassed,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ParticipantConfirmation {
    pub confirmed: bool,
    #[schema(value_type = Option<String>)]
    pub confirmed_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Checkpoint {
    pub id: String,
    pub created_by: String,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    pub status: CheckpointStatus,
    /// Keyed by participant id. Entries for participants removed after creation stay
    /// in the map but no longer count toward completion.
    pub confirmations: BTreeMap<String, ParticipantConfirmation>,
    #[schema(value_type = String, example = "2024-06-03T12:34:56Z")]
    pub expires_at: DateTime<Utc>,
    pub bypassed_by: Option<String>,
    #[schema(value_type = Option<String>)]
    pub bypassed_at: Option<DateTime<Utc>>,
}

impl Checkpoint {
    pub fn is_pending(&self) -> bool {
        self.status == CheckpointStatus::Pending
    }

    pub fn has_confirmed(&self, participant_id: &str) -> bool {
        self.confirmations
            .get(participant_id)
            .map(|c| c.confirmed)
            .unwrap_or(false)
    }

    /// Advisory only; the checkpoint never changes state on its own.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.is_pending() && now > self.expires_at
    }
}
