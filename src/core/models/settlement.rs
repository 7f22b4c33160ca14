use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::Currency;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMethod {
    Cash,
    Bank,
    Other,
    OnChain,
}

impl SettlementMethod {
    pub fn is_on_chain(self) -> bool {
        self == SettlementMethod::OnChain
    }
}

/// Lifecycle reported by the chain-submission service. Off-chain settlements are
/// recorded directly as `Finalized`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    Submitted,
    InBlock,
    Finalized,
    Failed,
}

impl SettlementStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SettlementStatus::Finalized | SettlementStatus::Failed)
    }

    /// Forward-only: submitted -> in_block -> finalized, any open state -> failed.
    pub fn can_transition_to(self, next: SettlementStatus) -> bool {
        match (self, next) {
            (SettlementStatus::Submitted, SettlementStatus::InBlock)
            | (SettlementStatus::Submitted, SettlementStatus::Finalized)
            | (SettlementStatus::InBlock, SettlementStatus::Finalized) => true,
            (from, SettlementStatus::Failed) => !from.is_terminal(),
            _ => false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SettlementRecord {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub amount: f64,
    pub currency: Currency,
    pub method: SettlementMethod,
    /// Transaction hash or bank reference, when known.
    pub tx_ref: Option<String>,
    pub block_ref: Option<String>,
    pub status: SettlementStatus,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl SettlementRecord {
    /// Only finalized settlements move balances.
    pub fn counts_toward_balance(&self) -> bool {
        self.status == SettlementStatus::Finalized
    }

    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.from_id == a && self.to_id == b) || (self.from_id == b && self.to_id == a)
    }
}
