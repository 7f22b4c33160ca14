pub mod cache_keys;
pub mod in_memory;

use crate::core::balance::BalanceSummary;
use crate::core::errors::LedgerError;
use async_trait::async_trait;

/// Memoizes balance computations. Balances are pure functions of ledger state, so a
/// ledger's entries are dropped whenever that ledger changes.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_ledger_balances(&self, ledger_id: &str, viewer_id: &str) -> Result<Option<BalanceSummary>, LedgerError>;
    async fn save_ledger_balances(
        &self,
        ledger_id: &str,
        viewer_id: &str,
        balances: &BalanceSummary,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError>;
    async fn invalidate_ledger(&self, ledger_id: &str) -> Result<(), LedgerError>;
}
