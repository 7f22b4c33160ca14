use crate::core::errors::LedgerError;
use crate::core::models::{Ledger, audit::LedgerAudit};
use async_trait::async_trait;

/// Document-store boundary. Implementations hand out already-merged ledger values.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_ledger(&self, ledger: Ledger) -> Result<(), LedgerError>;
    async fn get_ledger(&self, ledger_id: &str) -> Result<Option<Ledger>, LedgerError>;
    /// All ledgers in creation order.
    async fn list_ledgers(&self) -> Result<Vec<Ledger>, LedgerError>;
    async fn save_ledger_audit(&self, audit: LedgerAudit) -> Result<(), LedgerError>;
    async fn get_ledger_audits(&self, ledger_id: &str) -> Result<Vec<LedgerAudit>, LedgerError>;
}

pub mod in_memory;
