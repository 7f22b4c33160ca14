use crate::core::errors::LedgerError;
use crate::core::models::{Ledger, audit::LedgerAudit};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    ledgers: Arc<RwLock<HashMap<String, Ledger>>>,
    creation_order: Arc<RwLock<Vec<String>>>,
    ledger_audits: Arc<RwLock<HashMap<String, Vec<LedgerAudit>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_ledger(&self, ledger: Ledger) -> Result<(), LedgerError> {
        let mut ledgers = self.ledgers.write().await;
        if !ledgers.contains_key(&ledger.id) {
            self.creation_order.write().await.push(ledger.id.clone());
        }
        ledgers.insert(ledger.id.clone(), ledger);
        Ok(())
    }

    async fn get_ledger(&self, ledger_id: &str) -> Result<Option<Ledger>, LedgerError> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers.get(ledger_id).cloned())
    }

    async fn list_ledgers(&self) -> Result<Vec<Ledger>, LedgerError> {
        let ledgers = self.ledgers.read().await;
        let order = self.creation_order.read().await;
        Ok(order.iter().filter_map(|id| ledgers.get(id).cloned()).collect())
    }

    async fn save_ledger_audit(&self, audit: LedgerAudit) -> Result<(), LedgerError> {
        let mut ledger_audits = self.ledger_audits.write().await;
        ledger_audits
            .entry(audit.ledger_id.clone())
            .or_insert_with(Vec::new)
            .push(audit);
        Ok(())
    }

    async fn get_ledger_audits(&self, ledger_id: &str) -> Result<Vec<LedgerAudit>, LedgerError> {
        let ledger_audits = self.ledger_audits.read().await;
        Ok(ledger_audits.get(ledger_id).cloned().unwrap_or_default())
    }
}
