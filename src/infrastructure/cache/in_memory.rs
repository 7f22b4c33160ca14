use crate::core::balance::BalanceSummary;
use crate::core::errors::LedgerError;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::cache::cache_keys::{ledger_balances_key, ledger_balances_prefix};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, (BalanceSummary, DateTime<Utc>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_ledger_balances(&self, ledger_id: &str, viewer_id: &str) -> Result<Option<BalanceSummary>, LedgerError> {
        let cache = self.cache.read().await;
        let key = ledger_balances_key(ledger_id, viewer_id);
        Ok(cache
            .get(&key)
            .filter(|(_, expiry)| *expiry > Utc::now())
            .map(|(balances, _)| balances.clone()))
    }

    async fn save_ledger_balances(
        &self,
        ledger_id: &str,
        viewer_id: &str,
        balances: &BalanceSummary,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| LedgerError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        let mut cache = self.cache.write().await;
        cache.insert(
            ledger_balances_key(ledger_id, viewer_id),
            (balances.clone(), Utc::now() + ttl),
        );
        Ok(())
    }

    async fn invalidate_ledger(&self, ledger_id: &str) -> Result<(), LedgerError> {
        let prefix = ledger_balances_prefix(ledger_id);
        let now = Utc::now();
        let mut cache = self.cache.write().await;
        cache.retain(|key, (_, expiry)| !key.starts_with(&prefix) && *expiry > now);
        Ok(())
    }
}
