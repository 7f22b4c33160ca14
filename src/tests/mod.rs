mod api_tests;
mod balance_tests;
mod checkpoint_tests;
mod privacy_tests;

use chrono::NaiveDate;

use crate::config::Config;
use crate::core::models::{Currency, Entry, Ledger, Participant, Role, SplitShare};
use crate::core::services::LedgerService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache> {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    LedgerService::new(storage, logging, cache, &Config::default())
}

/// Ledger whose first id is the owner and the rest members.
pub fn ledger_with(id: &str, currency: Currency, participant_ids: &[&str]) -> Ledger {
    let mut ledger = Ledger::new(id, format!("Ledger {}", id), currency);
    for (i, pid) in participant_ids.iter().enumerate() {
        let role = if i == 0 { Role::Owner } else { Role::Member };
        ledger.participants.push(Participant::new(*pid, capitalize(pid), role));
    }
    ledger
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

pub fn entry(id: &str, amount: f64, payer_id: &str, split: &[(&str, f64)]) -> Entry {
    Entry {
        id: id.to_string(),
        amount,
        payer_id: payer_id.to_string(),
        date: date(1),
        memo: None,
        split: split.iter().map(|(pid, amt)| SplitShare::new(*pid, *amt)).collect(),
        confirmations: Vec::new(),
    }
}
