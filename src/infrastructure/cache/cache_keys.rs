pub fn ledger_balances_key(ledger_id: &str, viewer_id: &str) -> String {
    format!("{}{}", ledger_balances_prefix(ledger_id), viewer_id)
}

pub fn ledger_balances_prefix(ledger_id: &str) -> String {
    format!("ledger_balances:{}:", ledger_id)
}
