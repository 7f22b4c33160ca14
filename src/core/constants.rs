// Anchor wire format
pub const DEFAULT_APP_ID: &str = "potledger";
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;
pub const LOCATOR_FIELD: &str = "locator:";

pub const CHECKPOINT_TTL_HOURS: i64 = 48;

// Audit actions
pub const LEDGER_CREATED: &str = "LEDGER_CREATED";
pub const PARTICIPANT_ADDED: &str = "PARTICIPANT_ADDED";
pub const PARTICIPANT_UPDATED: &str = "PARTICIPANT_UPDATED";
pub const PARTICIPANT_REMOVED: &str = "PARTICIPANT_REMOVED";
pub const ENTRY_ADDED: &str = "ENTRY_ADDED";
pub const ENTRY_EDITED: &str = "ENTRY_EDITED";
pub const ENTRY_DELETED: &str = "ENTRY_DELETED";
pub const ENTRY_CONFIRMED: &str = "ENTRY_CONFIRMED";
pub const SETTLEMENT_RECORDED: &str = "SETTLEMENT_RECORDED";
pub const SETTLEMENT_STATUS_CHANGED: &str = "SETTLEMENT_STATUS_CHANGED";
pub const CHECKPOINT_CREATED: &str = "CHECKPOINT_CREATED";
pub const CHECKPOINT_CONFIRMED: &str = "CHECKPOINT_CONFIRMED";
pub const CHECKPOINT_BYPASSED: &str = "CHECKPOINT_BYPASSED";
pub const BACKUP_LOCATOR_SET: &str = "BACKUP_LOCATOR_SET";
pub const SNAPSHOT_BUILT: &str = "SNAPSHOT_BUILT";
pub const BALANCE_QUERIED: &str = "BALANCE_QUERIED";

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_MEMO_LENGTH: usize = 255;
