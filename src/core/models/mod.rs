pub mod audit;
pub mod checkpoint;
pub mod currency;
pub mod entry;
pub mod ledger;
pub mod participant;
pub mod settlement;

pub use checkpoint::{Checkpoint, CheckpointStatus, ParticipantConfirmation};
pub use currency::Currency;
pub use entry::{Entry, EntryConfirmation, SplitShare, StoredConfirmation};
pub use ledger::Ledger;
pub use participant::{Participant, ParticipantStatus, Role};
pub use settlement::{SettlementMethod, SettlementRecord, SettlementStatus};
