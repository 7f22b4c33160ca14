use utoipa::OpenApi;

use crate::{
    api::models::{
        ActorRequest, AddParticipantRequest, BackupLocatorRequest, CreateLedgerRequest, EntryRequest, ErrorResponse,
        GlobalBalancesRequest, RecordSettlementRequest, RemoveParticipantRequest, SettlementStatusRequest,
        SnapshotRequest, UpdateParticipantRequest, VerifyAnchorRequest, VerifyAnchorResponse,
    },
    core::{
        balance::{BalanceSummary, LedgerBreakdown, PairwiseBalance},
        checkpoint::CheckpointState,
        models::{
            Checkpoint, CheckpointStatus, Currency, Entry, EntryConfirmation, Ledger, Participant,
            ParticipantConfirmation, ParticipantStatus, Role, SettlementMethod, SettlementRecord, SettlementStatus,
            SplitShare,
            audit::{AppLog, LedgerAudit},
        },
        snapshot::{CheckpointSnapshot, Snapshot, SnapshotEntry, SnapshotMode, SnapshotParticipant},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_ledger,
        super::handlers::get_ledger,
        super::handlers::add_participant,
        super::handlers::update_participant,
        super::handlers::remove_participant,
        super::handlers::add_entry,
        super::handlers::edit_entry,
        super::handlers::delete_entry,
        super::handlers::confirm_entry,
        super::handlers::record_settlement,
        super::handlers::update_settlement_status,
        super::handlers::create_checkpoint,
        super::handlers::checkpoint_status,
        super::handlers::confirm_checkpoint,
        super::handlers::bypass_checkpoint,
        super::handlers::ledger_balances,
        super::handlers::global_balances,
        super::handlers::set_backup_locator,
        super::handlers::build_snapshot,
        super::handlers::verify_anchor,
        super::handlers::get_app_logs,
        super::handlers::get_ledger_audits
    ),
    components(schemas(
        CreateLedgerRequest,
        AddParticipantRequest,
        UpdateParticipantRequest,
        RemoveParticipantRequest,
        EntryRequest,
        ActorRequest,
        RecordSettlementRequest,
        SettlementStatusRequest,
        GlobalBalancesRequest,
        BackupLocatorRequest,
        SnapshotRequest,
        VerifyAnchorRequest,
        VerifyAnchorResponse,
        ErrorResponse,
        Ledger,
        Participant,
        Role,
        ParticipantStatus,
        Currency,
        Entry,
        SplitShare,
        EntryConfirmation,
        SettlementRecord,
        SettlementMethod,
        SettlementStatus,
        Checkpoint,
        CheckpointStatus,
        ParticipantConfirmation,
        CheckpointState,
        BalanceSummary,
        PairwiseBalance,
        LedgerBreakdown,
        Snapshot,
        SnapshotEntry,
        SnapshotParticipant,
        SnapshotMode,
        CheckpointSnapshot,
        AppLog,
        LedgerAudit
    )),
    info(
        title = "Potledger API",
        description = "API for shared-expense ledgers, settlement checkpoints and anchorable snapshots",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
