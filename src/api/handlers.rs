use crate::{
    api::models::*,
    core::{
        balance::{BalanceSummary, ParticipantDirectory},
        checkpoint::CheckpointState,
        models::{
            Checkpoint, CheckpointStatus, Entry, Ledger, Participant, ParticipantStatus, Role, SettlementRecord,
            audit::{AppLog, LedgerAudit},
        },
        services::LedgerService,
        snapshot::CheckpointSnapshot,
    },
    infrastructure::{
        cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage,
    },
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use std::sync::Arc;

pub type AppService = LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/ledgers", post(create_ledger))
        .route("/ledgers/{ledger_id}", get(get_ledger))
        .route("/ledgers/{ledger_id}/participants", post(add_participant))
        .route("/ledgers/{ledger_id}/participants/remove", post(remove_participant))
        .route(
            "/ledgers/{ledger_id}/participants/{participant_id}",
            axum::routing::put(update_participant),
        )
        .route("/ledgers/{ledger_id}/entries", post(add_entry))
        .route("/ledgers/{ledger_id}/entries/{entry_id}", axum::routing::put(edit_entry))
        .route("/ledgers/{ledger_id}/entries/{entry_id}/delete", post(delete_entry))
        .route("/ledgers/{ledger_id}/entries/{entry_id}/confirm", post(confirm_entry))
        .route("/ledgers/{ledger_id}/settlements", post(record_settlement))
        .route(
            "/ledgers/{ledger_id}/settlements/{settlement_id}/status",
            post(update_settlement_status),
        )
        .route(
            "/ledgers/{ledger_id}/checkpoint",
            get(checkpoint_status).post(create_checkpoint),
        )
        .route("/ledgers/{ledger_id}/checkpoint/confirm", post(confirm_checkpoint))
        .route("/ledgers/{ledger_id}/checkpoint/bypass", post(bypass_checkpoint))
        .route("/ledgers/{ledger_id}/balances/{viewer_id}", get(ledger_balances))
        .route("/balances", post(global_balances))
        .route("/ledgers/{ledger_id}/backup_locator", post(set_backup_locator))
        .route("/ledgers/{ledger_id}/snapshot", post(build_snapshot))
        .route("/ledgers/{ledger_id}/anchor/verify", post(verify_anchor))
        .route("/ledgers/{ledger_id}/audits", get(get_ledger_audits))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/ledgers",
    request_body = CreateLedgerRequest,
    responses(
        (status = 201, description = "Ledger created successfully", body = Ledger),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_ledger(
    State(service): State<Arc<AppService>>,
    Json(req): Json<CreateLedgerRequest>,
) -> Result<(StatusCode, Json<Ledger>), ApiError> {
    let owner = Participant {
        id: req.owner_id,
        name: req.owner_name,
        role: Role::Owner,
        status: ParticipantStatus::Active,
        address: req.owner_address,
    };
    let ledger = service.create_ledger(req.name, req.currency, owner).await?;
    Ok((StatusCode::CREATED, Json(ledger)))
}

#[utoipa::path(
    get,
    path = "/api/ledgers/{ledger_id}",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    responses(
        (status = 200, description = "Ledger retrieved successfully", body = Ledger),
        (status = 404, description = "Ledger not found", body = ErrorResponse)
    )
)]
async fn get_ledger(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
) -> Result<Json<Ledger>, ApiError> {
    Ok(Json(service.get_ledger(&ledger_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/participants",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    request_body = AddParticipantRequest,
    responses(
        (status = 200, description = "Participant added", body = Participant),
        (status = 403, description = "Caller is not the ledger owner", body = ErrorResponse),
        (status = 409, description = "Already a participant", body = ErrorResponse)
    )
)]
async fn add_participant(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
    Json(req): Json<AddParticipantRequest>,
) -> Result<Json<Participant>, ApiError> {
    let mut participant = Participant::new(req.participant_id, req.name, Role::Member);
    participant.address = req.address;
    let added = service
        .add_participant(&ledger_id, participant, &req.added_by_id)
        .await?;
    Ok(Json(added))
}

#[utoipa::path(
    put,
    path = "/api/ledgers/{ledger_id}/participants/{participant_id}",
    params(
        ("ledger_id" = String, Path, description = "ID of the ledger"),
        ("participant_id" = String, Path, description = "ID of the participant")
    ),
    request_body = UpdateParticipantRequest,
    responses(
        (status = 200, description = "Participant updated", body = Participant),
        (status = 403, description = "Not allowed to update this participant", body = ErrorResponse)
    )
)]
async fn update_participant(
    State(service): State<Arc<AppService>>,
    Path((ledger_id, participant_id)): Path<(String, String)>,
    Json(req): Json<UpdateParticipantRequest>,
) -> Result<Json<Participant>, ApiError> {
    let (update, updated_by) = req.into_update();
    let updated = service
        .update_participant(&ledger_id, &participant_id, update, &updated_by)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/participants/remove",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    request_body = RemoveParticipantRequest,
    responses(
        (status = 200, description = "Participant removed"),
        (status = 403, description = "Caller is not the ledger owner", body = ErrorResponse)
    )
)]
async fn remove_participant(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
    Json(req): Json<RemoveParticipantRequest>,
) -> Result<StatusCode, ApiError> {
    service
        .remove_participant(&ledger_id, &req.participant_id, &req.removed_by_id)
        .await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/entries",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    request_body = EntryRequest,
    responses(
        (status = 201, description = "Entry added", body = Entry),
        (status = 400, description = "Malformed split", body = ErrorResponse),
        (status = 403, description = "Unknown participant", body = ErrorResponse)
    )
)]
async fn add_entry(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
    Json(req): Json<EntryRequest>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let (new_entry, added_by) = req.into_entry();
    let entry = service.add_entry(&ledger_id, new_entry, &added_by).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    put,
    path = "/api/ledgers/{ledger_id}/entries/{entry_id}",
    params(
        ("ledger_id" = String, Path, description = "ID of the ledger"),
        ("entry_id" = String, Path, description = "ID of the entry")
    ),
    request_body = EntryRequest,
    responses(
        (status = 200, description = "Entry edited", body = Entry),
        (status = 400, description = "Malformed split", body = ErrorResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    )
)]
async fn edit_entry(
    State(service): State<Arc<AppService>>,
    Path((ledger_id, entry_id)): Path<(String, String)>,
    Json(req): Json<EntryRequest>,
) -> Result<Json<Entry>, ApiError> {
    let (new_entry, edited_by) = req.into_entry();
    let entry = service.edit_entry(&ledger_id, &entry_id, new_entry, &edited_by).await?;
    Ok(Json(entry))
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/entries/{entry_id}/delete",
    params(
        ("ledger_id" = String, Path, description = "ID of the ledger"),
        ("entry_id" = String, Path, description = "ID of the entry")
    ),
    request_body = ActorRequest,
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    )
)]
async fn delete_entry(
    State(service): State<Arc<AppService>>,
    Path((ledger_id, entry_id)): Path<(String, String)>,
    Json(req): Json<ActorRequest>,
) -> Result<StatusCode, ApiError> {
    service.delete_entry(&ledger_id, &entry_id, &req.actor_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/entries/{entry_id}/confirm",
    params(
        ("ledger_id" = String, Path, description = "ID of the ledger"),
        ("entry_id" = String, Path, description = "ID of the entry")
    ),
    request_body = ActorRequest,
    responses(
        (status = 200, description = "Entry confirmed", body = Entry),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    )
)]
async fn confirm_entry(
    State(service): State<Arc<AppService>>,
    Path((ledger_id, entry_id)): Path<(String, String)>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<Entry>, ApiError> {
    let entry = service.confirm_entry(&ledger_id, &entry_id, &req.actor_id).await?;
    Ok(Json(entry))
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/settlements",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    request_body = RecordSettlementRequest,
    responses(
        (status = 201, description = "Settlement recorded", body = SettlementRecord),
        (status = 400, description = "Invalid settlement", body = ErrorResponse),
        (status = 409, description = "A checkpoint is pending", body = ErrorResponse)
    )
)]
async fn record_settlement(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
    Json(req): Json<RecordSettlementRequest>,
) -> Result<(StatusCode, Json<SettlementRecord>), ApiError> {
    let (new_settlement, recorded_by) = req.into_settlement();
    let settlement = service
        .record_settlement(&ledger_id, new_settlement, &recorded_by)
        .await?;
    Ok((StatusCode::CREATED, Json(settlement)))
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/settlements/{settlement_id}/status",
    params(
        ("ledger_id" = String, Path, description = "ID of the ledger"),
        ("settlement_id" = String, Path, description = "ID of the settlement")
    ),
    request_body = SettlementStatusRequest,
    responses(
        (status = 200, description = "Settlement status updated", body = SettlementRecord),
        (status = 404, description = "Settlement not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed", body = ErrorResponse)
    )
)]
async fn update_settlement_status(
    State(service): State<Arc<AppService>>,
    Path((ledger_id, settlement_id)): Path<(String, String)>,
    Json(req): Json<SettlementStatusRequest>,
) -> Result<Json<SettlementRecord>, ApiError> {
    let settlement = service
        .update_settlement_status(&ledger_id, &settlement_id, req.status, req.tx_ref, req.block_ref)
        .await?;
    Ok(Json(settlement))
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/checkpoint",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    request_body = ActorRequest,
    responses(
        (status = 201, description = "Checkpoint created", body = Checkpoint),
        (status = 409, description = "A checkpoint is already pending", body = ErrorResponse)
    )
)]
async fn create_checkpoint(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
    Json(req): Json<ActorRequest>,
) -> Result<(StatusCode, Json<Checkpoint>), ApiError> {
    let checkpoint = service.create_checkpoint(&ledger_id, &req.actor_id).await?;
    Ok((StatusCode::CREATED, Json(checkpoint)))
}

#[utoipa::path(
    get,
    path = "/api/ledgers/{ledger_id}/checkpoint",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    responses(
        (status = 200, description = "Checkpoint state", body = CheckpointState),
        (status = 404, description = "Ledger not found", body = ErrorResponse)
    )
)]
async fn checkpoint_status(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
) -> Result<Json<CheckpointState>, ApiError> {
    Ok(Json(service.checkpoint_status(&ledger_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/checkpoint/confirm",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    request_body = ActorRequest,
    responses(
        (status = 200, description = "Confirmation recorded", body = CheckpointStatus),
        (status = 404, description = "No pending checkpoint", body = ErrorResponse)
    )
)]
async fn confirm_checkpoint(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<CheckpointStatus>, ApiError> {
    Ok(Json(service.confirm_checkpoint(&ledger_id, &req.actor_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/checkpoint/bypass",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    request_body = ActorRequest,
    responses(
        (status = 200, description = "Checkpoint bypassed"),
        (status = 404, description = "No pending checkpoint", body = ErrorResponse)
    )
)]
async fn bypass_checkpoint(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
    Json(req): Json<ActorRequest>,
) -> Result<StatusCode, ApiError> {
    service.bypass_checkpoint(&ledger_id, &req.actor_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/ledgers/{ledger_id}/balances/{viewer_id}",
    params(
        ("ledger_id" = String, Path, description = "ID of the ledger"),
        ("viewer_id" = String, Path, description = "Participant whose side the balances are shown from")
    ),
    responses(
        (status = 200, description = "Balances for the viewer", body = BalanceSummary),
        (status = 404, description = "Ledger not found", body = ErrorResponse)
    )
)]
async fn ledger_balances(
    State(service): State<Arc<AppService>>,
    Path((ledger_id, viewer_id)): Path<(String, String)>,
) -> Result<Json<BalanceSummary>, ApiError> {
    Ok(Json(service.ledger_balances(&ledger_id, &viewer_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/balances",
    request_body = GlobalBalancesRequest,
    responses(
        (status = 200, description = "Balances across all ledgers", body = BalanceSummary),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn global_balances(
    State(service): State<Arc<AppService>>,
    Json(req): Json<GlobalBalancesRequest>,
) -> Result<Json<BalanceSummary>, ApiError> {
    let mut directory = ParticipantDirectory::new();
    for (local_id, person_id) in req.aliases {
        directory.insert(local_id, person_id);
    }
    Ok(Json(service.global_balances(&req.viewer_id, &directory).await?))
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/backup_locator",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    request_body = BackupLocatorRequest,
    responses(
        (status = 200, description = "Backup locator recorded"),
        (status = 400, description = "Invalid locator", body = ErrorResponse)
    )
)]
async fn set_backup_locator(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
    Json(req): Json<BackupLocatorRequest>,
) -> Result<StatusCode, ApiError> {
    service
        .set_backup_locator(&ledger_id, req.locator, &req.set_by_id)
        .await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/snapshot",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    request_body = SnapshotRequest,
    responses(
        (status = 200, description = "Snapshot, commitment hash and anchor message", body = CheckpointSnapshot),
        (status = 422, description = "Ledger data looks like personal data", body = ErrorResponse)
    )
)]
async fn build_snapshot(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
    Json(req): Json<SnapshotRequest>,
) -> Result<Json<CheckpointSnapshot>, ApiError> {
    let (options, requested_by) = req.into_options();
    Ok(Json(service.build_snapshot(&ledger_id, options, &requested_by).await?))
}

#[utoipa::path(
    post,
    path = "/api/ledgers/{ledger_id}/anchor/verify",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    request_body = VerifyAnchorRequest,
    responses(
        (status = 200, description = "Whether the anchor matches the current ledger", body = VerifyAnchorResponse),
        (status = 400, description = "Malformed anchor message", body = ErrorResponse)
    )
)]
async fn verify_anchor(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
    Json(req): Json<VerifyAnchorRequest>,
) -> Result<Json<VerifyAnchorResponse>, ApiError> {
    let matches = service.verify_anchor(&ledger_id, &req.message).await?;
    Ok(Json(VerifyAnchorResponse { matches }))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application logs retrieved successfully", body = Vec<AppLog>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_app_logs(State(service): State<Arc<AppService>>) -> Result<Json<Vec<AppLog>>, ApiError> {
    Ok(Json(service.get_app_logs().await?))
}

#[utoipa::path(
    get,
    path = "/api/ledgers/{ledger_id}/audits",
    params(("ledger_id" = String, Path, description = "ID of the ledger")),
    responses(
        (status = 200, description = "Ledger audits retrieved successfully", body = Vec<LedgerAudit>),
        (status = 404, description = "Ledger not found", body = ErrorResponse)
    )
)]
async fn get_ledger_audits(
    State(service): State<Arc<AppService>>,
    Path(ledger_id): Path<String>,
) -> Result<Json<Vec<LedgerAudit>>, ApiError> {
    Ok(Json(service.get_ledger_audits(&ledger_id).await?))
}
