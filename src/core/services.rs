use crate::config::Config;
use crate::core::balance::{self, BalanceSummary, ParticipantDirectory};
use crate::core::checkpoint::{self, CheckpointState};
use crate::core::constants::{
    BACKUP_LOCATOR_SET, BALANCE_QUERIED, CHECKPOINT_BYPASSED, CHECKPOINT_CONFIRMED, CHECKPOINT_CREATED,
    ENTRY_ADDED, ENTRY_CONFIRMED, ENTRY_DELETED, ENTRY_EDITED, LEDGER_CREATED, MAX_MEMO_LENGTH, MAX_NAME_LENGTH,
    PARTICIPANT_ADDED, PARTICIPANT_REMOVED, PARTICIPANT_UPDATED, SETTLEMENT_RECORDED, SETTLEMENT_STATUS_CHANGED,
    SNAPSHOT_BUILT,
};
use crate::core::errors::{FieldError, LedgerError};
use crate::core::models::{
    Checkpoint, CheckpointStatus, Currency, Entry, EntryConfirmation, Ledger, Participant, ParticipantStatus, Role,
    SettlementMethod, SettlementRecord, SettlementStatus, SplitShare,
    audit::{AppLog, LedgerAudit},
};
use crate::core::snapshot::{self, CheckpointSnapshot, SnapshotOptions};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct NewEntry {
    pub amount: f64,
    pub payer_id: String,
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: NaiveDate,
    pub memo: Option<String>,
    pub split: Vec<SplitShare>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct NewSettlement {
    pub from_id: String,
    pub to_id: String,
    pub amount: f64,
    pub method: SettlementMethod,
    pub tx_ref: Option<String>,
}

/// Fields left as `None` are kept.
#[derive(Serialize, Deserialize, Debug, ToSchema, Clone, Default)]
pub struct ParticipantUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub status: Option<ParticipantStatus>,
}

pub struct LedgerService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
    app_id: String,
    balance_cache_ttl: Duration,
    // Held across every read-modify-write of a ledger.
    ledger_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<L: LoggingService, S: Storage, C: Cache> LedgerService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C, config: &Config) -> Self {
        LedgerService {
            storage,
            logging,
            cache,
            app_id: config.app_id.clone(),
            balance_cache_ttl: Duration::from_secs(config.balance_cache_ttl_secs),
            ledger_locks: Mutex::new(HashMap::new()),
        }
    }

    async fn lock_ledger(&self, ledger_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.ledger_locks.lock().await;
            locks.entry(ledger_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    async fn load_ledger(&self, ledger_id: &str) -> Result<Ledger, LedgerError> {
        self.storage
            .get_ledger(ledger_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Ledger {}", ledger_id)))
    }

    async fn persist(&self, ledger: Ledger) -> Result<(), LedgerError> {
        let ledger_id = ledger.id.clone();
        self.storage.save_ledger(ledger).await?;
        self.cache.invalidate_ledger(&ledger_id).await
    }

    async fn log_and_audit(
        &self,
        ledger_id: Option<&str>,
        action: &str,
        log_details: serde_json::Value,
        actor_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        self.logging.log_action(action, log_details.clone(), actor_id).await?;
        if let Some(lid) = ledger_id {
            self.storage
                .save_ledger_audit(LedgerAudit {
                    id: Uuid::new_v4().to_string(),
                    ledger_id: lid.to_string(),
                    action: action.to_string(),
                    actor_id: actor_id.map(String::from),
                    details: log_details,
                    timestamp: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), LedgerError> {
        let invalid = |title: String, description: String| {
            LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title,
                    description,
                },
            )
        };
        if value.trim().is_empty() {
            return Err(invalid(
                format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.chars().count() > max_length {
            return Err(invalid(
                format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(invalid(
                format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_new_entry(&self, entry: &NewEntry) -> Result<(), LedgerError> {
        if let Some(memo) = &entry.memo {
            self.validate_string_input("memo", memo, MAX_MEMO_LENGTH)?;
        }
        Ok(())
    }

    pub async fn create_ledger(
        &self,
        name: String,
        currency: Currency,
        owner: Participant,
    ) -> Result<Ledger, LedgerError> {
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        self.validate_string_input("owner_name", &owner.name, MAX_NAME_LENGTH)?;

        let mut ledger = Ledger::new(Uuid::new_v4().to_string(), name, currency);
        let owner_id = owner.id.clone();
        ledger.participants.push(Participant {
            role: Role::Owner,
            status: ParticipantStatus::Active,
            ..owner
        });
        self.persist(ledger.clone()).await?;

        info!("Ledger {} ({}) created by {}", ledger.id, ledger.currency, owner_id);
        self.log_and_audit(
            Some(&ledger.id),
            LEDGER_CREATED,
            json!({ "ledger_id": ledger.id, "name": ledger.name, "currency": ledger.currency }),
            Some(&owner_id),
        )
        .await?;
        Ok(ledger)
    }

    pub async fn get_ledger(&self, ledger_id: &str) -> Result<Ledger, LedgerError> {
        self.load_ledger(ledger_id).await
    }

    pub async fn add_participant(
        &self,
        ledger_id: &str,
        participant: Participant,
        added_by: &str,
    ) -> Result<Participant, LedgerError> {
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        ledger.require_owner(added_by)?;
        self.validate_string_input("name", &participant.name, MAX_NAME_LENGTH)?;
        if ledger.is_participant(&participant.id) {
            return Err(LedgerError::AlreadyParticipant(participant.id));
        }

        ledger.former_participants.retain(|p| p.id != participant.id);
        let participant = Participant {
            role: Role::Member,
            ..participant
        };
        ledger.participants.push(participant.clone());
        self.persist(ledger).await?;

        self.log_and_audit(
            Some(ledger_id),
            PARTICIPANT_ADDED,
            json!({ "ledger_id": ledger_id, "participant_id": participant.id, "name": participant.name }),
            Some(added_by),
        )
        .await?;
        Ok(participant)
    }

    pub async fn update_participant(
        &self,
        ledger_id: &str,
        participant_id: &str,
        update: ParticipantUpdate,
        updated_by: &str,
    ) -> Result<Participant, LedgerError> {
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        if updated_by != participant_id {
            ledger.require_owner(updated_by)?;
        }
        if let Some(name) = &update.name {
            self.validate_string_input("name", name, MAX_NAME_LENGTH)?;
        }

        let participant = ledger
            .participants
            .iter_mut()
            .find(|p| p.id == participant_id)
            .ok_or_else(|| LedgerError::NotAParticipant(participant_id.to_string()))?;
        if let Some(name) = update.name {
            participant.name = name;
        }
        if let Some(address) = update.address {
            participant.address = Some(address).filter(|a| !a.trim().is_empty());
        }
        if let Some(status) = update.status {
            participant.status = status;
        }
        let updated = participant.clone();
        self.persist(ledger).await?;

        self.log_and_audit(
            Some(ledger_id),
            PARTICIPANT_UPDATED,
            json!({ "ledger_id": ledger_id, "participant_id": participant_id }),
            Some(updated_by),
        )
        .await?;
        Ok(updated)
    }

    /// Owner only. The removed participant stays a balance counterparty through
    /// `former_participants`.
    pub async fn remove_participant(
        &self,
        ledger_id: &str,
        participant_id: &str,
        removed_by: &str,
    ) -> Result<(), LedgerError> {
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        ledger.require_owner(removed_by)?;
        if participant_id == removed_by {
            return Err(LedgerError::OwnerCannotRemoveSelf);
        }
        let position = ledger
            .participants
            .iter()
            .position(|p| p.id == participant_id)
            .ok_or_else(|| LedgerError::NotAParticipant(participant_id.to_string()))?;

        let removed = ledger.participants.remove(position);
        ledger.former_participants.push(removed);
        let checkpoint_completed = checkpoint::complete_if_confirmed(&mut ledger);
        self.persist(ledger).await?;

        self.log_and_audit(
            Some(ledger_id),
            PARTICIPANT_REMOVED,
            json!({
                "ledger_id": ledger_id,
                "participant_id": participant_id,
                "checkpoint_completed": checkpoint_completed
            }),
            Some(removed_by),
        )
        .await?;
        Ok(())
    }

    pub async fn add_entry(&self, ledger_id: &str, new_entry: NewEntry, added_by: &str) -> Result<Entry, LedgerError> {
        self.validate_new_entry(&new_entry)?;
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        ledger.require_participant(added_by)?;

        let entry = Entry {
            id: Uuid::new_v4().to_string(),
            amount: new_entry.amount,
            payer_id: new_entry.payer_id,
            date: new_entry.date,
            memo: new_entry.memo,
            split: new_entry.split,
            confirmations: Vec::new(),
        };
        ledger.validate_entry(&entry)?;
        ledger.entries.push(entry.clone());
        let reset = checkpoint::invalidate_on_edit(&mut ledger);
        self.persist(ledger).await?;

        debug!("Entry {} added to ledger {}", entry.id, ledger_id);
        self.log_and_audit(
            Some(ledger_id),
            ENTRY_ADDED,
            json!({
                "ledger_id": ledger_id,
                "entry_id": entry.id,
                "amount": entry.amount,
                "payer_id": entry.payer_id,
                "checkpoint_reset": reset
            }),
            Some(added_by),
        )
        .await?;
        Ok(entry)
    }

    pub async fn edit_entry(
        &self,
        ledger_id: &str,
        entry_id: &str,
        new_entry: NewEntry,
        edited_by: &str,
    ) -> Result<Entry, LedgerError> {
        self.validate_new_entry(&new_entry)?;
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        ledger.require_participant(edited_by)?;
        if ledger.entry(entry_id).is_none() {
            return Err(LedgerError::NotFound(format!("Entry {}", entry_id)));
        }

        let edited = Entry {
            id: entry_id.to_string(),
            amount: new_entry.amount,
            payer_id: new_entry.payer_id,
            date: new_entry.date,
            memo: new_entry.memo,
            split: new_entry.split,
            confirmations: Vec::new(),
        };
        ledger.validate_entry(&edited)?;
        *ledger.entry_mut(entry_id)? = edited.clone();
        let reset = checkpoint::invalidate_on_edit(&mut ledger);
        self.persist(ledger).await?;

        self.log_and_audit(
            Some(ledger_id),
            ENTRY_EDITED,
            json!({
                "ledger_id": ledger_id,
                "entry_id": entry_id,
                "amount": edited.amount,
                "checkpoint_reset": reset
            }),
            Some(edited_by),
        )
        .await?;
        Ok(edited)
    }

    pub async fn delete_entry(&self, ledger_id: &str, entry_id: &str, deleted_by: &str) -> Result<(), LedgerError> {
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        ledger.require_participant(deleted_by)?;
        let before = ledger.entries.len();
        ledger.entries.retain(|e| e.id != entry_id);
        if ledger.entries.len() == before {
            return Err(LedgerError::NotFound(format!("Entry {}", entry_id)));
        }
        let reset = checkpoint::invalidate_on_edit(&mut ledger);
        self.persist(ledger).await?;

        self.log_and_audit(
            Some(ledger_id),
            ENTRY_DELETED,
            json!({ "ledger_id": ledger_id, "entry_id": entry_id, "checkpoint_reset": reset }),
            Some(deleted_by),
        )
        .await?;
        Ok(())
    }

    pub async fn confirm_entry(
        &self,
        ledger_id: &str,
        entry_id: &str,
        participant_id: &str,
    ) -> Result<Entry, LedgerError> {
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        ledger.require_participant(participant_id)?;
        let entry = ledger.entry_mut(entry_id)?;
        if !entry.is_confirmed_by(participant_id) {
            entry.confirmations.push(EntryConfirmation {
                participant_id: participant_id.to_string(),
                confirmed_at: Some(Utc::now()),
            });
        }
        let entry = entry.clone();
        self.persist(ledger).await?;

        self.log_and_audit(
            Some(ledger_id),
            ENTRY_CONFIRMED,
            json!({ "ledger_id": ledger_id, "entry_id": entry_id }),
            Some(participant_id),
        )
        .await?;
        Ok(entry)
    }

    /// Off-chain settlements take effect immediately; on-chain ones wait for
    /// `update_settlement_status` to report finality.
    pub async fn record_settlement(
        &self,
        ledger_id: &str,
        new_settlement: NewSettlement,
        recorded_by: &str,
    ) -> Result<SettlementRecord, LedgerError> {
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        ledger.require_participant(recorded_by)?;
        if let Some(pending) = ledger.pending_checkpoint() {
            warn!("Settlement on ledger {} blocked by pending checkpoint {}", ledger_id, pending.id);
            return Err(LedgerError::InvalidState(format!(
                "checkpoint {} must be confirmed or bypassed before settling",
                pending.id
            )));
        }
        if new_settlement.from_id == new_settlement.to_id {
            return Err(LedgerError::SelfSettlement);
        }
        if !new_settlement.amount.is_finite() || new_settlement.amount <= 0.0 {
            return Err(LedgerError::InvalidSettlementAmount);
        }
        if !ledger.knows_participant(&new_settlement.from_id) {
            return Err(LedgerError::NotAParticipant(new_settlement.from_id));
        }
        if !ledger.knows_participant(&new_settlement.to_id) {
            return Err(LedgerError::NotAParticipant(new_settlement.to_id));
        }

        let settlement = SettlementRecord {
            id: Uuid::new_v4().to_string(),
            from_id: new_settlement.from_id,
            to_id: new_settlement.to_id,
            amount: new_settlement.amount,
            currency: ledger.currency,
            method: new_settlement.method,
            tx_ref: new_settlement.tx_ref,
            block_ref: None,
            status: if new_settlement.method.is_on_chain() {
                SettlementStatus::Submitted
            } else {
                SettlementStatus::Finalized
            },
            timestamp: Utc::now(),
        };
        ledger.settlements.push(settlement.clone());
        self.persist(ledger).await?;

        info!(
            "Settlement {} of {} {} recorded on ledger {}",
            settlement.id, settlement.amount, settlement.currency, ledger_id
        );
        self.log_and_audit(
            Some(ledger_id),
            SETTLEMENT_RECORDED,
            json!({
                "ledger_id": ledger_id,
                "settlement_id": settlement.id,
                "from_id": settlement.from_id,
                "to_id": settlement.to_id,
                "amount": settlement.amount,
                "method": settlement.method,
                "status": settlement.status
            }),
            Some(recorded_by),
        )
        .await?;
        Ok(settlement)
    }

    pub async fn update_settlement_status(
        &self,
        ledger_id: &str,
        settlement_id: &str,
        status: SettlementStatus,
        tx_ref: Option<String>,
        block_ref: Option<String>,
    ) -> Result<SettlementRecord, LedgerError> {
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        let settlement = ledger.settlement_mut(settlement_id)?;
        let previous = settlement.status;
        if !previous.can_transition_to(status) {
            return Err(LedgerError::InvalidState(format!(
                "settlement {} cannot move from {:?} to {:?}",
                settlement_id, previous, status
            )));
        }
        settlement.status = status;
        if tx_ref.is_some() {
            settlement.tx_ref = tx_ref;
        }
        if block_ref.is_some() {
            settlement.block_ref = block_ref;
        }
        let settlement = settlement.clone();
        self.persist(ledger).await?;

        self.log_and_audit(
            Some(ledger_id),
            SETTLEMENT_STATUS_CHANGED,
            json!({
                "ledger_id": ledger_id,
                "settlement_id": settlement_id,
                "from": previous,
                "to": status,
                "block_ref": settlement.block_ref
            }),
            None,
        )
        .await?;
        Ok(settlement)
    }

    pub async fn create_checkpoint(&self, ledger_id: &str, creator_id: &str) -> Result<Checkpoint, LedgerError> {
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        let created = checkpoint::create(&mut ledger, creator_id, Utc::now())?;
        self.persist(ledger).await?;

        self.log_and_audit(
            Some(ledger_id),
            CHECKPOINT_CREATED,
            json!({ "ledger_id": ledger_id, "checkpoint_id": created.id, "expires_at": created.expires_at }),
            Some(creator_id),
        )
        .await?;
        Ok(created)
    }

    pub async fn confirm_checkpoint(
        &self,
        ledger_id: &str,
        participant_id: &str,
    ) -> Result<CheckpointStatus, LedgerError> {
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        let status = checkpoint::confirm(&mut ledger, participant_id, Utc::now())?;
        let checkpoint_id = ledger.checkpoint.as_ref().map(|c| c.id.clone());
        self.persist(ledger).await?;

        self.log_and_audit(
            Some(ledger_id),
            CHECKPOINT_CONFIRMED,
            json!({ "ledger_id": ledger_id, "checkpoint_id": checkpoint_id, "status": status }),
            Some(participant_id),
        )
        .await?;
        Ok(status)
    }

    pub async fn bypass_checkpoint(&self, ledger_id: &str, actor_id: &str) -> Result<(), LedgerError> {
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        checkpoint::bypass(&mut ledger, actor_id, Utc::now())?;
        let (checkpoint_id, awaiting) = match &ledger.checkpoint {
            Some(c) => (
                Some(c.id.clone()),
                ledger
                    .participants
                    .iter()
                    .filter(|p| !c.has_confirmed(&p.id))
                    .map(|p| p.id.clone())
                    .collect::<Vec<_>>(),
            ),
            None => (None, Vec::new()),
        };
        self.persist(ledger).await?;

        self.log_and_audit(
            Some(ledger_id),
            CHECKPOINT_BYPASSED,
            json!({ "ledger_id": ledger_id, "checkpoint_id": checkpoint_id, "unconfirmed": awaiting }),
            Some(actor_id),
        )
        .await?;
        Ok(())
    }

    pub async fn checkpoint_status(&self, ledger_id: &str) -> Result<CheckpointState, LedgerError> {
        let ledger = self.load_ledger(ledger_id).await?;
        Ok(checkpoint::describe(&ledger, Utc::now()))
    }

    pub async fn ledger_balances(&self, ledger_id: &str, viewer_id: &str) -> Result<BalanceSummary, LedgerError> {
        if let Some(cached) = self.cache.get_ledger_balances(ledger_id, viewer_id).await? {
            debug!("Balances for {} on ledger {} served from cache", viewer_id, ledger_id);
            return Ok(cached);
        }

        // No write may land between the load and the cache save.
        let summary = {
            let _guard = self.lock_ledger(ledger_id).await;
            let ledger = self.load_ledger(ledger_id).await?;
            let summary = balance::compute_ledger_balances(&ledger, viewer_id);
            self.cache
                .save_ledger_balances(ledger_id, viewer_id, &summary, self.balance_cache_ttl)
                .await?;
            summary
        };

        self.log_and_audit(
            None,
            BALANCE_QUERIED,
            json!({ "ledger_id": ledger_id, "viewer_id": viewer_id }),
            Some(viewer_id),
        )
        .await?;
        Ok(summary)
    }

    pub async fn global_balances(
        &self,
        viewer_id: &str,
        directory: &ParticipantDirectory,
    ) -> Result<BalanceSummary, LedgerError> {
        let ledgers = self.storage.list_ledgers().await?;
        let summary = balance::compute_global_balances(&ledgers, directory, viewer_id);

        self.log_and_audit(
            None,
            BALANCE_QUERIED,
            json!({ "viewer_id": viewer_id, "ledgers": ledgers.len() }),
            Some(viewer_id),
        )
        .await?;
        Ok(summary)
    }

    pub async fn set_backup_locator(
        &self,
        ledger_id: &str,
        locator: Option<String>,
        set_by: &str,
    ) -> Result<(), LedgerError> {
        let _guard = self.lock_ledger(ledger_id).await;
        let mut ledger = self.load_ledger(ledger_id).await?;
        ledger.require_participant(set_by)?;
        let locator = snapshot::normalize_locator(locator.as_deref())?;
        ledger.last_backup_locator = locator.clone();
        self.persist(ledger).await?;

        self.log_and_audit(
            Some(ledger_id),
            BACKUP_LOCATOR_SET,
            json!({ "ledger_id": ledger_id, "locator": locator }),
            Some(set_by),
        )
        .await?;
        Ok(())
    }

    // The service's app id wins; a missing locator falls back to the last backup.
    pub async fn build_snapshot(
        &self,
        ledger_id: &str,
        options: SnapshotOptions,
        requested_by: &str,
    ) -> Result<CheckpointSnapshot, LedgerError> {
        let ledger = self.load_ledger(ledger_id).await?;
        ledger.require_participant(requested_by)?;
        let explicit = snapshot::normalize_locator(options.backup_locator.as_deref())?;
        let options = SnapshotOptions {
            backup_locator: explicit.or_else(|| ledger.last_backup_locator.clone()),
            app_id: self.app_id.clone(),
            ..options
        };
        let built = snapshot::build_checkpoint_snapshot(&ledger, &options)?;

        self.log_and_audit(
            Some(ledger_id),
            SNAPSHOT_BUILT,
            json!({
                "ledger_id": ledger_id,
                "mode": options.mode,
                "commitment_hash": built.commitment_hash
            }),
            Some(requested_by),
        )
        .await?;
        Ok(built)
    }

    pub async fn verify_anchor(&self, ledger_id: &str, message: &str) -> Result<bool, LedgerError> {
        let ledger = self.load_ledger(ledger_id).await?;
        snapshot::verify_anchor(&ledger, message)
    }

    pub async fn get_ledger_audits(&self, ledger_id: &str) -> Result<Vec<LedgerAudit>, LedgerError> {
        self.load_ledger(ledger_id).await?;
        self.storage.get_ledger_audits(ledger_id).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, LedgerError> {
        self.logging.get_logs().await
    }
}
