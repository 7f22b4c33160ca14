//! Per-ledger confirmation gate.
//!
//! `pending -> confirmed` once every current participant has confirmed, or
//! `pending -> bypassed` by manual override. Both end states are terminal; a new
//! checkpoint replaces a terminal one. Expiry is only reported, never acted on.

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::constants::CHECKPOINT_TTL_HOURS;
use crate::core::errors::LedgerError;
use crate::core::models::{Checkpoint, CheckpointStatus, Ledger, ParticipantConfirmation, Participant};

pub fn create(ledger: &mut Ledger, creator_id: &str, now: DateTime<Utc>) -> Result<Checkpoint, LedgerError> {
    if let Some(pending) = ledger.pending_checkpoint() {
        warn!(
            "Checkpoint {} on ledger {} is still pending, refusing to create another",
            pending.id, ledger.id
        );
        return Err(LedgerError::InvalidState(format!(
            "checkpoint {} is still pending",
            pending.id
        )));
    }
    ledger.require_participant(creator_id)?;

    let confirmations: BTreeMap<String, ParticipantConfirmation> = ledger
        .participants
        .iter()
        .map(|p| (p.id.clone(), ParticipantConfirmation::default()))
        .collect();

    let checkpoint = Checkpoint {
        id: Uuid::new_v4().to_string(),
        created_by: creator_id.to_string(),
        created_at: now,
        status: CheckpointStatus::Pending,
        confirmations,
        expires_at: now + Duration::hours(CHECKPOINT_TTL_HOURS),
        bypassed_by: None,
        bypassed_at: None,
    };
    if let Some(previous) = ledger.checkpoint.replace(checkpoint.clone()) {
        debug!("Checkpoint {} ({:?}) replaced", previous.id, previous.status);
    }
    info!("Checkpoint {} created on ledger {} by {}", checkpoint.id, ledger.id, creator_id);
    Ok(checkpoint)
}

fn all_confirmed(participants: &[Participant], checkpoint: &Checkpoint) -> bool {
    participants.iter().all(|p| checkpoint.has_confirmed(&p.id))
}

fn pending_mut<'a>(checkpoint: &'a mut Option<Checkpoint>, ledger_id: &str) -> Result<&'a mut Checkpoint, LedgerError> {
    checkpoint
        .as_mut()
        .filter(|c| c.is_pending())
        .ok_or_else(|| LedgerError::NotFound(format!("Pending checkpoint for ledger {}", ledger_id)))
}

/// Records `participant_id`'s confirmation and returns the resulting status.
pub fn confirm(ledger: &mut Ledger, participant_id: &str, now: DateTime<Utc>) -> Result<CheckpointStatus, LedgerError> {
    let Ledger {
        id,
        participants,
        checkpoint,
        ..
    } = ledger;
    let checkpoint = pending_mut(checkpoint, id)?;
    if !participants.iter().any(|p| p.id == participant_id) {
        return Err(LedgerError::NotAParticipant(participant_id.to_string()));
    }

    checkpoint.confirmations.insert(
        participant_id.to_string(),
        ParticipantConfirmation {
            confirmed: true,
            confirmed_at: Some(now),
        },
    );

    if all_confirmed(participants, checkpoint) {
        checkpoint.status = CheckpointStatus::Confirmed;
        info!("Checkpoint {} on ledger {} fully confirmed", checkpoint.id, id);
    } else {
        debug!("Checkpoint {} confirmed by {}", checkpoint.id, participant_id);
    }
    Ok(checkpoint.status)
}

/// Manual override: closes a pending checkpoint regardless of who has confirmed.
pub fn bypass(ledger: &mut Ledger, actor_id: &str, now: DateTime<Utc>) -> Result<(), LedgerError> {
    let Ledger {
        id,
        participants,
        checkpoint,
        ..
    } = ledger;
    let checkpoint = pending_mut(checkpoint, id)?;
    if !participants.iter().any(|p| p.id == actor_id) {
        return Err(LedgerError::NotAParticipant(actor_id.to_string()));
    }

    checkpoint.status = CheckpointStatus::Bypassed;
    checkpoint.bypassed_by = Some(actor_id.to_string());
    checkpoint.bypassed_at = Some(now);
    warn!("Checkpoint {} on ledger {} bypassed by {}", checkpoint.id, id, actor_id);
    Ok(())
}

/// Called after an entry is added or edited. A confirmation only vouches for the ledger
/// as it was when given, so an owner confirmation on a pending checkpoint is withdrawn.
/// Returns whether anything was reset.
pub fn invalidate_on_edit(ledger: &mut Ledger) -> bool {
    let Some(owner_id) = ledger.owner().map(|o| o.id.clone()) else {
        return false;
    };
    let Some(checkpoint) = ledger.checkpoint.as_mut().filter(|c| c.is_pending()) else {
        return false;
    };
    match checkpoint.confirmations.get_mut(&owner_id) {
        Some(confirmation) if confirmation.confirmed => {
            *confirmation = ParticipantConfirmation::default();
            info!("Owner confirmation on checkpoint {} reset after edit", checkpoint.id);
            true
        }
        _ => false,
    }
}

/// Called after a participant is removed: the remaining participants may now all have
/// confirmed. Returns whether the pending checkpoint moved to `confirmed`.
pub fn complete_if_confirmed(ledger: &mut Ledger) -> bool {
    let Ledger {
        id,
        participants,
        checkpoint,
        ..
    } = ledger;
    let Some(checkpoint) = checkpoint.as_mut().filter(|c| c.is_pending()) else {
        return false;
    };
    if !all_confirmed(participants, checkpoint) {
        return false;
    }
    checkpoint.status = CheckpointStatus::Confirmed;
    info!("Checkpoint {} on ledger {} confirmed after a removal", checkpoint.id, id);
    true
}

/// Read model of a ledger's checkpoint for callers deciding what to prompt.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CheckpointState {
    pub checkpoint: Option<Checkpoint>,
    /// Pending and past its expiry: prompt for bypass or recreation.
    pub expired: bool,
    pub settlement_allowed: bool,
    pub awaiting: Vec<String>,
}

pub fn describe(ledger: &Ledger, now: DateTime<Utc>) -> CheckpointState {
    let awaiting = match ledger.pending_checkpoint() {
        Some(checkpoint) => ledger
            .participants
            .iter()
            .filter(|p| !checkpoint.has_confirmed(&p.id))
            .map(|p| p.id.clone())
            .collect(),
        None => Vec::new(),
    };
    CheckpointState {
        checkpoint: ledger.checkpoint.clone(),
        expired: ledger.checkpoint.as_ref().map(|c| c.is_expired(now)).unwrap_or(false),
        settlement_allowed: ledger.settlement_allowed(),
        awaiting,
    }
}
