use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::types::CombatantId;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Combatant not found: {0:?}")]
    UnknownCombatant(CombatantId),

    #[error("Combatant is defeated and cannot fight")]
    CombatantDown,

    #[error("Target is protected from attacks until {0}")]
    TargetProtected(DateTime<Utc>),

    #[error("No active pet")]
    PetUnavailable,

    #[error("Pet ability on cooldown for {0} more turns")]
    PetOnCooldown(u8),

    #[error("Action unavailable: {0}")]
    ActionUnavailable(&'static str),

    #[error("Decision window already expired")]
    TurnExpired,

    #[error("Malformed combatant snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Drop table error: {0}")]
    DropTable(String),

    #[error("Store failure: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
