//! Persistence boundary
//!
//! The store owns the canonical combatant records and the append-only
//! battle log. The engine reaches them only through these narrow
//! operations: load a snapshot, apply a delta to a fresh read, append a
//! log entry. Writes are last-write-wins per field; the closures keep
//! clamping and monotonicity intact even when operations race.

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::core::error::{EngineError, Result};
use crate::core::types::CombatantId;

/// The opponent side of a battle-log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Opponent {
    Player(CombatantId),
    Adversary(String),
}

/// Immutable record of one applied battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleLogEntry {
    pub attacker: CombatantId,
    pub defender: Opponent,
    pub is_pvp: bool,
    /// None when a catalog adversary won
    pub winner: Option<CombatantId>,
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub xp: i64,
    pub gold: i64,
    pub arena_delta: i64,
    pub fought_at: DateTime<Utc>,
}

/// Durable store for combatant state
pub trait CombatantStore {
    /// Snapshot of the current record
    fn load(&self, id: CombatantId) -> Result<Combatant>;

    /// Apply a delta to a fresh read of the record
    fn update(&mut self, id: CombatantId, apply: &mut dyn FnMut(&mut Combatant)) -> Result<()>;

    /// Append to the immutable battle log
    fn append_battle_log(&mut self, entry: BattleLogEntry) -> Result<()>;

    /// Battle-log entries involving the given combatant, oldest first
    fn battle_log(&self, id: CombatantId) -> Vec<BattleLogEntry>;
}

/// In-memory store for tests and the demo binary
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: AHashMap<CombatantId, Combatant>,
    log: Vec<BattleLogEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a combatant, returning its id
    pub fn insert(&mut self, combatant: Combatant) -> CombatantId {
        let id = combatant.id;
        self.records.insert(id, combatant);
        id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CombatantStore for MemoryStore {
    fn load(&self, id: CombatantId) -> Result<Combatant> {
        self.records
            .get(&id)
            .cloned()
            .ok_or(EngineError::UnknownCombatant(id))
    }

    fn update(&mut self, id: CombatantId, apply: &mut dyn FnMut(&mut Combatant)) -> Result<()> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(EngineError::UnknownCombatant(id))?;
        apply(record);
        Ok(())
    }

    fn append_battle_log(&mut self, entry: BattleLogEntry) -> Result<()> {
        self.log.push(entry);
        Ok(())
    }

    fn battle_log(&self, id: CombatantId) -> Vec<BattleLogEntry> {
        self.log
            .iter()
            .filter(|entry| {
                entry.attacker == id || matches!(entry.defender, Opponent::Player(d) if d == id)
            })
            .cloned()
            .collect()
    }
}
