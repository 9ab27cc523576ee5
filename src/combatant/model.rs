//! Normalized fighter representation
//!
//! The store owns the canonical combatant record; combat only ever sees
//! an immutable snapshot taken at the start of an operation, and writes
//! go back through the store as deltas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combat::formula::{AttackProfile, DefenseProfile};
use crate::core::error::{EngineError, Result};
use crate::core::types::CombatantId;

/// A clamped resource pool (hp, energy, mana)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub current: i64,
    pub max: i64,
}

impl Pool {
    pub fn full(max: i64) -> Self {
        Self { current: max, max }
    }

    pub fn new(current: i64, max: i64) -> Self {
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }

    /// Remove up to `amount`, flooring at zero
    pub fn deplete(&mut self, amount: i64) {
        self.current = (self.current - amount.max(0)).max(0);
    }

    /// Add up to `amount`, capping at max. Returns the amount applied.
    pub fn restore(&mut self, amount: i64) -> i64 {
        let applied = amount.max(0).min(self.max - self.current);
        self.current += applied;
        applied
    }
}

/// Canonical player combatant record
///
/// Field-for-field what the persistence boundary stores. Combat never
/// holds a long-lived reference to one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub level: i64,

    // Resources
    pub hp: Pool,
    pub energy: Pool,
    pub mana: Option<Pool>,

    // Attributes
    pub strength: i64,
    pub defense: i64,
    pub agility: i64,
    pub luck: i64,
    pub vitality: i64,

    // Progression
    pub xp: i64,
    pub xp_to_next_level: i64,
    pub gold: i64,
    pub available_points: i64,
    pub arena_points: i64,

    // PvP protection
    pub protected_until: Option<DateTime<Utc>>,

    // Regeneration bookkeeping
    pub last_hp_regen: DateTime<Utc>,
    pub last_energy_regen: DateTime<Utc>,

    // Record
    pub total_battles: u64,
    pub wins: u64,
}

impl Combatant {
    /// Fresh level-1 combatant with starting stats
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: CombatantId::new(),
            name: name.into(),
            level: 1,
            hp: Pool::full(100),
            energy: Pool::full(100),
            mana: None,
            strength: 10,
            defense: 10,
            agility: 10,
            luck: 5,
            vitality: 10,
            xp: 0,
            xp_to_next_level: 100,
            gold: 0,
            available_points: 0,
            arena_points: 0,
            protected_until: None,
            last_hp_regen: now,
            last_energy_regen: now,
            total_battles: 0,
            wins: 0,
        }
    }

    /// Reject structurally broken snapshots before any battle starts
    pub fn validate(&self) -> Result<()> {
        if self.level < 1 {
            return Err(EngineError::MalformedSnapshot(format!(
                "level {} below 1",
                self.level
            )));
        }
        if self.hp.max <= 0 {
            return Err(EngineError::MalformedSnapshot("hp max not positive".into()));
        }
        for (name, pool) in [("hp", &self.hp), ("energy", &self.energy)] {
            if pool.current < 0 || pool.current > pool.max {
                return Err(EngineError::MalformedSnapshot(format!(
                    "{} {}/{} outside [0, max]",
                    name, pool.current, pool.max
                )));
            }
        }
        if let Some(mana) = &self.mana {
            if mana.current < 0 || mana.current > mana.max {
                return Err(EngineError::MalformedSnapshot("mana outside [0, max]".into()));
            }
        }
        if self.strength < 0 || self.defense < 0 || self.agility < 0 || self.luck < 0 {
            return Err(EngineError::MalformedSnapshot("negative attribute".into()));
        }
        if self.xp_to_next_level <= 0 {
            return Err(EngineError::MalformedSnapshot(
                "xp_to_next_level not positive".into(),
            ));
        }
        Ok(())
    }

    /// Validate and require the combatant to be standing
    pub fn ensure_battle_ready(&self) -> Result<()> {
        self.validate()?;
        if self.hp.is_empty() {
            return Err(EngineError::CombatantDown);
        }
        Ok(())
    }

    pub fn is_protected(&self, now: DateTime<Utc>) -> bool {
        self.protected_until.is_some_and(|until| until > now)
    }

    pub fn attack_profile(&self) -> AttackProfile {
        AttackProfile {
            strength: self.strength,
            defense: self.defense,
            agility: self.agility,
            luck: self.luck,
        }
    }

    pub fn defense_profile(&self) -> DefenseProfile {
        DefenseProfile {
            strength: self.strength,
            defense: self.defense,
        }
    }

    pub fn fighter(&self) -> Fighter {
        Fighter {
            name: self.name.clone(),
            level: self.level,
            hp: self.hp.current,
            hp_max: self.hp.max,
            strength: self.strength,
            defense: self.defense,
            agility: self.agility,
            luck: self.luck,
        }
    }
}

/// Flattened view of either side of a battle
///
/// Players and adversaries both normalize to this before simulation, so
/// the combat code has a single shape to reason about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    pub name: String,
    pub level: i64,
    pub hp: i64,
    pub hp_max: i64,
    pub strength: i64,
    pub defense: i64,
    pub agility: i64,
    pub luck: i64,
}

impl Fighter {
    pub fn attack_profile(&self) -> AttackProfile {
        AttackProfile {
            strength: self.strength,
            defense: self.defense,
            agility: self.agility,
            luck: self.luck,
        }
    }

    pub fn defense_profile(&self) -> DefenseProfile {
        DefenseProfile {
            strength: self.strength,
            defense: self.defense,
        }
    }
}
