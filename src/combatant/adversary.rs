//! Catalog adversaries
//!
//! Adversaries are read-only content: combat copies their stats into a
//! running `Fighter` and never writes anything back.

use serde::{Deserialize, Serialize};

use crate::combatant::model::Fighter;
use crate::combat::formula::DefenseProfile;
use crate::core::error::{EngineError, Result};

/// A scripted opponent with fixed rewards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub name: String,
    pub level: i64,
    pub hp_max: i64,
    pub strength: i64,
    pub defense: i64,
    pub agility: i64,
    pub luck: i64,
    pub xp_reward: i64,
    pub gold_reward: i64,
}

impl Adversary {
    pub fn validate(&self) -> Result<()> {
        if self.level < 1 || self.hp_max <= 0 {
            return Err(EngineError::MalformedSnapshot(format!(
                "adversary '{}' has level {} / hp {}",
                self.name, self.level, self.hp_max
            )));
        }
        if self.strength < 0 || self.defense < 0 || self.agility < 0 || self.luck < 0 {
            return Err(EngineError::MalformedSnapshot(format!(
                "adversary '{}' has a negative attribute",
                self.name
            )));
        }
        if self.xp_reward < 0 || self.gold_reward < 0 {
            return Err(EngineError::MalformedSnapshot(format!(
                "adversary '{}' has negative rewards",
                self.name
            )));
        }
        Ok(())
    }

    /// Adversaries always enter battle at full hp
    pub fn fighter(&self) -> Fighter {
        Fighter {
            name: self.name.clone(),
            level: self.level,
            hp: self.hp_max,
            hp_max: self.hp_max,
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

/// The canned hunting grounds used by the demo binary and tests
pub fn catalog() -> Vec<Adversary> {
    vec![
        Adversary {
            name: "Giant Rat".into(),
            level: 1,
            hp_max: 40,
            strength: 6,
            defense: 3,
            agility: 8,
            luck: 2,
            xp_reward: 25,
            gold_reward: 8,
        },
        Adversary {
            name: "Roadside Bandit".into(),
            level: 3,
            hp_max: 80,
            strength: 12,
            defense: 8,
            agility: 10,
            luck: 4,
            xp_reward: 60,
            gold_reward: 22,
        },
        Adversary {
            name: "Dire Wolf".into(),
            level: 5,
            hp_max: 120,
            strength: 18,
            defense: 10,
            agility: 16,
            luck: 5,
            xp_reward: 110,
            gold_reward: 35,
        },
        Adversary {
            name: "Swamp Troll".into(),
            level: 8,
            hp_max: 220,
            strength: 26,
            defense: 18,
            agility: 6,
            luck: 3,
            xp_reward: 240,
            gold_reward: 70,
        },
        Adversary {
            name: "Ember Drake".into(),
            level: 12,
            hp_max: 360,
            strength: 38,
            defense: 26,
            agility: 20,
            luck: 10,
            xp_reward: 520,
            gold_reward: 160,
        },
    ]
}
