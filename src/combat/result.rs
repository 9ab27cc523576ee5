//! Battle outcome value objects

use serde::{Deserialize, Serialize};

use crate::combat::constants::DEFEAT_XP_FACTOR;
use crate::core::types::MaterialId;

/// One stack of looted material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drop {
    pub material: MaterialId,
    pub quantity: u32,
}

/// Immutable outcome of a single battle
///
/// Created once when a battle terminates. The progression resolver
/// fills in `level_up`, `new_level`, `arena_points_change` and `drops`
/// when the result is applied to the persisted record; a retry re-uses
/// the same value rather than re-simulating the fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub won: bool,
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub xp_gained: i64,
    pub gold_gained: i64,
    pub arena_points_change: i64,
    pub level_up: bool,
    pub new_level: i64,
    pub drops: Vec<Drop>,
}

impl BattleResult {
    /// Victorious outcome paying the adversary's static rewards
    pub fn victory(damage_dealt: i64, damage_taken: i64, xp_reward: i64, gold_reward: i64) -> Self {
        Self {
            won: true,
            damage_dealt,
            damage_taken,
            xp_gained: xp_reward,
            gold_gained: gold_reward,
            arena_points_change: 0,
            level_up: false,
            new_level: 0,
            drops: Vec::new(),
        }
    }

    /// Soft loss: a tenth of the xp, no gold, no loot
    pub fn defeat(damage_dealt: i64, damage_taken: i64, xp_reward: i64) -> Self {
        Self {
            won: false,
            damage_dealt,
            damage_taken,
            xp_gained: (xp_reward as f64 * DEFEAT_XP_FACTOR).floor() as i64,
            gold_gained: 0,
            arena_points_change: 0,
            level_up: false,
            new_level: 0,
            drops: Vec::new(),
        }
    }

    /// Arena outcome; point movement is settled by the resolver
    pub fn arena(won: bool, damage_dealt: i64) -> Self {
        Self {
            won,
            damage_dealt,
            damage_taken: 0,
            xp_gained: 0,
            gold_gained: 0,
            arena_points_change: 0,
            level_up: false,
            new_level: 0,
            drops: Vec::new(),
        }
    }
}
