//! Progression resolution
//!
//! Converts a finished battle into persistent deltas: hp write-down,
//! xp and gold, the leveling loop, arena points, loot, and the battle
//! log entry. Exactly one read-modify-write per combatant per battle;
//! a failed write is retried from the same `BattleResult`, never by
//! re-simulating the fight.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::combat::result::BattleResult;
use crate::combatant::{Adversary, Combatant};
use crate::core::config::config;
use crate::core::error::Result;
use crate::core::types::CombatantId;
use crate::progression::loot::{difficulty_for, roll_drops, DropTables, LootSource};
use crate::store::{BattleLogEntry, CombatantStore, Opponent};

/// Levels settled during one application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutcome {
    pub levels_gained: i64,
    pub new_level: i64,
    pub points_gained: i64,
}

/// Drain banked xp into levels
///
/// Each level consumes the current threshold, grants stat points and
/// grows the threshold by the configured factor. Loops so one large xp
/// award can jump several levels.
pub fn settle_levels(combatant: &mut Combatant) -> LevelOutcome {
    let cfg = config();
    let mut levels_gained = 0;
    let mut points_gained = 0;

    while combatant.xp >= combatant.xp_to_next_level {
        combatant.xp -= combatant.xp_to_next_level;
        combatant.level += 1;
        combatant.available_points += cfg.stat_points_per_level;
        combatant.xp_to_next_level =
            (combatant.xp_to_next_level as f64 * cfg.xp_threshold_growth).floor() as i64;
        levels_gained += 1;
        points_gained += cfg.stat_points_per_level;
    }

    if levels_gained > 0 {
        tracing::info!(
            combatant = %combatant.name,
            new_level = combatant.level,
            levels_gained,
            "level up"
        );
    }

    LevelOutcome {
        levels_gained,
        new_level: combatant.level,
        points_gained,
    }
}

/// Arena point movement: `(winner_gain, loser_loss)`
///
/// The gain scales with how far above the winner the loser stood,
/// floored so every win and loss moves the ladder at least a little.
pub fn arena_points_delta(winner_level: i64, loser_level: i64) -> (i64, i64) {
    let cfg = config();
    let level_diff = loser_level - winner_level;
    let gain = (cfg.arena_base_gain + level_diff * cfg.arena_level_weight).max(cfg.arena_min_gain);
    let loss = (gain / 2).max(cfg.arena_min_loss);
    (gain, loss)
}

/// Apply a PvE battle result to the persisted player
///
/// Returns the completed `BattleResult` with loot and level fields
/// filled in, after the store write and battle-log append succeed.
pub fn apply_hunt(
    store: &mut impl CombatantStore,
    player_id: CombatantId,
    adversary: &Adversary,
    result: &BattleResult,
    tables: &impl DropTables,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Result<BattleResult> {
    let mut applied = result.clone();
    let mut level_outcome = None;
    let mut drops = Vec::new();

    store.update(player_id, &mut |c| {
        let level_before = c.level;

        c.hp.deplete(result.damage_taken);
        c.xp += result.xp_gained;
        c.gold += result.gold_gained;
        c.total_battles += 1;
        if result.won {
            c.wins += 1;
            let difficulty = difficulty_for(adversary.level, level_before);
            drops = roll_drops(tables, LootSource::Hunt, difficulty, rng);
        }
        level_outcome = Some(settle_levels(c));
    })?;

    // update() ran exactly once, so the outcome is always present.
    if let Some(outcome) = level_outcome {
        applied.level_up = outcome.levels_gained > 0;
        applied.new_level = outcome.new_level;
    }
    applied.drops = drops;

    store.append_battle_log(BattleLogEntry {
        attacker: player_id,
        defender: Opponent::Adversary(adversary.name.clone()),
        is_pvp: false,
        winner: if applied.won { Some(player_id) } else { None },
        damage_dealt: applied.damage_dealt,
        damage_taken: applied.damage_taken,
        xp: applied.xp_gained,
        gold: applied.gold_gained,
        arena_delta: 0,
        fought_at: now,
    })?;

    Ok(applied)
}

/// Apply a PvP arena result to both persisted combatants
///
/// One read-modify-write per side. The defender's hp drops by the
/// damage dealt only when the challenger won; the defender never
/// counter-attacked, so the challenger's hp is untouched either way.
/// Arena points floor at zero.
pub fn apply_arena(
    store: &mut impl CombatantStore,
    challenger_id: CombatantId,
    defender_id: CombatantId,
    result: &BattleResult,
    now: DateTime<Utc>,
) -> Result<BattleResult> {
    let challenger_level = store.load(challenger_id)?.level;
    let defender_level = store.load(defender_id)?.level;

    let (gain, loss) = if result.won {
        arena_points_delta(challenger_level, defender_level)
    } else {
        arena_points_delta(defender_level, challenger_level)
    };

    let mut applied = result.clone();
    applied.arena_points_change = if result.won { gain } else { -loss };

    store.update(challenger_id, &mut |c| {
        c.total_battles += 1;
        if result.won {
            c.wins += 1;
            c.arena_points += gain;
        } else {
            c.arena_points = (c.arena_points - loss).max(0);
        }
    })?;

    store.update(defender_id, &mut |c| {
        c.total_battles += 1;
        if result.won {
            c.hp.deplete(result.damage_dealt);
            c.arena_points = (c.arena_points - loss).max(0);
        } else {
            c.wins += 1;
            c.arena_points += gain;
        }
    })?;

    store.append_battle_log(BattleLogEntry {
        attacker: challenger_id,
        defender: Opponent::Player(defender_id),
        is_pvp: true,
        winner: Some(if result.won { challenger_id } else { defender_id }),
        damage_dealt: applied.damage_dealt,
        damage_taken: applied.damage_taken,
        xp: 0,
        gold: 0,
        arena_delta: applied.arena_points_change,
        fought_at: now,
    })?;

    Ok(applied)
}
