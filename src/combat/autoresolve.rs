//! Instantaneous battle resolution
//!
//! Quick attacks resolve in one call: a bounded exchange of rounds for
//! hunts, a weighted roll for arena attacks. No side effects; callers
//! feed the outcome to the progression resolver.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::combat::constants::AUTORESOLVE_ROUND_BUDGET;
use crate::combat::formula::{damage, win_chance};
use crate::combat::result::BattleResult;
use crate::combatant::{Adversary, Combatant, Fighter};
use crate::core::error::{EngineError, Result};

/// Raw outcome of a round-based exchange
#[derive(Debug, Clone, Copy)]
pub struct AutoresolveOutcome {
    pub victory: bool,
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub rounds: u32,
}

/// Trade blows until a knockout or the round budget runs dry
///
/// Initiative: the attacker strikes first iff their agility is at least
/// the defender's LEVEL. This is a coarse heuristic, not a real
/// initiative comparison; it is kept verbatim for behavioral
/// compatibility with the live game.
pub fn resolve_rounds(
    attacker: &Fighter,
    defender: &Fighter,
    rng: &mut impl Rng,
) -> AutoresolveOutcome {
    let attacker_start = attacker.hp;
    let defender_start = defender.hp;
    let mut attacker_hp = attacker_start;
    let mut defender_hp = defender_start;

    let attacker_first = attacker.agility >= defender.level;
    let mut rounds = 0;

    while rounds < AUTORESOLVE_ROUND_BUDGET && attacker_hp > 0 && defender_hp > 0 {
        rounds += 1;

        if attacker_first {
            defender_hp -= damage(attacker.strength as f64, defender.defense as f64, rng);
            if defender_hp <= 0 {
                break;
            }
            attacker_hp -= damage(defender.strength as f64, attacker.defense as f64, rng);
        } else {
            attacker_hp -= damage(defender.strength as f64, attacker.defense as f64, rng);
            if attacker_hp <= 0 {
                break;
            }
            defender_hp -= damage(attacker.strength as f64, defender.defense as f64, rng);
        }
    }

    AutoresolveOutcome {
        victory: defender_hp <= 0,
        damage_dealt: defender_start - defender_hp.max(0),
        damage_taken: attacker_start - attacker_hp.max(0),
        rounds,
    }
}

/// Quick PvE hunt against a catalog adversary
pub fn resolve_hunt(
    player: &Combatant,
    adversary: &Adversary,
    rng: &mut impl Rng,
) -> Result<BattleResult> {
    player.ensure_battle_ready()?;
    adversary.validate()?;

    let outcome = resolve_rounds(&player.fighter(), &adversary.fighter(), rng);
    tracing::debug!(
        player = %player.name,
        adversary = %adversary.name,
        rounds = outcome.rounds,
        victory = outcome.victory,
        "hunt resolved"
    );

    Ok(if outcome.victory {
        BattleResult::victory(
            outcome.damage_dealt,
            outcome.damage_taken,
            adversary.xp_reward,
            adversary.gold_reward,
        )
    } else {
        BattleResult::defeat(
            outcome.damage_dealt,
            outcome.damage_taken,
            adversary.xp_reward,
        )
    })
}

/// Quick PvP arena attack
///
/// The challenger's victory is a single roll against the win chance.
/// The defender never counter-attacks in this path, so the challenger
/// takes no damage either way.
pub fn resolve_arena(
    challenger: &Combatant,
    defender: &Combatant,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<BattleResult> {
    challenger.ensure_battle_ready()?;
    defender.validate()?;

    if let Some(until) = defender.protected_until {
        if defender.is_protected(now) {
            return Err(EngineError::TargetProtected(until));
        }
    }

    let chance = win_chance(challenger.attack_profile(), defender.defense_profile());
    let roll = rng.gen_range(0.0..100.0);
    let won = roll < chance;

    let damage_dealt = if won {
        damage(challenger.strength as f64, defender.defense as f64, rng).min(defender.hp.current)
    } else {
        0
    };

    tracing::debug!(
        challenger = %challenger.name,
        defender = %defender.name,
        chance,
        roll,
        won,
        "arena attack resolved"
    );

    Ok(BattleResult::arena(won, damage_dealt))
}
