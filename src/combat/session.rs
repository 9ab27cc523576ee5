//! Interactive battle session
//!
//! A timed, turn-based state machine: intro, alternating player and
//! enemy turns, terminal result. Cooperative timing - the driver calls
//! `poll` with the current wall clock and submits player actions; the
//! session itself never spawns timers. Input is gated by phase, and
//! nothing is persisted until the terminal `BattleResult` is taken.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    DEFEND_DAMAGE_FACTOR, ENEMY_TURN_DELAY_MS, GENERIC_PET_STRENGTH_FACTOR,
    HEAVY_ATTACK_ACCURACY, HEAVY_ATTACK_MULTIPLIER, INTRO_DISPLAY_MS, SHIELD_STRIKE_FACTOR,
    STRENGTH_BOOST_MULTIPLIER, TURN_TIME_LIMIT_MS,
};
use crate::combat::formula::damage;
use crate::combat::result::BattleResult;
use crate::combatant::{Adversary, Combatant, Fighter, Pet, PetAbilityKind};
use crate::core::error::{EngineError, Result};

/// Session phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Intro,
    PlayerTurn,
    EnemyTurn,
    Finished,
}

/// One player decision per turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack,
    HeavyAttack,
    Defend,
    PetAbility,
}

/// Log entry for session events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub turn: u32,
    pub kind: SessionEventKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEventKind {
    BattleStarted,
    PlayerStruck { damage: i64, heavy: bool },
    HeavyMissed,
    Defended,
    PetTriggered { kind: PetAbilityKind, damage: i64, healed: i64 },
    TurnSkipped,
    EnemyStruck { damage: i64, reduced: bool },
    BattleEnded { won: bool },
}

/// Ephemeral state of one interactive battle
///
/// Dropping the session before it finishes discards everything; the
/// single atomic write happens when the caller applies the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleSession {
    player: Fighter,
    pet: Option<Pet>,
    enemy: Fighter,
    xp_reward: i64,
    gold_reward: i64,

    phase: SessionPhase,
    /// When the current phase began (or was scheduled to begin)
    phase_since: DateTime<Utc>,

    player_hp: i64,
    enemy_hp: i64,
    player_start_hp: i64,
    enemy_start_hp: i64,

    defending: bool,
    pet_cooldown: u8,
    turn: u32,

    log: Vec<SessionEvent>,
    result: Option<BattleResult>,
}

impl BattleSession {
    /// Open a session against a catalog adversary
    pub fn start(
        player: &Combatant,
        pet: Option<Pet>,
        adversary: &Adversary,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        player.ensure_battle_ready()?;
        adversary.validate()?;

        let player = player.fighter();
        let enemy = adversary.fighter();
        let mut session = Self {
            player_hp: player.hp,
            enemy_hp: enemy.hp,
            player_start_hp: player.hp,
            enemy_start_hp: enemy.hp,
            player,
            pet,
            enemy,
            xp_reward: adversary.xp_reward,
            gold_reward: adversary.gold_reward,
            phase: SessionPhase::Intro,
            phase_since: now,
            defending: false,
            pet_cooldown: 0,
            turn: 1,
            log: Vec::new(),
            result: None,
        };
        session.log(
            SessionEventKind::BattleStarted,
            format!("{} challenges {}", session.player.name, session.enemy.name),
        );
        Ok(session)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Finished)
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn player_hp(&self) -> i64 {
        self.player_hp
    }

    pub fn enemy_hp(&self) -> i64 {
        self.enemy_hp
    }

    pub fn is_defending(&self) -> bool {
        self.defending
    }

    pub fn pet_cooldown(&self) -> u8 {
        self.pet_cooldown
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.log
    }

    /// The terminal result, once the session has finished
    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }

    /// Seconds left in the player's decision window, if it is open
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> Option<f64> {
        if self.phase != SessionPhase::PlayerTurn {
            return None;
        }
        let deadline = self.phase_since + Duration::milliseconds(TURN_TIME_LIMIT_MS);
        let left = (deadline - now).num_milliseconds() as f64 / 1_000.0;
        Some(left.max(0.0))
    }

    /// Advance every timer-driven transition that is due at `now`
    ///
    /// A stalled driver may owe several transitions at once (intro over,
    /// turn expired, enemy strike due), so this loops on scheduled
    /// boundary times rather than stamping everything with `now`.
    pub fn poll(&mut self, now: DateTime<Utc>, rng: &mut impl Rng) -> Vec<SessionEvent> {
        let mark = self.log.len();
        loop {
            let advanced = match self.phase {
                SessionPhase::Intro => {
                    let boundary = self.phase_since + Duration::milliseconds(INTRO_DISPLAY_MS);
                    if now >= boundary {
                        self.phase = SessionPhase::PlayerTurn;
                        self.phase_since = boundary;
                        true
                    } else {
                        false
                    }
                }
                SessionPhase::PlayerTurn => {
                    let deadline = self.phase_since + Duration::milliseconds(TURN_TIME_LIMIT_MS);
                    if now >= deadline {
                        self.log(
                            SessionEventKind::TurnSkipped,
                            format!("{} hesitates and loses the turn", self.player.name),
                        );
                        self.phase = SessionPhase::EnemyTurn;
                        self.phase_since = deadline;
                        true
                    } else {
                        false
                    }
                }
                SessionPhase::EnemyTurn => {
                    let due = self.phase_since + Duration::milliseconds(ENEMY_TURN_DELAY_MS);
                    if now >= due {
                        self.resolve_enemy_turn(due, rng);
                        true
                    } else {
                        false
                    }
                }
                SessionPhase::Finished => false,
            };
            if !advanced {
                break;
            }
        }
        self.log[mark..].to_vec()
    }

    /// Submit the player's action for this turn
    ///
    /// Rejected without state change when the phase is wrong, the
    /// window has expired, or the action's precondition fails; a
    /// rejected action can be retried once the blocker clears.
    pub fn submit(
        &mut self,
        action: PlayerAction,
        now: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> Result<Vec<SessionEvent>> {
        let mark = self.log.len();

        // Settle any overdue transition first; expiry beats the action.
        self.poll(now, rng);
        match self.phase {
            SessionPhase::PlayerTurn => {}
            SessionPhase::Finished => {
                return Err(EngineError::ActionUnavailable("battle already decided"))
            }
            SessionPhase::Intro | SessionPhase::EnemyTurn => {
                return Err(EngineError::ActionUnavailable("not the player's turn"))
            }
        }

        let dealt = match action {
            PlayerAction::Attack => {
                let dealt = damage(self.player.strength as f64, self.enemy.defense as f64, rng);
                self.log(
                    SessionEventKind::PlayerStruck {
                        damage: dealt,
                        heavy: false,
                    },
                    format!("{} hits {} for {}", self.player.name, self.enemy.name, dealt),
                );
                dealt
            }
            PlayerAction::HeavyAttack => {
                if rng.gen_bool(HEAVY_ATTACK_ACCURACY) {
                    let base = damage(self.player.strength as f64, self.enemy.defense as f64, rng);
                    let dealt = (base as f64 * HEAVY_ATTACK_MULTIPLIER).floor() as i64;
                    self.log(
                        SessionEventKind::PlayerStruck {
                            damage: dealt,
                            heavy: true,
                        },
                        format!(
                            "{} lands a heavy blow on {} for {}",
                            self.player.name, self.enemy.name, dealt
                        ),
                    );
                    dealt
                } else {
                    self.log(
                        SessionEventKind::HeavyMissed,
                        format!("{} swings wide and misses", self.player.name),
                    );
                    0
                }
            }
            PlayerAction::Defend => {
                if self.defending {
                    return Err(EngineError::ActionUnavailable("already defending"));
                }
                self.defending = true;
                self.log(
                    SessionEventKind::Defended,
                    format!("{} raises their guard", self.player.name),
                );
                0
            }
            PlayerAction::PetAbility => self.trigger_pet(rng)?,
        };

        self.enemy_hp = (self.enemy_hp - dealt).max(0);

        if self.enemy_hp == 0 {
            // Knockout skips the enemy turn entirely.
            self.finish(true);
        } else {
            self.phase = SessionPhase::EnemyTurn;
            self.phase_since = now;
        }

        Ok(self.log[mark..].to_vec())
    }

    /// Dispatch the active pet's ability. Returns damage to the enemy.
    fn trigger_pet(&mut self, rng: &mut impl Rng) -> Result<i64> {
        let pet = self.pet.clone().ok_or(EngineError::PetUnavailable)?;
        if self.pet_cooldown > 0 {
            return Err(EngineError::PetOnCooldown(self.pet_cooldown));
        }

        let ability = pet.ability;
        let strength = self.player.strength as f64;
        let enemy_defense = self.enemy.defense as f64;

        let (dealt, healed) = match ability.kind {
            PetAbilityKind::Heal => {
                let heal = (self.player.hp_max as f64 * ability.value / 100.0).floor() as i64;
                let applied = heal.min(self.player.hp_max - self.player_hp);
                self.player_hp += applied;
                (0, applied)
            }
            PetAbilityKind::StrengthBoost => {
                let boosted = strength * (1.0 + ability.value / 100.0);
                let base = damage(boosted, enemy_defense, rng);
                ((base as f64 * STRENGTH_BOOST_MULTIPLIER).floor() as i64, 0)
            }
            PetAbilityKind::Shield => {
                self.defending = true;
                let dealt = damage(
                    strength * SHIELD_STRIKE_FACTOR,
                    enemy_defense * SHIELD_STRIKE_FACTOR,
                    rng,
                );
                (dealt, 0)
            }
            PetAbilityKind::Generic => {
                let power = pet.strength_bonus as f64 * GENERIC_PET_STRENGTH_FACTOR
                    + strength * SHIELD_STRIKE_FACTOR;
                let dealt = damage(power, enemy_defense * SHIELD_STRIKE_FACTOR, rng);
                (dealt, 0)
            }
        };

        self.pet_cooldown = ability.cooldown;
        self.log(
            SessionEventKind::PetTriggered {
                kind: ability.kind,
                damage: dealt,
                healed,
            },
            format!("{} unleashes {}", pet.name, ability_label(ability.kind)),
        );
        Ok(dealt)
    }

    /// The enemy's automatic reply, fired from `poll`
    fn resolve_enemy_turn(&mut self, at: DateTime<Utc>, rng: &mut impl Rng) {
        let mut dealt = damage(self.enemy.strength as f64, self.player.defense as f64, rng);
        let reduced = self.defending;
        if reduced {
            dealt = (dealt as f64 * DEFEND_DAMAGE_FACTOR).floor() as i64;
        }

        self.player_hp = (self.player_hp - dealt).max(0);
        self.defending = false;
        self.pet_cooldown = self.pet_cooldown.saturating_sub(1);

        self.log(
            SessionEventKind::EnemyStruck {
                damage: dealt,
                reduced,
            },
            if reduced {
                format!(
                    "{} strikes through the guard for {}",
                    self.enemy.name, dealt
                )
            } else {
                format!("{} strikes {} for {}", self.enemy.name, self.player.name, dealt)
            },
        );

        self.turn += 1;

        if self.player_hp == 0 {
            self.finish(false);
        } else {
            self.phase = SessionPhase::PlayerTurn;
            self.phase_since = at;
        }
    }

    fn finish(&mut self, won: bool) {
        let damage_dealt = self.enemy_start_hp - self.enemy_hp;
        let damage_taken = self.player_start_hp - self.player_hp;

        let result = if won {
            BattleResult::victory(damage_dealt, damage_taken, self.xp_reward, self.gold_reward)
        } else {
            BattleResult::defeat(damage_dealt, damage_taken, self.xp_reward)
        };

        tracing::debug!(
            player = %self.player.name,
            enemy = %self.enemy.name,
            turns = self.turn,
            won,
            "interactive battle finished"
        );

        self.phase = SessionPhase::Finished;
        self.result = Some(result);
        self.log(
            SessionEventKind::BattleEnded { won },
            if won {
                format!("{} is victorious", self.player.name)
            } else {
                format!("{} falls in battle", self.player.name)
            },
        );
    }

    fn log(&mut self, kind: SessionEventKind, text: String) {
        self.log.push(SessionEvent {
            turn: self.turn,
            kind,
            text,
        });
    }
}

fn ability_label(kind: PetAbilityKind) -> &'static str {
    match kind {
        PetAbilityKind::Heal => "a mending glow",
        PetAbilityKind::StrengthBoost => "an empowered strike",
        PetAbilityKind::Shield => "a warding stance",
        PetAbilityKind::Generic => "a flurry of claws",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{catalog, PetAbility};
    use chrono::TimeZone;
    use rand::rngs::mock::StepRng;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    fn after_ms(ms: i64) -> DateTime<Utc> {
        t0() + Duration::milliseconds(ms)
    }

    fn player() -> Combatant {
        Combatant::new("Asta", t0())
    }

    /// StepRng at zero: accuracy rolls always hit, variance always
    /// samples the bottom of the band.
    fn hit_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    /// StepRng at max: accuracy rolls always miss.
    fn miss_rng() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn session() -> BattleSession {
        BattleSession::start(&player(), None, &catalog()[0], t0()).unwrap()
    }

    #[test]
    fn test_intro_gates_input() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Intro);

        let err = s.submit(PlayerAction::Attack, after_ms(500), &mut hit_rng());
        assert!(matches!(err, Err(EngineError::ActionUnavailable(_))));
        assert_eq!(s.phase(), SessionPhase::Intro);
    }

    #[test]
    fn test_intro_advances_after_display() {
        let mut s = session();
        s.poll(after_ms(1_500), &mut hit_rng());
        assert_eq!(s.phase(), SessionPhase::PlayerTurn);
        assert!(s.seconds_remaining(after_ms(1_500)).unwrap() > 7.9);
    }

    #[test]
    fn test_attack_then_enemy_reply() {
        let mut s = session();
        s.poll(after_ms(1_500), &mut hit_rng());

        let events = s
            .submit(PlayerAction::Attack, after_ms(2_000), &mut hit_rng())
            .unwrap();
        assert!(matches!(
            events[0].kind,
            SessionEventKind::PlayerStruck { heavy: false, .. }
        ));
        assert_eq!(s.phase(), SessionPhase::EnemyTurn);
        assert!(s.enemy_hp() < 40);

        // Enemy replies once its delay elapses.
        let events = s.poll(after_ms(3_000), &mut hit_rng());
        assert!(events
            .iter()
            .any(|e| matches!(e.kind, SessionEventKind::EnemyStruck { .. })));
        assert_eq!(s.phase(), SessionPhase::PlayerTurn);
        assert_eq!(s.turn(), 2);
        assert!(s.player_hp() < 100);
    }

    #[test]
    fn test_timeout_skips_turn() {
        let mut s = session();
        // 1.5s intro + 8s window both elapsed: skip is logged and the
        // enemy strike lands in the same poll.
        let events = s.poll(after_ms(1_500 + 8_000 + 900), &mut hit_rng());
        assert!(events
            .iter()
            .any(|e| matches!(e.kind, SessionEventKind::TurnSkipped)));
        assert!(events
            .iter()
            .any(|e| matches!(e.kind, SessionEventKind::EnemyStruck { .. })));
        assert_eq!(s.phase(), SessionPhase::PlayerTurn);
    }

    #[test]
    fn test_late_action_loses_to_expiry() {
        let mut s = session();
        s.poll(after_ms(1_500), &mut hit_rng());

        // The submission arrives after the 8s window: the skip fires
        // first and the action is rejected.
        let err = s.submit(PlayerAction::Attack, after_ms(1_500 + 8_500), &mut hit_rng());
        assert!(err.is_err());
        assert!(s
            .events()
            .iter()
            .any(|e| matches!(e.kind, SessionEventKind::TurnSkipped)));
    }

    #[test]
    fn test_heavy_attack_forced_miss_advances_turn() {
        let mut s = session();
        s.poll(after_ms(1_500), &mut hit_rng());

        let before = s.enemy_hp();
        let events = s
            .submit(PlayerAction::HeavyAttack, after_ms(2_000), &mut miss_rng())
            .unwrap();

        assert!(matches!(events[0].kind, SessionEventKind::HeavyMissed));
        assert_eq!(s.enemy_hp(), before);
        // Turn still advances to the enemy.
        assert_eq!(s.phase(), SessionPhase::EnemyTurn);
    }

    #[test]
    fn test_heavy_attack_hit_multiplies() {
        let mut s = session();
        s.poll(after_ms(1_500), &mut hit_rng());

        // Asta: strength 10 vs rat defense 3 -> raw 18.5, floor-of-band
        // 14, heavy 14*1.8 = 25.
        let events = s
            .submit(PlayerAction::HeavyAttack, after_ms(2_000), &mut hit_rng())
            .unwrap();
        assert!(matches!(
            events[0].kind,
            SessionEventKind::PlayerStruck { damage: 25, heavy: true }
        ));
    }

    #[test]
    fn test_defend_reduces_enemy_damage_once() {
        let mut s = session();
        s.poll(after_ms(1_500), &mut hit_rng());

        s.submit(PlayerAction::Defend, after_ms(2_000), &mut hit_rng())
            .unwrap();
        assert!(s.is_defending());

        // Rat strength 6 vs Asta defense 10: raw 7, floor-of-band 5,
        // defended 5*0.4 = 2.
        let events = s.poll(after_ms(3_000), &mut hit_rng());
        assert!(events.iter().any(|e| matches!(
            e.kind,
            SessionEventKind::EnemyStruck { damage: 2, reduced: true }
        )));
        assert!(!s.is_defending());

        // Next enemy strike is back to full force.
        s.submit(PlayerAction::Attack, after_ms(3_500), &mut hit_rng())
            .unwrap();
        if !s.is_finished() {
            let events = s.poll(after_ms(4_500), &mut hit_rng());
            assert!(events.iter().any(|e| matches!(
                e.kind,
                SessionEventKind::EnemyStruck { reduced: false, .. }
            )));
        }
    }

    #[test]
    fn test_double_defend_is_rejected_without_consuming_turn() {
        let mut s = session();
        s.poll(after_ms(1_500), &mut hit_rng());
        s.defending = true; // as if a shield ability had just fired

        let err = s.submit(PlayerAction::Defend, after_ms(2_000), &mut hit_rng());
        assert!(matches!(err, Err(EngineError::ActionUnavailable(_))));
        // Still the player's turn; another action goes through.
        assert_eq!(s.phase(), SessionPhase::PlayerTurn);
        assert!(s
            .submit(PlayerAction::Attack, after_ms(2_500), &mut hit_rng())
            .is_ok());
    }

    #[test]
    fn test_pet_requires_presence_and_cooldown() {
        let mut s = session();
        s.poll(after_ms(1_500), &mut hit_rng());
        assert!(matches!(
            s.submit(PlayerAction::PetAbility, after_ms(2_000), &mut hit_rng()),
            Err(EngineError::PetUnavailable)
        ));

        let pet = Pet::new("Moss", 4, PetAbility::new(PetAbilityKind::Heal, 25.0));
        let mut s = BattleSession::start(&player(), Some(pet), &catalog()[0], t0()).unwrap();
        s.poll(after_ms(1_500), &mut hit_rng());
        s.submit(PlayerAction::PetAbility, after_ms(2_000), &mut hit_rng())
            .unwrap();
        assert_eq!(s.pet_cooldown(), 3);

        // Enemy turn ticks the cooldown down by one...
        s.poll(after_ms(3_000), &mut hit_rng());
        assert_eq!(s.pet_cooldown(), 2);

        // ...and the ability stays locked until it reaches zero.
        assert!(matches!(
            s.submit(PlayerAction::PetAbility, after_ms(3_500), &mut hit_rng()),
            Err(EngineError::PetOnCooldown(2))
        ));
    }

    #[test]
    fn test_pet_heal_caps_at_max_hp() {
        let pet = Pet::new("Moss", 4, PetAbility::new(PetAbilityKind::Heal, 50.0));
        let mut s = BattleSession::start(&player(), Some(pet), &catalog()[0], t0()).unwrap();
        s.poll(after_ms(1_500), &mut hit_rng());

        // Player is at full hp: the heal applies nothing.
        let events = s
            .submit(PlayerAction::PetAbility, after_ms(2_000), &mut hit_rng())
            .unwrap();
        assert!(events.iter().any(|e| matches!(
            e.kind,
            SessionEventKind::PetTriggered { healed: 0, damage: 0, .. }
        )));
        assert_eq!(s.player_hp(), 100);
    }

    #[test]
    fn test_pet_shield_raises_guard_and_strikes() {
        let pet = Pet::new("Moss", 4, PetAbility::new(PetAbilityKind::Shield, 0.0));
        let mut s = BattleSession::start(&player(), Some(pet), &catalog()[0], t0()).unwrap();
        s.poll(after_ms(1_500), &mut hit_rng());

        let before = s.enemy_hp();
        s.submit(PlayerAction::PetAbility, after_ms(2_000), &mut hit_rng())
            .unwrap();
        assert!(s.is_defending());
        assert!(s.enemy_hp() < before);
    }

    #[test]
    fn test_pet_generic_scales_with_pet() {
        // power = 4*5 + 10*0.5 = 25 vs defense 1.5: raw 49.25, floor of
        // band = 39.
        let pet = Pet::new("Moss", 4, PetAbility::new(PetAbilityKind::Generic, 0.0));
        let mut s = BattleSession::start(&player(), Some(pet), &catalog()[0], t0()).unwrap();
        s.poll(after_ms(1_500), &mut hit_rng());

        let before = s.enemy_hp();
        s.submit(PlayerAction::PetAbility, after_ms(2_000), &mut hit_rng())
            .unwrap();
        assert_eq!(before - s.enemy_hp().max(0), 39.min(before));
    }

    #[test]
    fn test_knockout_skips_enemy_turn_and_terminates() {
        let mut strong = player();
        strong.strength = 500;
        let mut s = BattleSession::start(&strong, None, &catalog()[0], t0()).unwrap();
        s.poll(after_ms(1_500), &mut hit_rng());

        let events = s
            .submit(PlayerAction::Attack, after_ms(2_000), &mut hit_rng())
            .unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e.kind, SessionEventKind::BattleEnded { won: true })));
        assert!(s.is_finished());
        assert_eq!(s.enemy_hp(), 0);

        let result = s.result().unwrap();
        assert!(result.won);
        assert_eq!(result.damage_dealt, 40);
        assert_eq!(result.damage_taken, 0);
        assert_eq!(result.xp_gained, 25);
        assert_eq!(result.gold_gained, 8);

        // Terminal state never re-enters a turn.
        s.poll(after_ms(60_000), &mut hit_rng());
        assert!(s.is_finished());
        assert!(s
            .submit(PlayerAction::Attack, after_ms(61_000), &mut hit_rng())
            .is_err());
    }

    #[test]
    fn test_player_defeat_pays_partial_xp() {
        let mut weak = player();
        weak.hp = crate::combatant::Pool::full(5);
        weak.defense = 0;
        let brute = Adversary {
            name: "Brute".into(),
            level: 9,
            hp_max: 10_000,
            strength: 300,
            defense: 0,
            agility: 1,
            luck: 0,
            xp_reward: 240,
            gold_reward: 70,
        };
        let mut s = BattleSession::start(&weak, None, &brute, t0()).unwrap();
        s.poll(after_ms(1_500), &mut hit_rng());
        s.submit(PlayerAction::Attack, after_ms(2_000), &mut hit_rng())
            .unwrap();
        s.poll(after_ms(3_000), &mut hit_rng());

        assert!(s.is_finished());
        let result = s.result().unwrap();
        assert!(!result.won);
        assert_eq!(result.damage_taken, 5);
        assert_eq!(result.xp_gained, 24);
        assert_eq!(result.gold_gained, 0);
    }

    #[test]
    fn test_damage_bounded_by_starting_hp() {
        let mut s = session();
        let mut rng = hit_rng();
        let mut now = after_ms(1_500);
        s.poll(now, &mut rng);
        for _ in 0..60 {
            if s.is_finished() {
                break;
            }
            now = now + Duration::milliseconds(200);
            let _ = s.submit(PlayerAction::Attack, now, &mut rng);
            now = now + Duration::milliseconds(1_000);
            s.poll(now, &mut rng);
        }
        assert!(s.is_finished());
        let result = s.result().unwrap();
        assert!(result.damage_dealt <= 40);
        assert!(result.damage_taken <= 100);
    }
}
