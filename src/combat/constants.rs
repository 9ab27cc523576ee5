//! Combat tunables - all battle-facing values in one place

// Damage formula
pub const ATTACK_POWER_FACTOR: f64 = 2.0;
pub const DEFENSE_REDUCTION_FACTOR: f64 = 0.5;
pub const DAMAGE_VARIANCE_MIN: f64 = 0.8;
pub const DAMAGE_VARIANCE_MAX: f64 = 1.2;

// Win chance clamp - no battle is ever certain
pub const WIN_CHANCE_MIN: f64 = 5.0;
pub const WIN_CHANCE_MAX: f64 = 95.0;

// Autoresolve
pub const AUTORESOLVE_ROUND_BUDGET: u32 = 20;

// Interactive session timing (wall clock)
pub const INTRO_DISPLAY_MS: i64 = 1_500;
pub const TURN_TIME_LIMIT_MS: i64 = 8_000;
pub const ENEMY_TURN_DELAY_MS: i64 = 900;

// Player actions
pub const HEAVY_ATTACK_ACCURACY: f64 = 0.7;
pub const HEAVY_ATTACK_MULTIPLIER: f64 = 1.8;
pub const DEFEND_DAMAGE_FACTOR: f64 = 0.4;

// Pet ability formulas
pub const STRENGTH_BOOST_MULTIPLIER: f64 = 1.5;
pub const SHIELD_STRIKE_FACTOR: f64 = 0.5;
pub const GENERIC_PET_STRENGTH_FACTOR: f64 = 5.0;

// Soft loss - a defeat still pays a sliver of xp, never gold
pub const DEFEAT_XP_FACTOR: f64 = 0.1;
