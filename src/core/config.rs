//! Engine configuration with documented constants
//!
//! Progression and regeneration tunables are collected here with
//! explanations of their purpose. Combat-session timing lives in
//! `combat::constants` next to the formulas that consume it.

/// Configuration for progression and regeneration
///
/// These values define the pacing of character growth and recovery.
/// Changing them changes the game's economy, so defaults are the
/// shipped balance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    // === REGENERATION ===
    /// Minutes of wall-clock time per point of HP regenerated
    ///
    /// At the default (2), a combatant missing 50 HP is back to full
    /// after 100 minutes away. Applied lazily on every read, so the
    /// cost is one subtraction, not a background job.
    pub hp_regen_minutes: i64,

    /// Minutes of wall-clock time per point of energy regenerated
    ///
    /// Energy returns twice as fast as HP (default 1), since energy
    /// gates activity while HP only gates combat.
    pub energy_regen_minutes: i64,

    // === LEVELING ===
    /// Attribute points granted per level gained
    pub stat_points_per_level: i64,

    /// Growth factor applied to the XP threshold after each level
    ///
    /// The next threshold is `floor(threshold * growth)`. At 1.5 the
    /// curve roughly doubles every two levels, which keeps mid-game
    /// levels meaningful without hard caps.
    pub xp_threshold_growth: f64,

    // === ARENA ===
    /// Base arena points awarded to the winner of a PvP attack
    pub arena_base_gain: i64,

    /// Arena points per level of difference between loser and winner
    ///
    /// Beating a higher-level opponent pays more; beating a lower-level
    /// one pays less, floored by `arena_min_gain`.
    pub arena_level_weight: i64,

    /// Minimum arena points the winner can receive
    pub arena_min_gain: i64,

    /// Minimum arena points the loser can forfeit
    pub arena_min_loss: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hp_regen_minutes: 2,
            energy_regen_minutes: 1,
            stat_points_per_level: 5,
            xp_threshold_growth: 1.5,
            arena_base_gain: 10,
            arena_level_weight: 2,
            arena_min_gain: 5,
            arena_min_loss: 3,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.hp_regen_minutes < 1 || self.energy_regen_minutes < 1 {
            return Err("Regen intervals must be at least one minute".into());
        }

        if self.xp_threshold_growth <= 1.0 {
            return Err(format!(
                "xp_threshold_growth ({}) must be > 1.0 or leveling never slows down",
                self.xp_threshold_growth
            ));
        }

        if self.stat_points_per_level < 0 {
            return Err("stat_points_per_level must not be negative".into());
        }

        if self.arena_min_gain <= self.arena_min_loss {
            return Err(format!(
                "arena_min_gain ({}) should exceed arena_min_loss ({})",
                self.arena_min_gain, self.arena_min_loss
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> Result<(), EngineConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_flat_growth_rejected() {
        let cfg = EngineConfig {
            xp_threshold_growth: 1.0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_regen_interval_rejected() {
        let cfg = EngineConfig {
            hp_regen_minutes: 0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
