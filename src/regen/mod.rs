//! Lazy time-based regeneration
//!
//! Recovery is reconciled on read instead of by a background job: the
//! elapsed wall-clock time since the last regen timestamp converts to
//! whole points, and the timestamp only resets when points actually
//! apply, so fractional progress is never thrown away. Re-running the
//! reconciliation inside the same minute window is a no-op.

use chrono::{DateTime, Utc};

use crate::combatant::Combatant;
use crate::core::config::config;
use crate::core::error::Result;
use crate::core::types::CombatantId;
use crate::store::CombatantStore;

/// Points applied by one reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegenOutcome {
    pub hp_restored: i64,
    pub energy_restored: i64,
}

impl RegenOutcome {
    pub fn is_noop(&self) -> bool {
        self.hp_restored == 0 && self.energy_restored == 0
    }
}

/// Reconcile elapsed time into hp and energy
///
/// Idempotent within a window and monotonic: a resource never drops
/// and never exceeds its max. Negative elapsed time (clock skew) is
/// treated as zero.
pub fn apply_regen(combatant: &mut Combatant, now: DateTime<Utc>) -> RegenOutcome {
    let cfg = config();
    let mut outcome = RegenOutcome::default();

    let hp_minutes = (now - combatant.last_hp_regen).num_minutes().max(0);
    let hp_points = hp_minutes / cfg.hp_regen_minutes;
    if hp_points > 0 && combatant.hp.current < combatant.hp.max {
        outcome.hp_restored = combatant.hp.restore(hp_points);
        combatant.last_hp_regen = now;
    }

    let energy_minutes = (now - combatant.last_energy_regen).num_minutes().max(0);
    let energy_points = energy_minutes / cfg.energy_regen_minutes;
    if energy_points > 0 && combatant.energy.current < combatant.energy.max {
        outcome.energy_restored = combatant.energy.restore(energy_points);
        combatant.last_energy_regen = now;
    }

    if !outcome.is_noop() {
        tracing::debug!(
            combatant = %combatant.name,
            hp = outcome.hp_restored,
            energy = outcome.energy_restored,
            "regeneration applied"
        );
    }

    outcome
}

/// Load a combatant with regeneration settled up to `now`
///
/// The read path of the persistence boundary: reconcile against a
/// fresh record, then return the refreshed snapshot. Safe to call
/// speculatively (e.g. once a minute while a client is active).
pub fn refresh(
    store: &mut impl CombatantStore,
    id: CombatantId,
    now: DateTime<Utc>,
) -> Result<Combatant> {
    store.update(id, &mut |c| {
        apply_regen(c, now);
    })?;
    store.load(id)
}
