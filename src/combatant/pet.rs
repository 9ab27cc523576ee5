//! Companion pets and their battle abilities
//!
//! A combatant fields at most one active pet. The ability is a tagged
//! variant so the session dispatches on the kind, never on strings.

use serde::{Deserialize, Serialize};

/// Default ability cooldown for catalog pets, in turns
pub const DEFAULT_ABILITY_COOLDOWN: u8 = 3;

/// What a pet does when its ability is triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetAbilityKind {
    /// Restore a percentage of the owner's max hp
    Heal,
    /// Empowered strike scaling with the owner's strength
    StrengthBoost,
    /// Raise the owner's guard and land a light hit
    Shield,
    /// Claw attack scaling with the pet itself
    Generic,
}

/// A pet's single battle ability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PetAbility {
    pub kind: PetAbilityKind,
    /// Percentage knob for abilities that scale (heal %, strength %)
    pub value: f64,
    /// Turns until the ability can fire again
    pub cooldown: u8,
}

impl PetAbility {
    pub fn new(kind: PetAbilityKind, value: f64) -> Self {
        Self {
            kind,
            value,
            cooldown: DEFAULT_ABILITY_COOLDOWN,
        }
    }
}

/// An active companion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    pub strength_bonus: i64,
    pub ability: PetAbility,
}

impl Pet {
    pub fn new(name: impl Into<String>, strength_bonus: i64, ability: PetAbility) -> Self {
        Self {
            name: name.into(),
            strength_bonus,
            ability,
        }
    }
}
