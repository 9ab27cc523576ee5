//! Combatant model - players, adversaries and pets
//!
//! Everything combat consumes is a snapshot: the store owns the
//! canonical player record, the catalog owns adversaries, and battles
//! normalize both into `Fighter` views.

pub mod adversary;
pub mod model;
pub mod pet;

pub use adversary::{catalog, Adversary};
pub use model::{Combatant, Fighter, Pool};
pub use pet::{Pet, PetAbility, PetAbilityKind, DEFAULT_ABILITY_COOLDOWN};
