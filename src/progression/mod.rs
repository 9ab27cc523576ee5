//! Progression - leveling, arena ladder and loot

pub mod loot;
pub mod resolver;

pub use loot::{
    difficulty_for, roll_drops, Difficulty, DropEntry, DropTables, LootSource, TomlDropTables,
};
pub use resolver::{apply_arena, apply_hunt, arena_points_delta, settle_levels, LevelOutcome};
