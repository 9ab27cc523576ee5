//! Difficulty tiers and drop tables
//!
//! Tables are content, not logic: they load from TOML like the rest of
//! the game's data files, and the engine only performs the draw.

use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::result::Drop;
use crate::core::error::{EngineError, Result};
use crate::core::types::MaterialId;

/// Battle difficulty tier, derived from the level gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Boss,
}

/// What kind of battle produced the loot roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootSource {
    Hunt,
    Arena,
}

/// Tier from `adversary_level - player_level`
///
/// The boss check outranks the hard check so a +5 gap is always a boss
/// fight even though it also clears the +3 bar.
pub fn difficulty_for(adversary_level: i64, player_level: i64) -> Difficulty {
    let diff = adversary_level - player_level;
    if diff <= -3 {
        Difficulty::Easy
    } else if diff >= 5 {
        Difficulty::Boss
    } else if diff >= 3 {
        Difficulty::Hard
    } else {
        Difficulty::Medium
    }
}

/// One drop-table row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropEntry {
    pub material: MaterialId,
    pub min_quantity: u32,
    pub max_quantity: u32,
}

/// External collaborator resolving `(source, difficulty)` to loot rows
pub trait DropTables {
    fn entries(&self, source: LootSource, difficulty: Difficulty) -> &[DropEntry];
}

/// Drop tables backed by a TOML data file
#[derive(Debug, Clone, Default)]
pub struct TomlDropTables {
    tables: HashMap<(LootSource, Difficulty), Vec<DropEntry>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTables {
    #[serde(default)]
    hunt: RawTiers,
    #[serde(default)]
    arena: RawTiers,
}

#[derive(Debug, Default, Deserialize)]
struct RawTiers {
    #[serde(default)]
    easy: Vec<DropEntry>,
    #[serde(default)]
    medium: Vec<DropEntry>,
    #[serde(default)]
    hard: Vec<DropEntry>,
    #[serde(default)]
    boss: Vec<DropEntry>,
}

impl TomlDropTables {
    /// Load tables from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawTables = toml::from_str(content)
            .map_err(|e| EngineError::DropTable(format!("invalid drop table TOML: {}", e)))?;

        let mut tables = HashMap::new();
        for (source, tiers) in [(LootSource::Hunt, raw.hunt), (LootSource::Arena, raw.arena)] {
            for (difficulty, entries) in [
                (Difficulty::Easy, tiers.easy),
                (Difficulty::Medium, tiers.medium),
                (Difficulty::Hard, tiers.hard),
                (Difficulty::Boss, tiers.boss),
            ] {
                for entry in &entries {
                    if entry.min_quantity > entry.max_quantity {
                        return Err(EngineError::DropTable(format!(
                            "{}: min_quantity {} above max_quantity {}",
                            entry.material, entry.min_quantity, entry.max_quantity
                        )));
                    }
                }
                tables.insert((source, difficulty), entries);
            }
        }
        Ok(Self { tables })
    }

    /// Compiled-in tables for tests and the demo binary
    pub fn builtin() -> Self {
        Self::parse(include_str!("../../data/drop_tables.toml"))
            .expect("builtin drop tables are valid")
    }
}

impl DropTables for TomlDropTables {
    fn entries(&self, source: LootSource, difficulty: Difficulty) -> &[DropEntry] {
        self.tables
            .get(&(source, difficulty))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Draw quantities for every row of the keyed table
pub fn roll_drops(
    tables: &impl DropTables,
    source: LootSource,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Vec<Drop> {
    tables
        .entries(source, difficulty)
        .iter()
        .map(|entry| Drop {
            material: entry.material.clone(),
            quantity: rng.gen_range(entry.min_quantity..=entry.max_quantity),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_difficulty_tiers() {
        // Scenario: adversary 10 vs player 5 is a boss fight.
        assert_eq!(difficulty_for(10, 5), Difficulty::Boss);
        assert_eq!(difficulty_for(8, 5), Difficulty::Hard);
        assert_eq!(difficulty_for(5, 5), Difficulty::Medium);
        assert_eq!(difficulty_for(6, 5), Difficulty::Medium);
        assert_eq!(difficulty_for(2, 5), Difficulty::Easy);
        assert_eq!(difficulty_for(3, 5), Difficulty::Medium);
    }

    #[test]
    fn test_builtin_tables_cover_hunt_tiers() {
        let tables = TomlDropTables::builtin();
        for difficulty in [
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Boss,
        ] {
            assert!(
                !tables.entries(LootSource::Hunt, difficulty).is_empty(),
                "missing hunt tier {:?}",
                difficulty
            );
        }
    }

    #[test]
    fn test_roll_quantities_stay_in_bounds() {
        let tables = TomlDropTables::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..100 {
            let drops = roll_drops(&tables, LootSource::Hunt, Difficulty::Boss, &mut rng);
            let entries = tables.entries(LootSource::Hunt, Difficulty::Boss);
            assert_eq!(drops.len(), entries.len());
            for (drop, entry) in drops.iter().zip(entries) {
                assert_eq!(drop.material, entry.material);
                assert!(drop.quantity >= entry.min_quantity);
                assert!(drop.quantity <= entry.max_quantity);
            }
        }
    }

    #[test]
    fn test_missing_table_rolls_nothing() {
        let tables = TomlDropTables::parse("").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(roll_drops(&tables, LootSource::Arena, Difficulty::Easy, &mut rng).is_empty());
    }

    #[test]
    fn test_inverted_quantity_bounds_rejected() {
        let toml = r#"
            [[hunt.easy]]
            material = "scrap"
            min_quantity = 3
            max_quantity = 1
        "#;
        assert!(matches!(
            TomlDropTables::parse(toml),
            Err(EngineError::DropTable(_))
        ));
    }
}
