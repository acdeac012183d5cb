pub mod loot;

use std::{fmt, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ScavengerError, ScavengerResult},
    map::GRID_SIZE,
};

use self::loot::Rarity;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Largest gc value a tier may name; doubled vault values must still fit an `i32` roll.
pub const MAX_GC_VALUE: u32 = (i32::MAX / 2) as u32;

pub const DIFFICULTIES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ScavengerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DIFFICULTIES
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ScavengerError::UnknownTier(s.to_string()))
    }
}

fn default_grid_size() -> i32 {
    GRID_SIZE
}

/// Parameters of one difficulty tier. Pure data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub name: String,
    pub energy_cost: u32,
    pub move_budget: u32,
    pub enemy_count: usize,
    pub loot_count: usize,
    /// Fraction of the grid area the generator tries to fill with walls.
    pub wall_density: f32,
    pub gc_min: u32,
    pub gc_max: u32,
    pub material_rarities: Vec<Rarity>,
    #[serde(default = "default_grid_size")]
    pub grid_size: i32,
}

impl DifficultyConfig {
    pub fn easy() -> Self {
        Self {
            name: "easy".to_string(),
            energy_cost: 10,
            move_budget: 35,
            enemy_count: 1,
            loot_count: 6,
            wall_density: 0.15,
            gc_min: 5,
            gc_max: 15,
            material_rarities: vec![Rarity::Common],
            grid_size: GRID_SIZE,
        }
    }

    pub fn medium() -> Self {
        Self {
            name: "medium".to_string(),
            energy_cost: 20,
            move_budget: 30,
            enemy_count: 2,
            loot_count: 8,
            wall_density: 0.2,
            gc_min: 10,
            gc_max: 30,
            material_rarities: vec![Rarity::Common, Rarity::Uncommon],
            grid_size: GRID_SIZE,
        }
    }

    pub fn hard() -> Self {
        Self {
            name: "hard".to_string(),
            energy_cost: 30,
            move_budget: 25,
            enemy_count: 3,
            loot_count: 12,
            wall_density: 0.25,
            gc_min: 20,
            gc_max: 50,
            material_rarities: vec![Rarity::Uncommon, Rarity::Rare, Rarity::Epic],
            grid_size: GRID_SIZE,
        }
    }

    pub fn validate(&self) -> ScavengerResult<()> {
        let reason = if self.name.trim().is_empty() {
            Some("name must not be empty")
        } else if self.move_budget == 0 {
            Some("move budget must be positive")
        } else if !(0.0..1.0).contains(&self.wall_density) {
            Some("wall density must lie in [0, 1)")
        } else if self.gc_min > self.gc_max {
            Some("gc_min exceeds gc_max")
        } else if self.gc_max > MAX_GC_VALUE {
            Some("gc_max is too large")
        } else if self.material_rarities.is_empty() {
            Some("at least one material rarity is required")
        } else if self.grid_size < 4 {
            Some("grid size must be at least 4")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ScavengerError::InvalidTier {
                tier: self.name.clone(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: DifficultyConfig,
    pub medium: DifficultyConfig,
    pub hard: DifficultyConfig,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DifficultyTable {
    pub fn builtin() -> Self {
        Self {
            easy: DifficultyConfig::easy(),
            medium: DifficultyConfig::medium(),
            hard: DifficultyConfig::hard(),
        }
    }

    pub fn get(&self, difficulty: Difficulty) -> &DifficultyConfig {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn from_json_str(raw: &str) -> ScavengerResult<Self> {
        let table: Self = serde_json::from_str(raw)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ScavengerResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> ScavengerResult<()> {
        for tier in DIFFICULTIES {
            self.get(tier).validate()?;
        }
        Ok(())
    }
}
