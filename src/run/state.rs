use std::fmt;

use bracket_geometry::prelude::Point;
use serde::{Deserialize, Serialize};

use crate::{
    data::{DifficultyConfig, loot::LootItem},
    map::{Grid, generator::Layout},
};

/// Lifecycle of the mini-game screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Select,
    Playing,
    Result,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunResult {
    Success,
    Caught,
    NoMoves,
    Abandoned,
}

impl RunResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunResult::Success => "success",
            RunResult::Caught => "caught",
            RunResult::NoMoves => "no_moves",
            RunResult::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn delta(&self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
        }
    }
}

/// Everything that belongs to one run. Enemies live in the ECS world.
#[derive(Clone, Debug)]
pub struct RunState {
    pub grid: Grid,
    pub player: Point,
    /// Where the player entered; fixed for the run.
    pub start: Point,
    pub exit: Point,
    pub moves_remaining: u32,
    pub move_budget: u32,
    pub turn: u32,
    pub loot: Vec<LootItem>,
    pub has_keycard: bool,
    pub data_fragments: u32,
    pub difficulty: DifficultyConfig,
    pub result: Option<RunResult>,
    pub active: bool,
}

impl RunState {
    pub fn from_layout(difficulty: DifficultyConfig, layout: Layout) -> Self {
        Self {
            grid: layout.grid,
            player: layout.start,
            start: layout.start,
            exit: layout.exit,
            moves_remaining: difficulty.move_budget,
            move_budget: difficulty.move_budget,
            turn: 0,
            loot: Vec::new(),
            has_keycard: false,
            data_fragments: 0,
            difficulty,
            result: None,
            active: true,
        }
    }

    /// Whether the player could stand on `point` right now, ignoring adjacency.
    pub fn can_enter(&self, point: Point) -> bool {
        match self.grid.tile_at(point) {
            Some(tile) => !tile.blocks_move() && (!tile.is_sealed() || self.has_keycard),
            None => false,
        }
    }

    /// Currency the run pays out if it ends in success.
    pub fn banked_total(&self) -> u64 {
        self.loot
            .iter()
            .filter(|item| item.kind.is_currency())
            .map(|item| u64::from(item.value))
            .sum()
    }
}
