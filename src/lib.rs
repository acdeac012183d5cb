//! Scavenger: a turn-based grid dungeon crawl played as a mining mini-game.
//!
//! A run is generated from a difficulty tier, played one orthogonal step at a
//! time against a move budget and pursuing enemies, and banked through a
//! [`backend::Backend`] when the player reaches the exit.

pub mod ai;
pub mod backend;
pub mod data;
pub mod dice;
pub mod ecs;
pub mod economy;
pub mod error;
pub mod map;
pub mod render;
pub mod run;
pub mod scripted_input;

pub use backend::{Backend, Effect, LocalLedger};
pub use data::{Difficulty, DifficultyConfig, DifficultyTable};
pub use dice::{BracketDice, RandomSource};
pub use error::{ScavengerError, ScavengerResult};
pub use run::{Direction, Phase, RunResult, RunSummary, Scavenger};
