use bracket_geometry::prelude::Point;
use serde::Serialize;

use crate::{
    backend::Backend,
    data::loot::LootItem,
    map::{TileKind, cardinal_steps, manhattan},
};

use super::{Phase, RunResult, Scavenger};

/// Render-side copy of one cell. Holding one never gives access to engine state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub x: i32,
    pub y: i32,
    pub kind: TileKind,
    pub is_player: bool,
    pub is_enemy: bool,
    pub visible: bool,
    pub revealed: bool,
    pub collected: bool,
    pub locked: bool,
    pub is_adjacent: bool,
    pub is_exit: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub difficulty: String,
    pub result: Option<RunResult>,
    pub turns: u32,
    pub moves_remaining: u32,
    pub move_budget: u32,
    pub data_fragments: u32,
    pub banked_total: u64,
    pub loot: Vec<LootItem>,
}

impl<B: Backend> Scavenger<B> {
    pub fn tile_view(&self, x: i32, y: i32) -> Option<TileView> {
        let run = self.run.as_ref()?;
        let point = Point::new(x, y);
        let tile = run.grid.tile_at(point)?;
        Some(TileView {
            x,
            y,
            kind: tile.kind,
            is_player: point == run.player,
            is_enemy: self.ecs.enemy_at(point),
            visible: tile.visible,
            revealed: tile.revealed,
            collected: tile.collected,
            locked: tile.locked,
            is_adjacent: manhattan(point, run.player) == 1,
            is_exit: point == run.exit,
        })
    }

    /// Legal one-step destinations from the player's cell, in N/E/S/W order.
    pub fn adjacent_moves(&self) -> Vec<Point> {
        let Some(run) = self.run.as_ref().filter(|run| run.active) else {
            return Vec::new();
        };
        if self.phase != Phase::Playing || run.moves_remaining == 0 {
            return Vec::new();
        }
        cardinal_steps()
            .into_iter()
            .map(|step| run.player + step)
            .filter(|point| run.can_enter(*point))
            .collect()
    }

    pub fn summary(&self) -> Option<RunSummary> {
        let run = self.run.as_ref()?;
        Some(RunSummary {
            difficulty: run.difficulty.name.clone(),
            result: run.result,
            turns: run.turn,
            moves_remaining: run.moves_remaining,
            move_budget: run.move_budget,
            data_fragments: run.data_fragments,
            banked_total: run.banked_total(),
            loot: run.loot.clone(),
        })
    }
}
