use bracket_geometry::prelude::Point;

use crate::{dice::RandomSource, map::Grid};

/// Snapshot of the map an enemy turn is resolved against.
#[derive(Clone)]
pub struct PursuitContext {
    pub player_point: Point,
    pub width: i32,
    pub height: i32,
    passable: Vec<bool>,
}

impl PursuitContext {
    pub fn from_grid(grid: &Grid, player_point: Point) -> Self {
        let passable = grid
            .tiles()
            .iter()
            .map(|tile| !tile.blocks_move() && !tile.is_sealed())
            .collect::<Vec<bool>>();

        Self {
            player_point,
            width: grid.width,
            height: grid.height,
            passable,
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    pub fn is_passable(&self, point: Point) -> bool {
        if !self.in_bounds(point) {
            return false;
        }
        let idx = (point.y * self.width + point.x) as usize;
        self.passable.get(idx).copied().unwrap_or(false)
    }
}

/// The engine's random source, stored as a world resource.
pub struct Dice(pub Box<dyn RandomSource>);
