pub mod connectivity;
pub mod fog;
pub mod generator;

use bracket_geometry::prelude::Point;
use bracket_pathfinding::prelude::DistanceAlg;
use serde::{Deserialize, Serialize};

use crate::data::loot::Rarity;

pub const GRID_SIZE: i32 = 10;

/// The four unit steps, in a fixed order.
pub fn cardinal_steps() -> [Point; 4] {
    [
        Point::new(0, -1),
        Point::new(1, 0),
        Point::new(0, 1),
        Point::new(-1, 0),
    ]
}

pub fn manhattan(a: Point, b: Point) -> i32 {
    DistanceAlg::Manhattan.distance2d(a, b) as i32
}

pub fn chebyshev(a: Point, b: Point) -> i32 {
    DistanceAlg::Chebyshev.distance2d(a, b) as i32
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Empty,
    Wall,
    Exit,
    LootGc,
    LootMaterial,
    LootData,
    Keycard,
    LockedDoor,
    Terminal,
}

impl TileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Empty => "empty",
            TileKind::Wall => "wall",
            TileKind::Exit => "exit",
            TileKind::LootGc => "loot_gc",
            TileKind::LootMaterial => "loot_material",
            TileKind::LootData => "loot_data",
            TileKind::Keycard => "keycard",
            TileKind::LockedDoor => "locked_door",
            TileKind::Terminal => "terminal",
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            TileKind::Empty => '.',
            TileKind::Wall => '#',
            TileKind::Exit => 'X',
            TileKind::LootGc => '$',
            TileKind::LootMaterial => 'm',
            TileKind::LootData => 'd',
            TileKind::Keycard => 'k',
            TileKind::LockedDoor => 'D',
            TileKind::Terminal => 'T',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    /// Seen at least once this run.
    pub revealed: bool,
    /// Inside the fog radius after the latest move.
    pub visible: bool,
    pub collected: bool,
    pub locked: bool,
    pub loot_value: Option<u32>,
    pub loot_rarity: Option<Rarity>,
}

impl Default for Tile {
    fn default() -> Self {
        Tile::empty()
    }
}

impl Tile {
    pub fn of_kind(kind: TileKind) -> Self {
        Self {
            kind,
            revealed: false,
            visible: false,
            collected: false,
            locked: false,
            loot_value: None,
            loot_rarity: None,
        }
    }

    pub fn empty() -> Self {
        Self::of_kind(TileKind::Empty)
    }

    pub fn wall() -> Self {
        Self::of_kind(TileKind::Wall)
    }

    pub fn gc(value: u32) -> Self {
        Self {
            loot_value: Some(value),
            ..Self::of_kind(TileKind::LootGc)
        }
    }

    pub fn material(rarity: Rarity) -> Self {
        Self {
            loot_rarity: Some(rarity),
            ..Self::of_kind(TileKind::LootMaterial)
        }
    }

    pub fn locked_door(value: Option<u32>) -> Self {
        Self {
            locked: true,
            loot_value: value,
            ..Self::of_kind(TileKind::LockedDoor)
        }
    }

    pub fn blocks_move(&self) -> bool {
        self.kind == TileKind::Wall
    }

    /// A vault door that has not been opened yet.
    pub fn is_sealed(&self) -> bool {
        self.kind == TileKind::LockedDoor && self.locked
    }
}

/// Row-major square of tiles. Walls never change once generation finishes.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::default(); size],
        }
    }

    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    pub fn idx(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some((point.y * self.width + point.x) as usize)
        } else {
            None
        }
    }

    pub fn point_of(&self, idx: usize) -> Point {
        let idx = idx as i32;
        Point::new(idx % self.width, idx / self.width)
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    pub fn tile_at(&self, point: Point) -> Option<&Tile> {
        self.idx(point).map(|idx| &self.tiles[idx])
    }

    pub fn tile_at_mut(&mut self, point: Point) -> Option<&mut Tile> {
        self.idx(point).map(|idx| &mut self.tiles[idx])
    }

    pub fn set_tile(&mut self, point: Point, tile: Tile) {
        if let Some(idx) = self.idx(point) {
            self.tiles[idx] = tile;
        }
    }

    /// Changes a tile's kind while keeping its fog state.
    pub fn set_kind(&mut self, point: Point, kind: TileKind) {
        if let Some(tile) = self.tile_at_mut(point) {
            tile.kind = kind;
        }
    }

    pub fn kind_at(&self, point: Point) -> Option<TileKind> {
        self.tile_at(point).map(|tile| tile.kind)
    }

    pub fn is_wall(&self, point: Point) -> bool {
        self.tile_at(point).map_or(true, Tile::blocks_move)
    }

    /// In bounds, not a wall and not a sealed vault door.
    pub fn is_passable(&self, point: Point) -> bool {
        self.tile_at(point)
            .map_or(false, |tile| !tile.blocks_move() && !tile.is_sealed())
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn for_each_tile_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(Point, &mut Tile),
    {
        let width = self.width;
        for (idx, tile) in self.tiles.iter_mut().enumerate() {
            let idx = idx as i32;
            f(Point::new(idx % width, idx / width), tile);
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.tiles.len()).map(|idx| self.point_of(idx))
    }

    pub fn points_of_kind(&self, kind: TileKind) -> Vec<Point> {
        self.points()
            .filter(|point| self.kind_at(*point) == Some(kind))
            .collect()
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| tile.kind == kind).count()
    }

    pub fn border_points(&self) -> Vec<Point> {
        self.points()
            .filter(|point| {
                point.x == 0 || point.y == 0 || point.x == self.width - 1 || point.y == self.height - 1
            })
            .collect()
    }
}
