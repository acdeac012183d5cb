use bracket_geometry::prelude::Point;
use tracing::debug;

use crate::{
    data::{DifficultyConfig, loot::Rarity},
    dice::RandomSource,
};

use super::{
    Grid, Tile, TileKind, connectivity::try_place_wall, fog::reveal_fog, manhattan,
};

pub const EXIT_MIN_DISTANCE: i32 = 8;
pub const ENEMY_MIN_DISTANCE: i32 = 4;
pub const WALL_ATTEMPT_CAP: usize = 200;
pub const MAX_DATA_TILES: usize = 3;

/// A generated (or hand-built) map ready to be played.
#[derive(Clone, Debug)]
pub struct Layout {
    pub grid: Grid,
    pub start: Point,
    pub exit: Point,
    pub enemy_spawns: Vec<Point>,
    pub walls_placed: usize,
}

impl Layout {
    /// Wraps a hand-built grid: marks the exit tile and lights the fog around `start`.
    pub fn custom(mut grid: Grid, start: Point, exit: Point, enemy_spawns: Vec<Point>) -> Self {
        grid.set_kind(exit, TileKind::Exit);
        reveal_fog(&mut grid, start);
        let walls_placed = grid.count(TileKind::Wall);
        Self {
            grid,
            start,
            exit,
            enemy_spawns,
            walls_placed,
        }
    }
}

/// How a loot budget splits across tile kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LootMix {
    pub gc: usize,
    pub material: usize,
    pub data: usize,
}

impl LootMix {
    pub fn for_budget(loot_count: usize) -> Self {
        let gc = loot_count / 2;
        let material = loot_count * 3 / 10;
        let data = loot_count.saturating_sub(gc + material).min(MAX_DATA_TILES);
        Self { gc, material, data }
    }
}

pub fn generate(config: &DifficultyConfig, rng: &mut dyn RandomSource) -> Layout {
    let size = config.grid_size;
    let mut grid = Grid::new(size, size);

    let border = grid.border_points();
    let start = border[rng.pick_index(border.len())];
    let exit = pick_exit(&border, start, rng);

    let wall_quota = (grid.area() as f32 * config.wall_density).floor() as usize;
    let mut walls_placed = 0;
    let mut attempts = 0;
    while walls_placed < wall_quota && attempts < WALL_ATTEMPT_CAP {
        attempts += 1;
        let cells: Vec<Point> = free_cells(&grid, start)
            .into_iter()
            .filter(|point| *point != exit)
            .collect();
        if cells.is_empty() {
            break;
        }
        let point = cells[rng.pick_index(cells.len())];
        if let Some(next) = try_place_wall(&grid, point, start, exit) {
            grid = next;
            walls_placed += 1;
        }
    }
    if walls_placed < wall_quota {
        debug!(walls_placed, wall_quota, attempts, "wall quota not reached");
    }

    grid.set_kind(exit, TileKind::Exit);

    let mix = LootMix::for_budget(config.loot_count);
    for _ in 0..mix.gc {
        let value = roll_value(rng, config.gc_min, config.gc_max);
        place(&mut grid, start, rng, Tile::gc(value));
    }
    for _ in 0..mix.material {
        let rarity = pick_rarity(&config.material_rarities, rng);
        place(&mut grid, start, rng, Tile::material(rarity));
    }
    for _ in 0..mix.data {
        place(&mut grid, start, rng, Tile::of_kind(TileKind::LootData));
    }

    place(&mut grid, start, rng, Tile::of_kind(TileKind::Terminal));

    if place(&mut grid, start, rng, Tile::of_kind(TileKind::Keycard)) {
        let value = roll_value(
            rng,
            config.gc_min.saturating_mul(2),
            config.gc_max.saturating_mul(2),
        );
        place(&mut grid, start, rng, Tile::locked_door(Some(value)));
    }

    let mut enemy_spawns = Vec::with_capacity(config.enemy_count);
    for slot in 0..config.enemy_count {
        let candidates: Vec<Point> = free_cells(&grid, start)
            .into_iter()
            .filter(|point| {
                manhattan(*point, start) >= ENEMY_MIN_DISTANCE && !enemy_spawns.contains(point)
            })
            .collect();
        if candidates.is_empty() {
            debug!(slot, requested = config.enemy_count, "no cell left for enemy");
            continue;
        }
        enemy_spawns.push(candidates[rng.pick_index(candidates.len())]);
    }

    reveal_fog(&mut grid, start);

    Layout {
        grid,
        start,
        exit,
        enemy_spawns,
        walls_placed,
    }
}

fn pick_exit(border: &[Point], start: Point, rng: &mut dyn RandomSource) -> Point {
    let far: Vec<Point> = border
        .iter()
        .copied()
        .filter(|point| manhattan(*point, start) >= EXIT_MIN_DISTANCE)
        .collect();
    if !far.is_empty() {
        return far[rng.pick_index(far.len())];
    }
    let others: Vec<Point> = border.iter().copied().filter(|point| *point != start).collect();
    if others.is_empty() {
        return start;
    }
    others[rng.pick_index(others.len())]
}

/// Plain floor cells other than the player start.
fn free_cells(grid: &Grid, start: Point) -> Vec<Point> {
    grid.points_of_kind(TileKind::Empty)
        .into_iter()
        .filter(|point| *point != start)
        .collect()
}

fn random_free_cell(grid: &Grid, start: Point, rng: &mut dyn RandomSource) -> Option<Point> {
    let cells = free_cells(grid, start);
    if cells.is_empty() {
        return None;
    }
    Some(cells[rng.pick_index(cells.len())])
}

fn place(grid: &mut Grid, start: Point, rng: &mut dyn RandomSource, tile: Tile) -> bool {
    match random_free_cell(grid, start, rng) {
        Some(point) => {
            grid.set_tile(point, tile);
            true
        }
        None => false,
    }
}

fn roll_value(rng: &mut dyn RandomSource, min: u32, max: u32) -> u32 {
    let min = i32::try_from(min).unwrap_or(i32::MAX);
    let max = i32::try_from(max).unwrap_or(i32::MAX);
    u32::try_from(rng.roll_inclusive(min, max)).unwrap_or(0)
}

fn pick_rarity(rarities: &[Rarity], rng: &mut dyn RandomSource) -> Rarity {
    rarities
        .get(rng.pick_index(rarities.len()))
        .copied()
        .unwrap_or(Rarity::Common)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        data::{DIFFICULTIES, DifficultyTable},
        dice::BracketDice,
        map::connectivity::is_reachable,
    };

    fn generate_seeded(config: &DifficultyConfig, seed: u64) -> Layout {
        let mut dice = BracketDice::seeded(seed);
        generate(config, &mut dice)
    }

    #[test]
    fn loot_mix_follows_half_and_thirty_percent_split() {
        assert_eq!(LootMix::for_budget(6), LootMix { gc: 3, material: 1, data: 2 });
        assert_eq!(LootMix::for_budget(8), LootMix { gc: 4, material: 2, data: 2 });
        assert_eq!(LootMix::for_budget(12), LootMix { gc: 6, material: 3, data: 3 });
        assert_eq!(LootMix::for_budget(20), LootMix { gc: 10, material: 6, data: 3 });
    }

    #[test]
    fn same_seed_produces_identical_layouts() {
        let config = DifficultyConfig::medium();
        let a = generate_seeded(&config, 1234);
        let b = generate_seeded(&config, 1234);
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.start, b.start);
        assert_eq!(a.exit, b.exit);
        assert_eq!(a.enemy_spawns, b.enemy_spawns);
    }

    #[test]
    fn start_and_exit_sit_on_the_border_far_apart() {
        for seed in [1_u64, 2, 3, 50, 999] {
            let layout = generate_seeded(&DifficultyConfig::easy(), seed);
            let border = layout.grid.border_points();
            assert!(border.contains(&layout.start));
            assert!(border.contains(&layout.exit));
            assert!(
                manhattan(layout.start, layout.exit) >= EXIT_MIN_DISTANCE,
                "seed={seed}: start {:?} exit {:?}",
                layout.start,
                layout.exit
            );
            assert_eq!(layout.grid.kind_at(layout.exit), Some(TileKind::Exit));
            assert_eq!(layout.grid.kind_at(layout.start), Some(TileKind::Empty));
        }
    }

    #[test]
    fn every_tier_places_its_special_tiles() {
        let table = DifficultyTable::builtin();
        for tier in DIFFICULTIES {
            let config = table.get(tier);
            let layout = generate_seeded(config, 77);
            let mix = LootMix::for_budget(config.loot_count);
            let grid = &layout.grid;
            assert_eq!(grid.count(TileKind::LootGc), mix.gc, "{tier}");
            assert_eq!(grid.count(TileKind::LootMaterial), mix.material, "{tier}");
            assert_eq!(grid.count(TileKind::LootData), mix.data, "{tier}");
            assert_eq!(grid.count(TileKind::Terminal), 1, "{tier}");
            assert_eq!(grid.count(TileKind::Keycard), 1, "{tier}");
            assert_eq!(grid.count(TileKind::LockedDoor), 1, "{tier}");
            assert_eq!(grid.count(TileKind::Exit), 1, "{tier}");
        }
    }

    #[test]
    fn loot_attributes_come_from_the_tier() {
        let config = DifficultyConfig::hard();
        let layout = generate_seeded(&config, 4242);
        for tile in layout.grid.tiles() {
            match tile.kind {
                TileKind::LootGc => {
                    let value = tile.loot_value.expect("gc tiles carry a value");
                    assert!((config.gc_min..=config.gc_max).contains(&value));
                }
                TileKind::LootMaterial => {
                    let rarity = tile.loot_rarity.expect("material tiles carry a rarity");
                    assert!(config.material_rarities.contains(&rarity));
                }
                TileKind::LockedDoor => {
                    let value = tile.loot_value.expect("doors carry a value");
                    assert!((config.gc_min * 2..=config.gc_max * 2).contains(&value));
                    assert!(tile.locked);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn enemies_keep_their_distance_from_the_start() {
        for seed in 0..40_u64 {
            let config = DifficultyConfig::hard();
            let layout = generate_seeded(&config, seed);
            assert!(layout.enemy_spawns.len() <= config.enemy_count);
            for spawn in &layout.enemy_spawns {
                assert!(manhattan(*spawn, layout.start) >= ENEMY_MIN_DISTANCE);
                assert_eq!(layout.grid.kind_at(*spawn), Some(TileKind::Empty));
            }
        }
    }

    #[test]
    fn crowded_grid_leaves_enemy_slots_unfilled() {
        let mut config = DifficultyConfig::easy();
        config.grid_size = 4;
        config.loot_count = 0;
        config.enemy_count = 20;
        config.wall_density = 0.0;
        let layout = generate_seeded(&config, 9);
        assert!(layout.enemy_spawns.len() < 20);
        for spawn in &layout.enemy_spawns {
            assert!(manhattan(*spawn, layout.start) >= ENEMY_MIN_DISTANCE);
        }
    }

    #[test]
    fn fog_starts_around_the_player() {
        let layout = generate_seeded(&DifficultyConfig::easy(), 31);
        let start_tile = layout.grid.tile_at(layout.start).expect("in bounds");
        assert!(start_tile.visible && start_tile.revealed);
        let exit_tile = layout.grid.tile_at(layout.exit).expect("in bounds");
        assert!(!exit_tile.visible);
    }

    #[test]
    fn custom_layout_marks_exit_and_fog() {
        let layout = Layout::custom(Grid::new(6, 6), Point::new(0, 0), Point::new(5, 5), vec![]);
        assert_eq!(layout.grid.kind_at(Point::new(5, 5)), Some(TileKind::Exit));
        assert!(layout.grid.tile_at(Point::new(2, 2)).is_some_and(|tile| tile.revealed));
    }

    #[test]
    fn dense_tier_stops_at_the_attempt_cap_and_stays_connected() {
        let mut config = DifficultyConfig::easy();
        config.wall_density = 0.95;
        let quota = (100.0_f32 * config.wall_density).floor() as usize;
        for seed in [3_u64, 17, 256] {
            let layout = generate_seeded(&config, seed);
            assert!(layout.walls_placed < quota, "seed={seed}");
            assert!(layout.walls_placed <= WALL_ATTEMPT_CAP);
            assert_eq!(layout.grid.count(TileKind::Wall), layout.walls_placed);
            assert!(is_reachable(&layout.grid, layout.start, layout.exit), "seed={seed}");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(96))]

        #[test]
        fn generated_exit_is_always_reachable(seed in any::<u64>(), tier_idx in 0_usize..3) {
            let config = DifficultyTable::builtin().get(DIFFICULTIES[tier_idx]).clone();
            let layout = generate_seeded(&config, seed);
            prop_assert!(
                is_reachable(&layout.grid, layout.start, layout.exit),
                "seed={seed}, tier={} lost its start-exit path",
                config.name
            );
            prop_assert!(layout.walls_placed <= (layout.grid.area() as f32 * config.wall_density) as usize);
        }
    }
}
