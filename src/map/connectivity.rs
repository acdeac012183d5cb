use std::collections::VecDeque;

use bracket_geometry::prelude::Point;
use bracket_pathfinding::prelude::{Algorithm2D, BaseMap};
use smallvec::SmallVec;

use super::{Grid, TileKind, cardinal_steps};

impl BaseMap for Grid {
    fn is_opaque(&self, _idx: usize) -> bool {
        false
    }

    /// Non-wall, in-bounds 4-neighbours. Doors count as open ground here: the
    /// reachability guarantee is about walls only.
    fn get_available_exits(&self, idx: usize) -> SmallVec<[(usize, f32); 10]> {
        let mut exits = SmallVec::new();
        let point = self.point_of(idx);
        for step in cardinal_steps() {
            let dest = point + step;
            if let Some(dest_idx) = self.idx(dest) {
                if !self.is_wall(dest) {
                    exits.push((dest_idx, 1.0));
                }
            }
        }
        exits
    }
}

impl Algorithm2D for Grid {
    fn dimensions(&self) -> Point {
        Point::new(self.width, self.height)
    }
}

/// Breadth-first reachability over non-wall cells. Never mutates the grid.
pub fn is_reachable(grid: &Grid, start: Point, end: Point) -> bool {
    let (Some(start_idx), Some(end_idx)) = (grid.idx(start), grid.idx(end)) else {
        return false;
    };
    if grid.is_wall(end) {
        return false;
    }
    if start_idx == end_idx {
        return true;
    }

    let mut visited = vec![false; grid.area()];
    let mut frontier = VecDeque::new();
    visited[start_idx] = true;
    frontier.push_back(start_idx);

    while let Some(idx) = frontier.pop_front() {
        for (next, _) in grid.get_available_exits(idx) {
            if next == end_idx {
                return true;
            }
            if !visited[next] {
                visited[next] = true;
                frontier.push_back(next);
            }
        }
    }
    false
}

/// Returns a copy of `grid` with a wall at `point`, or `None` when the cell
/// is not plain floor, is one of the endpoints, or the wall would cut the
/// `start`..`exit` path.
pub fn try_place_wall(grid: &Grid, point: Point, start: Point, exit: Point) -> Option<Grid> {
    if point == start || point == exit || grid.kind_at(point)? != TileKind::Empty {
        return None;
    }
    let mut candidate = grid.clone();
    candidate.set_kind(point, TileKind::Wall);
    is_reachable(&candidate, start, exit).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Tile;

    fn wall_column(grid: &mut Grid, x: i32, gap: Option<i32>) {
        for y in 0..grid.height {
            if Some(y) != gap {
                grid.set_kind(Point::new(x, y), TileKind::Wall);
            }
        }
    }

    #[test]
    fn open_grid_is_reachable_corner_to_corner() {
        let grid = Grid::new(6, 6);
        assert!(is_reachable(&grid, Point::new(0, 0), Point::new(5, 5)));
    }

    #[test]
    fn solid_wall_column_disconnects() {
        let mut grid = Grid::new(6, 6);
        wall_column(&mut grid, 3, None);
        assert!(!is_reachable(&grid, Point::new(0, 0), Point::new(5, 5)));
    }

    #[test]
    fn single_gap_reconnects() {
        let mut grid = Grid::new(6, 6);
        wall_column(&mut grid, 3, Some(4));
        assert!(is_reachable(&grid, Point::new(0, 0), Point::new(5, 5)));
    }

    #[test]
    fn diagonal_gaps_do_not_count() {
        let mut grid = Grid::new(3, 3);
        grid.set_kind(Point::new(1, 0), TileKind::Wall);
        grid.set_kind(Point::new(0, 1), TileKind::Wall);
        assert!(!is_reachable(&grid, Point::new(0, 0), Point::new(2, 2)));
    }

    #[test]
    fn locked_doors_do_not_break_reachability() {
        let mut grid = Grid::new(5, 1);
        grid.set_tile(Point::new(2, 0), Tile::locked_door(None));
        assert!(is_reachable(&grid, Point::new(0, 0), Point::new(4, 0)));
    }

    #[test]
    fn reachability_check_leaves_grid_untouched() {
        let mut grid = Grid::new(6, 6);
        wall_column(&mut grid, 2, Some(0));
        let before = grid.clone();
        let _ = is_reachable(&grid, Point::new(0, 5), Point::new(5, 5));
        assert_eq!(grid, before);
    }

    #[test]
    fn try_place_wall_rejects_cutting_the_last_gap() {
        let mut grid = Grid::new(6, 6);
        wall_column(&mut grid, 3, Some(4));
        let start = Point::new(0, 0);
        let exit = Point::new(5, 5);
        assert!(try_place_wall(&grid, Point::new(3, 4), start, exit).is_none());
        assert_eq!(grid.kind_at(Point::new(3, 4)), Some(TileKind::Empty));
    }

    #[test]
    fn try_place_wall_returns_new_grid_and_leaves_input_alone() {
        let grid = Grid::new(6, 6);
        let start = Point::new(0, 0);
        let exit = Point::new(5, 5);
        let placed = try_place_wall(&grid, Point::new(2, 2), start, exit).expect("wall fits");
        assert_eq!(placed.kind_at(Point::new(2, 2)), Some(TileKind::Wall));
        assert_eq!(grid.kind_at(Point::new(2, 2)), Some(TileKind::Empty));
    }

    #[test]
    fn try_place_wall_refuses_endpoints_and_occupied_cells() {
        let mut grid = Grid::new(6, 6);
        let start = Point::new(0, 0);
        let exit = Point::new(5, 5);
        grid.set_kind(Point::new(1, 1), TileKind::Terminal);
        assert!(try_place_wall(&grid, start, start, exit).is_none());
        assert!(try_place_wall(&grid, exit, start, exit).is_none());
        assert!(try_place_wall(&grid, Point::new(1, 1), start, exit).is_none());
        assert!(try_place_wall(&grid, Point::new(9, 9), start, exit).is_none());
    }
}
