use bracket_geometry::prelude::Point;

use super::{Grid, chebyshev};

pub const FOG_RADIUS: i32 = 2;

/// Recomputes visibility around `center`. Tiles inside the Chebyshev radius
/// become visible and revealed; everything else loses `visible` but keeps
/// `revealed`.
pub fn reveal_fog(grid: &mut Grid, center: Point) {
    grid.for_each_tile_mut(|point, tile| {
        let in_view = chebyshev(point, center) <= FOG_RADIUS;
        tile.visible = in_view;
        if in_view {
            tile.revealed = true;
        }
    });
}
