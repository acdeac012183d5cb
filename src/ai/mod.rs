use bracket_geometry::prelude::Point;
use smallvec::SmallVec;

use crate::{
    dice::{RandomSource, shuffle},
    map::cardinal_steps,
};

pub type StepList = SmallVec<[Point; 6]>;

/// Unit steps an enemy at `from` tries, in order, when chasing `target`.
///
/// The axis with the larger gap comes first (horizontal on ties), then the
/// other axis, then every cardinal direction in random order. An enemy that
/// already stands on its target only has the random fallbacks.
pub fn pursuit_steps(from: Point, target: Point, rng: &mut dyn RandomSource) -> StepList {
    let mut steps = StepList::new();
    let dx = target.x - from.x;
    let dy = target.y - from.y;

    let horizontal = Point::new(dx.signum(), 0);
    let vertical = Point::new(0, dy.signum());
    let axes = if dx.abs() >= dy.abs() {
        [horizontal, vertical]
    } else {
        [vertical, horizontal]
    };
    for dir in axes {
        if dir != Point::zero() {
            steps.push(dir);
        }
    }

    let mut fallback = cardinal_steps();
    shuffle(rng, &mut fallback);
    for dir in fallback {
        if !steps.contains(&dir) {
            steps.push(dir);
        }
    }
    steps
}
