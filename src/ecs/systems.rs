use bracket_geometry::prelude::Point;
use smallvec::SmallVec;
use specs::prelude::*;
use tracing::trace;

use crate::ai::pursuit_steps;

use super::{
    components::{EnemyId, Position},
    resources::{Dice, PursuitContext},
};

/// Moves every enemy one step toward the player, one at a time in id order.
/// A step may not land on a cell an earlier enemy ended its move on.
#[derive(Default)]
pub struct PursuitSystem;

impl<'a> System<'a> for PursuitSystem {
    type SystemData = (
        Entities<'a>,
        WriteStorage<'a, Position>,
        ReadStorage<'a, EnemyId>,
        ReadExpect<'a, PursuitContext>,
        WriteExpect<'a, Dice>,
    );

    fn run(&mut self, (entities, mut positions, ids, context, mut dice): Self::SystemData) {
        let mut order: Vec<(EnemyId, Entity)> = (&entities, &ids)
            .join()
            .map(|(entity, id)| (*id, entity))
            .collect();
        order.sort_unstable_by_key(|(id, _)| id.0);

        let mut settled: SmallVec<[Point; 8]> = SmallVec::new();
        for (id, entity) in order {
            let Some(pos) = positions.get_mut(entity) else {
                continue;
            };
            let from = pos.point;
            let destination = pursuit_steps(from, context.player_point, dice.0.as_mut())
                .into_iter()
                .map(|step| from + step)
                .find(|target| context.is_passable(*target) && !settled.contains(target));
            if let Some(target) = destination {
                pos.point = target;
                trace!(enemy = id.0, x = target.x, y = target.y, "enemy stepped");
            } else {
                trace!(enemy = id.0, "enemy held position");
            }
            settled.push(pos.point);
        }
    }
}
