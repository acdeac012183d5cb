use bracket_geometry::prelude::Point;
use tracing::{debug, trace};

use crate::{
    backend::{Backend, Effect},
    economy::{Interaction, resolve_interaction},
    map::{fog::reveal_fog, manhattan},
};

use super::{Direction, Phase, RunResult, Scavenger};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum MoveRejection {
    NotPlaying,
    Resolving,
    OutOfMoves,
    NotAdjacent,
    Blocked,
    Sealed,
}

impl<B: Backend> Scavenger<B> {
    /// Resolves one player turn toward `target`. Illegal moves are ignored
    /// and return `false`; the state is untouched in that case.
    pub fn move_player(&mut self, target: Point) -> bool {
        if let Err(reason) = self.check_move(target) {
            trace!(x = target.x, y = target.y, ?reason, "move rejected");
            return false;
        }

        self.resolving = true;
        let verdict = self.resolve_turn(target);
        if let Some(result) = verdict {
            self.finish(result);
        }
        self.resolving = false;
        true
    }

    pub fn step(&mut self, direction: Direction) -> bool {
        let Some(player) = self.run.as_ref().map(|run| run.player) else {
            return false;
        };
        self.move_player(player + direction.delta())
    }

    fn check_move(&self, target: Point) -> Result<(), MoveRejection> {
        if self.phase != Phase::Playing {
            return Err(MoveRejection::NotPlaying);
        }
        let Some(run) = self.run.as_ref().filter(|run| run.active) else {
            return Err(MoveRejection::NotPlaying);
        };
        if self.resolving {
            return Err(MoveRejection::Resolving);
        }
        if run.moves_remaining == 0 {
            return Err(MoveRejection::OutOfMoves);
        }
        if manhattan(run.player, target) != 1 {
            return Err(MoveRejection::NotAdjacent);
        }
        match run.grid.tile_at(target) {
            None => Err(MoveRejection::Blocked),
            Some(tile) if tile.blocks_move() => Err(MoveRejection::Blocked),
            Some(tile) if tile.is_sealed() && !run.has_keycard => Err(MoveRejection::Sealed),
            Some(_) => Ok(()),
        }
    }

    /// Move, reveal, loot, then either finish at the exit or let the enemies
    /// act and check for capture and exhaustion.
    fn resolve_turn(&mut self, target: Point) -> Option<RunResult> {
        let run = self.run.as_mut()?;
        run.player = target;
        run.moves_remaining -= 1;
        run.turn += 1;
        self.backend.play_effect(Effect::Move);
        reveal_fog(&mut run.grid, target);
        debug!(
            turn = run.turn,
            x = target.x,
            y = target.y,
            moves_remaining = run.moves_remaining,
            "player moved"
        );

        let interaction = self.ecs.with_dice(|dice| resolve_interaction(&mut *run, dice));
        if matches!(
            interaction,
            Interaction::Collected { .. } | Interaction::Keycard
        ) {
            self.backend.play_effect(Effect::Collect);
        }

        if run.player == run.exit {
            return Some(RunResult::Success);
        }

        self.ecs.advance(&run.grid, run.player);
        if self.ecs.enemy_at(run.player) {
            Some(RunResult::Caught)
        } else if run.moves_remaining == 0 {
            Some(RunResult::NoMoves)
        } else {
            None
        }
    }
}
