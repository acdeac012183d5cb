mod state;
mod turn;
mod view;

use tracing::{debug, info, trace};

pub use self::{
    state::{Direction, Phase, RunResult, RunState},
    view::{RunSummary, TileView},
};

use crate::{
    backend::{Backend, Effect},
    data::{Difficulty, DifficultyTable},
    dice::{BracketDice, RandomSource},
    error::ScavengerResult,
    ecs::{EcsWorld, Enemy},
    map::generator::{Layout, generate},
};

/// The Scavenger mini-game: lifecycle state machine plus the turn resolver.
///
/// `select` → `playing` on [`Scavenger::start_run`], `playing` → `result` when
/// a turn ends the run or on [`Scavenger::abandon_run`], and `result` →
/// `select` on [`Scavenger::cleanup`]. Calls made in the wrong phase are
/// ignored and return `false`.
pub struct Scavenger<B: Backend> {
    backend: B,
    table: DifficultyTable,
    ecs: EcsWorld,
    phase: Phase,
    run: Option<RunState>,
    /// Held while a move is being resolved; moves arriving meanwhile are dropped.
    resolving: bool,
}

impl<B: Backend> Scavenger<B> {
    /// Fails if any tier in `table` could not be generated or paid out.
    pub fn new(
        backend: B,
        table: DifficultyTable,
        rng: Box<dyn RandomSource>,
    ) -> ScavengerResult<Self> {
        table.validate()?;
        Ok(Self::assemble(backend, table, rng))
    }

    /// Built-in tiers and a seeded bracket generator.
    pub fn seeded(backend: B, seed: u64) -> Self {
        Self::assemble(
            backend,
            DifficultyTable::builtin(),
            Box::new(BracketDice::seeded(seed)),
        )
    }

    fn assemble(backend: B, table: DifficultyTable, rng: Box<dyn RandomSource>) -> Self {
        Self {
            backend,
            table,
            ecs: EcsWorld::new(rng),
            phase: Phase::Select,
            run: None,
            resolving: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn run(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn table(&self) -> &DifficultyTable {
        &self.table
    }

    pub fn enemies(&self) -> Vec<Enemy> {
        if self.run.is_none() {
            return Vec::new();
        }
        self.ecs.enemies()
    }

    /// Pays the tier's energy cost and starts a freshly generated run.
    pub fn start_run(&mut self, difficulty: Difficulty) -> bool {
        self.launch(difficulty, None)
    }

    /// Like [`Scavenger::start_run`] but plays a prepared layout.
    pub fn start_run_with_layout(&mut self, difficulty: Difficulty, layout: Layout) -> bool {
        self.launch(difficulty, Some(layout))
    }

    fn launch(&mut self, difficulty: Difficulty, layout: Option<Layout>) -> bool {
        if self.phase != Phase::Select {
            trace!(phase = ?self.phase, "start ignored outside select");
            return false;
        }
        let config = self.table.get(difficulty).clone();
        if !self.backend.check_and_deduct_energy(config.energy_cost) {
            debug!(tier = %difficulty, cost = config.energy_cost, "not enough energy to start");
            return false;
        }

        let layout = match layout {
            Some(layout) => layout,
            None => self.ecs.with_dice(|dice| generate(&config, dice)),
        };
        self.ecs.clear_enemies();
        for spawn in &layout.enemy_spawns {
            self.ecs.spawn_enemy(*spawn);
        }
        info!(
            tier = %difficulty,
            walls = layout.walls_placed,
            enemies = layout.enemy_spawns.len(),
            moves = config.move_budget,
            "run started"
        );

        self.run = Some(RunState::from_layout(config, layout));
        self.resolving = false;
        self.phase = Phase::Playing;
        true
    }

    /// Ends the current run immediately as abandoned. Loot on the current
    /// tile that has not been resolved yet stays unclaimed.
    pub fn abandon_run(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.resolving = false;
        self.finish(RunResult::Abandoned);
        true
    }

    /// Leaves the result screen and drops all run state.
    pub fn cleanup(&mut self) -> bool {
        if self.phase != Phase::Result {
            return false;
        }
        self.run = None;
        self.ecs.clear_enemies();
        self.resolving = false;
        self.phase = Phase::Select;
        true
    }

    /// Moves the run to `result`, paying out on success. Every terminal
    /// result is reported to the backend exactly once.
    fn finish(&mut self, result: RunResult) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        run.active = false;
        run.result = Some(result);
        self.phase = Phase::Result;

        let reward = if result == RunResult::Success {
            let total = run.banked_total();
            self.backend.credit_currency(total);
            self.backend.record_run_outcome(total, true);
            self.backend.play_effect(Effect::Success);
            if total > 0 {
                self.backend.play_effect(Effect::Reward);
            }
            total
        } else {
            self.backend.record_run_outcome(0, false);
            self.backend.play_effect(Effect::Fail);
            0
        };
        info!(result = %result, reward, turns = run.turn, "run finished");
    }
}

#[cfg(test)]
mod tests {
    use bracket_geometry::prelude::Point;

    use super::*;
    use crate::{
        backend::LocalLedger,
        data::DifficultyConfig,
        map::{Grid, Tile, TileKind},
    };

    fn open_layout(enemies: Vec<Point>) -> Layout {
        Layout::custom(Grid::new(10, 10), Point::new(0, 0), Point::new(9, 9), enemies)
    }

    fn playing(energy: u32) -> Scavenger<LocalLedger> {
        let mut game = Scavenger::seeded(LocalLedger::new(energy), 5);
        assert!(game.start_run_with_layout(Difficulty::Easy, open_layout(vec![])));
        game
    }

    #[test]
    fn invalid_table_is_refused_up_front() {
        let mut table = DifficultyTable::builtin();
        table.easy.grid_size = 0;
        let game = Scavenger::new(
            LocalLedger::new(10),
            table,
            Box::new(BracketDice::seeded(1)),
        );
        assert!(matches!(
            game,
            Err(crate::error::ScavengerError::InvalidTier { ref tier, .. }) if tier == "easy"
        ));
        assert!(
            Scavenger::new(
                LocalLedger::new(10),
                DifficultyTable::builtin(),
                Box::new(BracketDice::seeded(1)),
            )
            .is_ok()
        );
    }

    #[test]
    fn start_without_energy_changes_nothing() {
        let mut game = Scavenger::seeded(LocalLedger::new(5), 1);
        assert!(!game.start_run(Difficulty::Easy));
        assert_eq!(game.phase(), Phase::Select);
        assert!(game.run().is_none());
        assert_eq!(game.backend().energy(), 5);
        assert!(game.backend().history().is_empty());
    }

    #[test]
    fn start_deducts_energy_and_enters_playing() {
        let mut game = Scavenger::seeded(LocalLedger::new(25), 1);
        assert!(game.start_run(Difficulty::Medium));
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.backend().energy(), 5);
        let run = game.run().expect("run exists");
        assert!(run.active);
        assert_eq!(run.moves_remaining, DifficultyConfig::medium().move_budget);
        assert_eq!(run.player, run.start);
    }

    #[test]
    fn start_is_rejected_while_playing() {
        let mut game = playing(100);
        assert!(!game.start_run(Difficulty::Easy));
        assert_eq!(game.backend().energy(), 90);
    }

    #[test]
    fn abandon_records_a_failed_run() {
        let mut game = playing(10);
        assert!(game.abandon_run());
        assert_eq!(game.phase(), Phase::Result);
        let run = game.run().expect("run kept for result screen");
        assert_eq!(run.result, Some(RunResult::Abandoned));
        assert!(!run.active);
        let history = game.backend().history();
        assert_eq!(history.len(), 1);
        assert_eq!((history[0].reward, history[0].success), (0, false));
        assert_eq!(game.backend().balance(), 0);
        assert!(!game.abandon_run());
    }

    #[test]
    fn abandon_leaves_unvisited_loot_unclaimed() {
        let mut grid = Grid::new(10, 10);
        grid.set_tile(Point::new(1, 0), Tile::gc(9));
        let layout = Layout::custom(grid, Point::new(0, 0), Point::new(9, 9), vec![]);
        let mut game = Scavenger::seeded(LocalLedger::new(10), 2);
        assert!(game.start_run_with_layout(Difficulty::Easy, layout));
        assert!(game.abandon_run());
        let run = game.run().expect("run");
        assert!(run.loot.is_empty());
        assert!(
            run.grid
                .tile_at(Point::new(1, 0))
                .is_some_and(|tile| !tile.collected)
        );
    }

    #[test]
    fn cleanup_returns_to_select_and_clears_the_run() {
        let mut game = Scavenger::seeded(LocalLedger::new(10), 3);
        let layout = open_layout(vec![Point::new(5, 5)]);
        assert!(game.start_run_with_layout(Difficulty::Easy, layout));
        assert!(!game.cleanup());
        game.abandon_run();
        assert!(game.cleanup());
        assert_eq!(game.phase(), Phase::Select);
        assert!(game.run().is_none());
        assert!(game.enemies().is_empty());
    }

    #[test]
    fn a_second_run_starts_after_cleanup() {
        let mut game = playing(30);
        game.abandon_run();
        game.cleanup();
        assert!(game.start_run(Difficulty::Easy));
        assert_eq!(game.backend().energy(), 10);
    }

    #[test]
    fn moves_are_dropped_while_a_turn_is_resolving() {
        let mut game = playing(10);
        game.resolving = true;
        assert!(!game.move_player(Point::new(1, 0)));
        assert_eq!(game.run().map(|run| run.player), Some(Point::new(0, 0)));
        game.resolving = false;
        assert!(game.move_player(Point::new(1, 0)));
    }

    #[test]
    fn abandon_overrides_an_in_flight_turn() {
        let mut game = playing(10);
        game.resolving = true;
        assert!(game.abandon_run());
        assert!(!game.resolving);
        assert_eq!(game.phase(), Phase::Result);
    }

    #[test]
    fn generated_runs_spawn_configured_enemies_away_from_start() {
        let mut game = Scavenger::seeded(LocalLedger::new(30), 21);
        assert!(game.start_run(Difficulty::Hard));
        let start = game.run().expect("run").start;
        for enemy in game.enemies() {
            assert!(crate::map::manhattan(enemy.point(), start) >= 4);
        }
        let exit = game.run().expect("run").exit;
        assert_eq!(
            game.run().and_then(|run| run.grid.kind_at(exit)),
            Some(TileKind::Exit)
        );
    }
}
