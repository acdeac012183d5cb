pub mod components;
pub mod resources;
pub mod systems;

use bracket_geometry::prelude::Point;
use serde::Serialize;
use specs::prelude::{
    Builder, Dispatcher, DispatcherBuilder, Entity, Join, World as SpecsWorld, WorldExt,
};

use crate::{dice::RandomSource, map::Grid};

use self::{
    components::{EnemyId, Position},
    resources::{Dice, PursuitContext},
    systems::PursuitSystem,
};

/// Read-only copy of an enemy handed out to callers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Enemy {
    pub id: u32,
    pub x: i32,
    pub y: i32,
}

impl Enemy {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Enemy registry and the engine's random source, kept in a `specs` world.
pub struct EcsWorld {
    specs_world: SpecsWorld,
    dispatcher: Dispatcher<'static, 'static>,
    next_id: u32,
}

impl EcsWorld {
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        let mut specs_world = SpecsWorld::new();
        specs_world.register::<Position>();
        specs_world.register::<EnemyId>();
        specs_world.insert(Dice(rng));
        let dispatcher = DispatcherBuilder::new()
            .with(PursuitSystem::default(), "pursuit", &[])
            .build();

        Self {
            specs_world,
            dispatcher,
            next_id: 0,
        }
    }

    /// Runs `f` with exclusive access to the random source.
    pub fn with_dice<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut dyn RandomSource) -> R,
    {
        let mut dice = self.specs_world.write_resource::<Dice>();
        f(dice.0.as_mut())
    }

    pub fn spawn_enemy(&mut self, point: Point) -> Entity {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.specs_world
            .create_entity()
            .with(Position { point })
            .with(id)
            .build()
    }

    pub fn clear_enemies(&mut self) {
        self.specs_world.delete_all();
        self.specs_world.maintain();
        self.next_id = 0;
    }

    /// One enemy turn against the current map and player position.
    pub fn advance(&mut self, grid: &Grid, player_point: Point) {
        self.specs_world
            .insert(PursuitContext::from_grid(grid, player_point));
        self.dispatcher.dispatch(&self.specs_world);
        self.specs_world.maintain();
    }

    pub fn enemies(&self) -> Vec<Enemy> {
        let positions = self.specs_world.read_component::<Position>();
        let ids = self.specs_world.read_component::<EnemyId>();
        let mut enemies: Vec<Enemy> = (&ids, &positions)
            .join()
            .map(|(id, pos)| Enemy {
                id: id.0,
                x: pos.point.x,
                y: pos.point.y,
            })
            .collect();
        enemies.sort_unstable_by_key(|enemy| enemy.id);
        enemies
    }

    pub fn enemy_at(&self, point: Point) -> bool {
        let positions = self.specs_world.read_component::<Position>();
        let ids = self.specs_world.read_component::<EnemyId>();
        (&ids, &positions).join().any(|(_, pos)| pos.point == point)
    }
}
