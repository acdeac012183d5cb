use bracket_geometry::prelude::Point;
use specs::prelude::{Component, VecStorage};

#[derive(Clone, Debug)]
pub struct Position {
    pub point: Point,
}

impl Component for Position {
    type Storage = VecStorage<Self>;
}

/// Spawn-order identity of an enemy; enemies act in ascending id order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnemyId(pub u32);

impl Component for EnemyId {
    type Storage = VecStorage<Self>;
}
