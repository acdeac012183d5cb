use tracing::debug;

use crate::{
    data::loot::{LootItem, Rarity},
    dice::RandomSource,
    map::TileKind,
    run::RunState,
};

pub const FRAGMENT_COMBO_THRESHOLD: u32 = 3;

/// What stepping onto the player's current tile produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    Nothing,
    Collected { items: usize },
    Keycard,
    /// A vault door touched without a keycard; nothing changes.
    Sealed,
}

/// Claims whatever the tile under the player holds. A tile pays out once;
/// later calls on it are no-ops.
pub fn resolve_interaction(run: &mut RunState, rng: &mut dyn RandomSource) -> Interaction {
    let point = run.player;
    let (gc_min, gc_max) = (run.difficulty.gc_min, run.difficulty.gc_max);
    let Some(tile) = run.grid.tile_at_mut(point) else {
        return Interaction::Nothing;
    };
    if tile.collected {
        return Interaction::Nothing;
    }

    let before = run.loot.len();
    match tile.kind {
        TileKind::LootGc => {
            let value = tile
                .loot_value
                .unwrap_or_else(|| roll(rng, gc_min, gc_max));
            run.loot.push(LootItem::gc(value));
        }
        TileKind::LootMaterial => {
            let rarity = tile
                .loot_rarity
                .unwrap_or_else(|| pick_rarity(&run.difficulty.material_rarities, rng));
            run.loot.push(LootItem::material(rarity));
        }
        TileKind::LootData => {
            run.data_fragments += 1;
            run.loot.push(LootItem::data_fragment());
            if run.data_fragments >= FRAGMENT_COMBO_THRESHOLD {
                let bonus = roll(rng, gc_max, gc_max.saturating_mul(2));
                debug!(fragments = run.data_fragments, bonus, "fragment combo paid out");
                run.loot.push(LootItem::decryption_bonus(bonus));
            }
        }
        TileKind::Keycard => {
            tile.collected = true;
            run.has_keycard = true;
            debug!(x = point.x, y = point.y, "keycard picked up");
            return Interaction::Keycard;
        }
        TileKind::LockedDoor => {
            if !(run.has_keycard && tile.locked) {
                return Interaction::Sealed;
            }
            tile.locked = false;
            run.has_keycard = false;
            let value = tile
                .loot_value
                .unwrap_or_else(|| roll(rng, gc_min.saturating_mul(2), gc_max.saturating_mul(2)));
            debug!(x = point.x, y = point.y, value, "vault opened");
            run.loot.push(LootItem::vault_cache(value));
        }
        TileKind::Terminal => {
            run.loot.push(LootItem::terminal_bonus(roll(rng, gc_min, gc_max)));
        }
        TileKind::Empty | TileKind::Wall | TileKind::Exit => return Interaction::Nothing,
    }

    tile.collected = true;
    let items = run.loot.len() - before;
    debug!(kind = tile.kind.as_str(), items, "tile looted");
    Interaction::Collected { items }
}

fn roll(rng: &mut dyn RandomSource, min: u32, max: u32) -> u32 {
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
