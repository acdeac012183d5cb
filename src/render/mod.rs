use crate::{backend::Backend, map::TileKind, run::Scavenger, run::TileView};

/// Glyph for one projected cell. Unrevealed cells are blank and remembered
/// floor outside the current view is drawn as `,`.
pub fn glyph_for(view: &TileView) -> char {
    if view.is_player {
        return '@';
    }
    if !view.revealed {
        return ' ';
    }
    if view.visible && view.is_enemy {
        return 'E';
    }
    let kind = match view.kind {
        TileKind::LockedDoor if !view.locked => TileKind::Empty,
        kind if view.collected => match kind {
            TileKind::Exit => TileKind::Exit,
            _ => TileKind::Empty,
        },
        kind => kind,
    };
    if !view.visible && kind == TileKind::Empty {
        return ',';
    }
    kind.glyph()
}

/// One line per grid row.
pub fn frame_lines<B: Backend>(game: &Scavenger<B>) -> Vec<String> {
    let Some(run) = game.run() else {
        return Vec::new();
    };
    (0..run.grid.height)
        .map(|y| {
            (0..run.grid.width)
                .filter_map(|x| game.tile_view(x, y))
                .map(|view| glyph_for(&view))
                .collect()
        })
        .collect()
}

pub fn hud_line<B: Backend>(game: &Scavenger<B>) -> String {
    let Some(run) = game.run() else {
        return String::from("No active run");
    };
    let mut line = format!(
        "Turn {} · Moves {}/{} · Loot {} GC",
        run.turn,
        run.moves_remaining,
        run.move_budget,
        run.banked_total()
    );
    if run.data_fragments > 0 {
        line.push_str(&format!(" · Fragments {}", run.data_fragments));
    }
    if run.has_keycard {
        line.push_str(" · Keycard");
    }
    line
}
