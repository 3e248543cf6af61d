use battle_core::{HexCoordinate, SquaddieAffiliation};
use battle_runtime::{BattleState, MapDisplay};

/// Renders the map as text and logs it at debug level whenever it changes.
///
/// `P` player, `A` ally, `E` enemy, `?` unaffiliated, `#` impassable,
/// `.` open ground. Odd rows are indented half a tile.
#[derive(Debug, Default)]
pub struct TextMapDisplay {
    last_frame: String,
}

impl TextMapDisplay {
    pub fn render(state: &BattleState) -> String {
        let map = &state.map;
        let mut frame = String::new();
        for r in 0..map.height() as i32 {
            if r % 2 == 1 {
                frame.push(' ');
            }
            for q in 0..map.width() as i32 {
                let coordinate = HexCoordinate::new(q, r);
                frame.push(Self::glyph(state, &coordinate));
                frame.push(' ');
            }
            frame.truncate(frame.trim_end().len());
            frame.push('\n');
        }
        frame
    }

    fn glyph(state: &BattleState, coordinate: &HexCoordinate) -> char {
        if let Some(battle_squaddie_id) = state.map.squaddie_at(coordinate) {
            return match state.repository.affiliation_of(battle_squaddie_id) {
                Ok(SquaddieAffiliation::Player) => 'P',
                Ok(SquaddieAffiliation::Ally) => 'A',
                Ok(SquaddieAffiliation::Enemy) => 'E',
                Ok(SquaddieAffiliation::None) | Err(_) => '?',
            };
        }
        if state.map.is_passable(coordinate) { '.' } else { '#' }
    }
}

impl MapDisplay for TextMapDisplay {
    fn draw(&mut self, state: &BattleState) {
        let frame = Self::render(state);
        if frame != self.last_frame {
            tracing::debug!(target: "battle::map", "\n{frame}");
            self.last_frame = frame;
        }
    }
}
