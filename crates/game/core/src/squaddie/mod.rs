//! Squaddies: static templates, their battlefield instances and turns.

mod affiliation;
mod battle_squaddie;
mod template;
mod turn;

pub use affiliation::SquaddieAffiliation;
pub use battle_squaddie::BattleSquaddie;
pub use template::{SquaddieDefenses, SquaddieTemplate};
pub use turn::{SquaddieTurn, TurnError};
