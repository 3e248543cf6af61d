//! One orchestrator component per battle mode.

mod action_confirm;
mod action_on_map;
mod action_on_squaddie;
mod computer_selector;
mod cutscene;
mod hud;
mod mission_loader;
mod mover;
mod phase;
mod player_selector;
mod player_target;

pub use action_confirm::ActionConfirm;
pub use action_on_map::SquaddieUsesActionOnMap;
pub use action_on_squaddie::SquaddieUsesActionOnSquaddie;
pub use computer_selector::ComputerSquaddieSelector;
pub use cutscene::CutscenePlayer;
pub use hud::PlayerHudController;
pub use mission_loader::MissionLoader;
pub use mover::SquaddieMover;
pub use phase::PhaseController;
pub use player_selector::PlayerSquaddieSelector;
pub use player_target::PlayerSquaddieTarget;

use battle_core::SquaddieAffiliation;

use super::BattleOrchestratorMode;

/// Selector mode for the team whose phase it is.
fn selector_for(affiliation: SquaddieAffiliation, autoplay_player: bool) -> BattleOrchestratorMode {
    if affiliation == SquaddieAffiliation::Player && !autoplay_player {
        BattleOrchestratorMode::PlayerSquaddieSelector
    } else {
        BattleOrchestratorMode::ComputerSquaddieSelector
    }
}
