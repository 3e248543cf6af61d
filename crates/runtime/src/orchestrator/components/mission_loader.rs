use tracing::info;

use crate::error::{Result, RuntimeError};
use crate::orchestrator::{
    BattleOrchestratorMode, OrchestratorComponent, OrchestratorContext, RecommendedStateChanges,
    UiControlSettings,
};
use crate::state::BattleState;

/// Checks the loaded mission before the first phase begins.
///
/// Content is parsed by `battle-content` before the battle starts; this mode
/// only confirms that every squaddie on the map is known.
#[derive(Debug, Default)]
pub struct MissionLoader {
    loaded: bool,
}

impl OrchestratorComponent for MissionLoader {
    fn name(&self) -> &'static str {
        "MissionLoader"
    }

    fn update(&mut self, state: &mut BattleState, _context: &mut OrchestratorContext<'_>) -> Result<()> {
        if self.loaded {
            return Ok(());
        }
        for (battle_squaddie_id, _) in state.map.squaddies() {
            if state.repository.get_squaddie_by_battle_id(battle_squaddie_id).is_err() {
                return Err(RuntimeError::invariant(
                    self.name(),
                    format!("squaddie {battle_squaddie_id} is on the map but not in the repository"),
                ));
            }
        }
        info!(
            target: "battle::orchestrator",
            mission = %state.mission_name,
            squaddies = state.map.squaddies().count(),
            "mission loaded"
        );
        self.loaded = true;
        Ok(())
    }

    fn ui_control_settings(&self, _state: &BattleState) -> UiControlSettings {
        UiControlSettings::new(false, false)
    }

    fn has_completed(&self, _state: &BattleState) -> bool {
        self.loaded
    }

    fn recommend_state_changes(&self, _state: &BattleState) -> RecommendedStateChanges {
        RecommendedStateChanges::next(BattleOrchestratorMode::PhaseController).with_display_map(true)
    }

    fn reset(&mut self, _state: &mut BattleState) {
        self.loaded = false;
    }
}
