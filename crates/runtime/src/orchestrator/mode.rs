/// Which component the orchestrator runs.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumCount,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleOrchestratorMode {
    #[default]
    Unknown,
    Initialized,
    LoadingMission,
    CutscenePlayer,
    PhaseController,
    PlayerSquaddieSelector,
    PlayerSquaddieTarget,
    PlayerActionConfirm,
    PlayerHudController,
    ComputerSquaddieSelector,
    SquaddieMover,
    SquaddieUsesActionOnMap,
    SquaddieUsesActionOnSquaddie,
}

impl BattleOrchestratorMode {
    pub const COUNT: usize = <Self as strum::EnumCount>::COUNT;

    /// Slot in the component table.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Where to go when a completed component recommends no mode.
pub fn default_next_mode(mode: BattleOrchestratorMode) -> BattleOrchestratorMode {
    match mode {
        BattleOrchestratorMode::Unknown => BattleOrchestratorMode::Initialized,
        BattleOrchestratorMode::Initialized => BattleOrchestratorMode::LoadingMission,
        _ => BattleOrchestratorMode::PhaseController,
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_mode_has_its_own_slot() {
        let indices: Vec<_> = BattleOrchestratorMode::iter().map(BattleOrchestratorMode::index).collect();
        assert_eq!(indices, (0..BattleOrchestratorMode::COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn start_up_modes_chain_into_loading() {
        assert_eq!(
            default_next_mode(BattleOrchestratorMode::Unknown),
            BattleOrchestratorMode::Initialized
        );
        assert_eq!(
            default_next_mode(BattleOrchestratorMode::Initialized),
            BattleOrchestratorMode::LoadingMission
        );
        assert_eq!(
            default_next_mode(BattleOrchestratorMode::SquaddieMover),
            BattleOrchestratorMode::PhaseController
        );
        assert_eq!(BattleOrchestratorMode::PlayerSquaddieTarget.to_string(), "PLAYER_SQUADDIE_TARGET");
    }
}
