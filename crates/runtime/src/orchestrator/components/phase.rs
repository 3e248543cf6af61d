use battle_core::SquaddieAffiliation;
use tracing::info;

use crate::error::Result;
use crate::message_board::BattleMessage;
use crate::orchestrator::{
    BattleOrchestratorMode, OrchestratorComponent, OrchestratorContext, RecommendedStateChanges,
    UiControlSettings,
};
use crate::state::{BattlePhaseState, BattleState};

use super::selector_for;

/// Starts the next team's phase and shows its banner.
///
/// Teams go player, ally, enemy, none; teams without a living squaddie are
/// skipped. The turn count goes up whenever a player phase starts.
#[derive(Debug)]
pub struct PhaseController {
    autoplay_player: bool,
    started: bool,
    banner_frames_remaining: u32,
}

impl PhaseController {
    pub fn new(autoplay_player: bool) -> Self {
        Self {
            autoplay_player,
            started: false,
            banner_frames_remaining: 0,
        }
    }

    fn start_next_phase(&mut self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()> {
        let living: Vec<_> = SquaddieAffiliation::PHASE_ORDER
            .into_iter()
            .filter(|affiliation| state.team_has_living_squaddies(*affiliation))
            .collect();
        let affiliation = next_phase(&mut state.phase, |affiliation| living.contains(&affiliation));

        let action_points = state.config.action_points_per_turn;
        for battle_squaddie_id in state.repository.team(affiliation) {
            state
                .repository
                .battle_squaddie_mut(&battle_squaddie_id)?
                .begin_new_turn(action_points);
        }

        info!(
            target: "battle::orchestrator",
            phase = ?affiliation,
            turn_count = state.phase.turn_count,
            "phase started"
        );
        if affiliation == SquaddieAffiliation::Player {
            context.message_board.send_message(
                state,
                BattleMessage::StartedPlayerPhase {
                    turn_count: state.phase.turn_count,
                },
            )?;
        }
        Ok(())
    }
}

/// Moves the phase to the next team with a living squaddie. The turn count
/// rises only when the player phase actually starts.
fn next_phase(
    phase: &mut BattlePhaseState,
    has_living_squaddies: impl Fn(SquaddieAffiliation) -> bool,
) -> SquaddieAffiliation {
    let mut next = phase
        .current_affiliation
        .map_or(SquaddieAffiliation::Player, |current| current.next_phase());
    for _ in 1..SquaddieAffiliation::PHASE_ORDER.len() {
        if has_living_squaddies(next) {
            break;
        }
        next = next.next_phase();
    }
    phase.current_affiliation = Some(next);
    if next == SquaddieAffiliation::Player {
        phase.turn_count += 1;
    }
    next
}

impl OrchestratorComponent for PhaseController {
    fn name(&self) -> &'static str {
        "PhaseController"
    }

    fn update(&mut self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()> {
        if !self.started {
            self.start_next_phase(state, context)?;
            self.started = true;
            self.banner_frames_remaining = context.config.phase_banner_frames;
            return Ok(());
        }
        self.banner_frames_remaining = self.banner_frames_remaining.saturating_sub(1);
        Ok(())
    }

    fn ui_control_settings(&self, _state: &BattleState) -> UiControlSettings {
        UiControlSettings::new(true, false)
    }

    fn has_completed(&self, _state: &BattleState) -> bool {
        self.started && self.banner_frames_remaining == 0
    }

    fn recommend_state_changes(&self, state: &BattleState) -> RecommendedStateChanges {
        let affiliation = state
            .phase
            .current_affiliation
            .unwrap_or(SquaddieAffiliation::Player);
        RecommendedStateChanges::next(selector_for(affiliation, self.autoplay_player))
            .with_display_map(true)
            .checking_mission_objectives()
    }

    fn reset(&mut self, _state: &mut BattleState) {
        self.started = false;
        self.banner_frames_remaining = 0;
    }
}
