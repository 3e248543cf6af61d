use battle_core::DialogueLine;
use tracing::{info, warn};

use crate::error::Result;
use crate::input::{KeyEvent, MouseButton, MouseEvent};
use crate::orchestrator::{
    OrchestratorComponent, OrchestratorContext, RecommendedStateChanges, UiControlSettings,
};
use crate::state::BattleState;

/// Plays the pending cutscene one dialogue line at a time.
///
/// Accept (key or click) advances a line. With `autoplay_player` set, a line
/// advances every tick.
#[derive(Debug, Default)]
pub struct CutscenePlayer {
    line_index: usize,
    started: bool,
    finished: bool,
}

impl CutscenePlayer {
    /// Line currently on screen.
    pub fn current_line<'a>(&self, state: &'a BattleState) -> Option<&'a DialogueLine> {
        let cutscene_id = state.mission.pending_cutscene.as_ref()?;
        state.mission.cutscene(cutscene_id)?.lines.get(self.line_index)
    }

    fn advance(&mut self, state: &BattleState) {
        self.line_index += 1;
        let line_count = state
            .mission
            .pending_cutscene
            .as_ref()
            .and_then(|cutscene_id| state.mission.cutscene(cutscene_id))
            .map_or(0, |cutscene| cutscene.lines.len());
        if self.line_index >= line_count {
            self.finished = true;
        }
    }
}

impl OrchestratorComponent for CutscenePlayer {
    fn name(&self) -> &'static str {
        "CutscenePlayer"
    }

    fn update(&mut self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        if !self.started {
            self.started = true;
            let cutscene = state
                .mission
                .pending_cutscene
                .as_ref()
                .and_then(|cutscene_id| state.mission.cutscene(cutscene_id));
            match cutscene {
                Some(cutscene) if !cutscene.lines.is_empty() => {
                    info!(target: "battle::orchestrator", cutscene = %cutscene.id, "cutscene started");
                }
                Some(_) => self.finished = true,
                None => {
                    warn!(
                        target: "battle::orchestrator",
                        cutscene = ?state.mission.pending_cutscene,
                        "cutscene not found"
                    );
                    self.finished = true;
                }
            }
            return Ok(());
        }
        if context.config.autoplay_player {
            self.advance(state);
        }
        Ok(())
    }

    fn ui_control_settings(&self, _state: &BattleState) -> UiControlSettings {
        UiControlSettings::new(false, false)
    }

    fn mouse_event_happened(
        &mut self,
        state: &mut BattleState,
        event: MouseEvent,
        _context: &mut OrchestratorContext<'_>,
    ) -> Result<()> {
        if self.started && !self.finished && event.is_release_of(MouseButton::Accept) {
            self.advance(state);
        }
        Ok(())
    }

    fn key_event_happened(
        &mut self,
        state: &mut BattleState,
        event: KeyEvent,
        _context: &mut OrchestratorContext<'_>,
    ) -> Result<()> {
        if self.started && !self.finished && event == KeyEvent::Accept {
            self.advance(state);
        }
        Ok(())
    }

    fn has_completed(&self, _state: &BattleState) -> bool {
        self.finished
    }

    fn recommend_state_changes(&self, state: &BattleState) -> RecommendedStateChanges {
        RecommendedStateChanges {
            next_mode: state.mission.resume_mode,
            display_map: Some(true),
            check_mission_objectives: None,
        }
    }

    fn reset(&mut self, state: &mut BattleState) {
        state.mission.pending_cutscene = None;
        state.mission.resume_mode = None;
        *self = Self::default();
    }
}
