//! Battle orchestrator: the per-tick mode state machine.
//!
//! Exactly one [`OrchestratorComponent`] runs per mode. Each tick the
//! orchestrator updates the current component and, once it reports
//! completion, asks it where to go next.
//!
//! # Per-tick algorithm
//!
//! Once the battle is complete and its closing cutscene has played, ticks do
//! nothing. Otherwise:
//!
//! 1. Draw the map when the running UI settings ask for it
//! 2. Update the current component
//! 3. Merge the component's UI settings into the running settings
//! 4. If the component completed: mark a won or lost battle complete,
//!    evaluate mission objectives when asked, let a pending cutscene trigger
//!    pre-empt the recommended mode, reset the component and switch modes
//!
//! Modes without a registered component run [`DefaultComponent`], which
//! completes immediately and recommends nothing.

mod builder;
pub mod components;
mod mode;

use tracing::{error, info};

use battle_core::{CutsceneId, DiceRoller, evaluate_objectives};

use crate::config::OrchestratorConfig;
use crate::error::Result;
use crate::input::{KeyEvent, MouseEvent};
use crate::message_board::MessageBoard;
use crate::state::BattleState;

pub use builder::BattleOrchestratorBuilder;
pub use mode::{BattleOrchestratorMode, default_next_mode};

/// What a completed component suggests the orchestrator does next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecommendedStateChanges {
    pub next_mode: Option<BattleOrchestratorMode>,
    pub display_map: Option<bool>,
    pub check_mission_objectives: Option<bool>,
}

impl RecommendedStateChanges {
    pub fn next(mode: BattleOrchestratorMode) -> Self {
        Self {
            next_mode: Some(mode),
            ..Self::default()
        }
    }

    pub fn with_display_map(mut self, display_map: bool) -> Self {
        self.display_map = Some(display_map);
        self
    }

    pub fn checking_mission_objectives(mut self) -> Self {
        self.check_mission_objectives = Some(true);
        self
    }
}

/// UI switches a component wants. `None` leaves the running value alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiControlSettings {
    pub display_battle_map: Option<bool>,
    pub let_mouse_scroll_camera: Option<bool>,
}

impl UiControlSettings {
    pub fn new(display_battle_map: bool, let_mouse_scroll_camera: bool) -> Self {
        Self {
            display_battle_map: Some(display_battle_map),
            let_mouse_scroll_camera: Some(let_mouse_scroll_camera),
        }
    }

    /// Overrides every field `other` sets.
    pub fn merge(&mut self, other: UiControlSettings) {
        if other.display_battle_map.is_some() {
            self.display_battle_map = other.display_battle_map;
        }
        if other.let_mouse_scroll_camera.is_some() {
            self.let_mouse_scroll_camera = other.let_mouse_scroll_camera;
        }
    }

    pub fn displays_battle_map(&self) -> bool {
        self.display_battle_map.unwrap_or(false)
    }

    pub fn lets_mouse_scroll_camera(&self) -> bool {
        self.let_mouse_scroll_camera.unwrap_or(false)
    }
}

/// Collaborators a component may use while it runs.
pub struct OrchestratorContext<'a> {
    pub message_board: &'a MessageBoard,
    pub dice: &'a mut dyn DiceRoller,
    pub config: &'a OrchestratorConfig,
}

/// Contract every orchestrator mode implements.
pub trait OrchestratorComponent {
    fn name(&self) -> &'static str;

    fn update(&mut self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()>;

    fn ui_control_settings(&self, _state: &BattleState) -> UiControlSettings {
        UiControlSettings::default()
    }

    fn mouse_event_happened(
        &mut self,
        _state: &mut BattleState,
        _event: MouseEvent,
        _context: &mut OrchestratorContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    fn key_event_happened(
        &mut self,
        _state: &mut BattleState,
        _event: KeyEvent,
        _context: &mut OrchestratorContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    fn has_completed(&self, state: &BattleState) -> bool;

    fn recommend_state_changes(&self, state: &BattleState) -> RecommendedStateChanges;

    fn reset(&mut self, _state: &mut BattleState) {}
}

/// Runs for any mode without a registered component.
#[derive(Debug, Default)]
pub struct DefaultComponent;

impl OrchestratorComponent for DefaultComponent {
    fn name(&self) -> &'static str {
        "default"
    }

    fn update(&mut self, _state: &mut BattleState, _context: &mut OrchestratorContext<'_>) -> Result<()> {
        Ok(())
    }

    fn has_completed(&self, _state: &BattleState) -> bool {
        true
    }

    fn recommend_state_changes(&self, _state: &BattleState) -> RecommendedStateChanges {
        RecommendedStateChanges::default()
    }
}

/// One component slot per mode, [`DefaultComponent`] until registered.
pub struct ComponentTable {
    components: [Box<dyn OrchestratorComponent>; BattleOrchestratorMode::COUNT],
}

impl Default for ComponentTable {
    fn default() -> Self {
        Self {
            components: std::array::from_fn(|_| {
                Box::new(DefaultComponent) as Box<dyn OrchestratorComponent>
            }),
        }
    }
}

impl ComponentTable {
    pub fn register(&mut self, mode: BattleOrchestratorMode, component: Box<dyn OrchestratorComponent>) {
        self.components[mode.index()] = component;
    }

    pub fn get(&self, mode: BattleOrchestratorMode) -> &dyn OrchestratorComponent {
        self.components[mode.index()].as_ref()
    }

    pub fn get_mut(&mut self, mode: BattleOrchestratorMode) -> &mut dyn OrchestratorComponent {
        self.components[mode.index()].as_mut()
    }
}

/// Renders the mission map. Rendering lives outside this crate.
pub trait MapDisplay {
    fn draw(&mut self, state: &BattleState);

    fn mouse_event_happened(&mut self, _state: &BattleState, _event: MouseEvent) {}

    fn key_event_happened(&mut self, _state: &BattleState, _event: KeyEvent) {}
}

/// Headless map display.
#[derive(Debug, Default)]
pub struct NoMapDisplay;

impl MapDisplay for NoMapDisplay {
    fn draw(&mut self, _state: &BattleState) {}
}

pub struct BattleOrchestrator {
    mode: BattleOrchestratorMode,
    components: ComponentTable,
    message_board: MessageBoard,
    dice: Box<dyn DiceRoller>,
    map_display: Box<dyn MapDisplay>,
    config: OrchestratorConfig,
    ui_control_settings: UiControlSettings,
}

impl BattleOrchestrator {
    pub fn builder() -> BattleOrchestratorBuilder {
        BattleOrchestratorBuilder::new()
    }

    pub fn mode(&self) -> BattleOrchestratorMode {
        self.mode
    }

    /// Jumps straight to `mode`; the next tick runs its component.
    pub fn set_mode(&mut self, mode: BattleOrchestratorMode) {
        self.mode = mode;
    }

    pub fn message_board(&self) -> &MessageBoard {
        &self.message_board
    }

    pub fn ui_control_settings(&self) -> UiControlSettings {
        self.ui_control_settings
    }

    pub fn component(&self, mode: BattleOrchestratorMode) -> &dyn OrchestratorComponent {
        self.components.get(mode)
    }

    /// Advances the battle by one tick. Once the battle is complete, ticks
    /// only play out a cutscene it triggered.
    ///
    /// # Errors
    ///
    /// Returns the first invariant violation raised by the running component
    /// or a listener it triggered. The battle state is left as the failing
    /// step found it.
    pub fn update(&mut self, state: &mut BattleState) -> Result<()> {
        if state.has_battle_ended() {
            return Ok(());
        }
        if self.ui_control_settings.displays_battle_map() {
            self.map_display.draw(state);
        }

        let mode = self.mode;
        let component = self.components.get_mut(mode);
        let mut context = OrchestratorContext {
            message_board: &self.message_board,
            dice: self.dice.as_mut(),
            config: &self.config,
        };
        if let Err(err) = component.update(state, &mut context) {
            error!(
                target: "battle::orchestrator",
                %mode,
                component = component.name(),
                severity = %err.severity(),
                error = %err,
                "component update failed"
            );
            return Err(err);
        }
        self.ui_control_settings.merge(component.ui_control_settings(state));

        if !component.has_completed(state) {
            return Ok(());
        }

        if state.mission.completion.is_finished() {
            state.mission.battle_complete = true;
            info!(target: "battle::orchestrator", completion = ?state.mission.completion, "battle complete");
        }

        let changes = component.recommend_state_changes(state);
        if changes.check_mission_objectives == Some(true) && !state.mission.completion.is_finished() {
            state.mission.completion = evaluate_objectives(&state.mission.objectives, &state.repository);
        }

        let mut next_mode = changes.next_mode.unwrap_or_else(|| default_next_mode(mode));
        let turn = (mode == BattleOrchestratorMode::PhaseController).then_some(state.phase.turn_count);
        if let Some(cutscene_id) = react_to_cutscene_trigger(state, turn) {
            info!(target: "battle::orchestrator", cutscene = %cutscene_id, resume_mode = %next_mode, "cutscene triggered");
            state.mission.pending_cutscene = Some(cutscene_id);
            state.mission.resume_mode = Some(next_mode);
            next_mode = BattleOrchestratorMode::CutscenePlayer;
        }

        if let Some(display_map) = changes.display_map {
            self.ui_control_settings.display_battle_map = Some(display_map);
        }
        component.reset(state);

        if next_mode != mode {
            info!(target: "battle::orchestrator", %mode, %next_mode, "mode change");
        }
        self.mode = next_mode;
        Ok(())
    }

    pub fn mouse_event_happened(&mut self, state: &mut BattleState, event: MouseEvent) -> Result<()> {
        let mut context = OrchestratorContext {
            message_board: &self.message_board,
            dice: self.dice.as_mut(),
            config: &self.config,
        };
        self.components
            .get_mut(self.mode)
            .mouse_event_happened(state, event, &mut context)?;

        if self.ui_control_settings.lets_mouse_scroll_camera()
            || self.ui_control_settings.displays_battle_map()
        {
            self.map_display.mouse_event_happened(state, event);
        }
        Ok(())
    }

    pub fn key_event_happened(&mut self, state: &mut BattleState, event: KeyEvent) -> Result<()> {
        let mut context = OrchestratorContext {
            message_board: &self.message_board,
            dice: self.dice.as_mut(),
            config: &self.config,
        };
        self.components
            .get_mut(self.mode)
            .key_event_happened(state, event, &mut context)?;

        if self.ui_control_settings.displays_battle_map() {
            self.map_display.key_event_happened(state, event);
        }
        Ok(())
    }
}

/// Marks the first trigger that fires as reacted and returns its cutscene.
fn react_to_cutscene_trigger(state: &mut BattleState, turn: Option<u32>) -> Option<CutsceneId> {
    let completion = state.mission.completion;
    let trigger = state
        .mission
        .cutscene_triggers
        .iter_mut()
        .find(|trigger| trigger.should_fire(completion, turn))?;
    trigger.already_reacted = true;
    Some(trigger.cutscene_id.clone())
}
