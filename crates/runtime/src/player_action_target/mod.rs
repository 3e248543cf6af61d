//! Target selection and confirmation inside the player target mode.
//!
//! The machine counts the targets of the chosen action and then either
//! auto-selects the single candidate and waits for the player to confirm,
//! cancels when nothing is in range, or hands over to the legacy
//! multi-target selector.
//!
//! ```text
//! Initialized -> CountTargets -> CancelActionSelection ---------> Finished
//!                             -> NotApplicable -----------------> Finished
//!                             -> WaitingForPlayerConfirm -------> Finished
//!                                                        -> CancelActionSelection
//! ```
//!
//! Transitions are listed per state in priority order in [`transitions_from`].
//! Every state except `Finished` first checks the bypass: once
//! `use_legacy_selector` or `cancel_action_selection` is set the machine
//! finishes immediately.

mod buttons;

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use battle_core::{BattleSquaddieId, DecisionAction, HexCoordinate, TargetingService};
use tracing::{debug, warn};

use crate::error::{Result, RuntimeError};
use crate::input::{KeyEvent, MouseButton, MouseEvent};
use crate::message_board::{BattleMessage, MessageBoard};
use crate::state::{BattleState, PopupWindow, PopupWindowReason};

pub use buttons::{ButtonArea, ButtonStatus, UiButton};

const COMPONENT: &str = "PlayerActionTargetStateMachine";

/// Upper bound on updates in one [`PlayerActionTargetStateMachine::update_until`] call.
pub const MAX_UPDATES_PER_DRIVE: usize = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerActionTargetState {
    #[default]
    Initialized,
    CountTargets,
    NotApplicable,
    WaitingForPlayerConfirm,
    CancelActionSelection,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerActionTargetTransition {
    Initialize,
    NoTargetsFound,
    UnsupportedCountTargets,
    TargetsAutomaticallySelected,
    PlayerConfirmsTargetSelection,
    PlayerCancelsActionSelection,
    Bypass,
}

/// Outgoing transitions of `state`, highest priority first. The bypass is
/// checked separately, before these.
pub fn transitions_from(
    state: PlayerActionTargetState,
) -> &'static [(PlayerActionTargetTransition, PlayerActionTargetState)] {
    use PlayerActionTargetState as S;
    use PlayerActionTargetTransition as T;

    match state {
        S::Initialized => &[(T::Initialize, S::CountTargets)],
        S::CountTargets => &[
            (T::NoTargetsFound, S::CancelActionSelection),
            (T::UnsupportedCountTargets, S::NotApplicable),
            (T::TargetsAutomaticallySelected, S::WaitingForPlayerConfirm),
        ],
        S::WaitingForPlayerConfirm => &[
            (T::PlayerConfirmsTargetSelection, S::Finished),
            (T::PlayerCancelsActionSelection, S::CancelActionSelection),
        ],
        S::NotApplicable | S::CancelActionSelection | S::Finished => &[],
    }
}

/// Input queued for the next waiting tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerInput {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

/// Targets found when the machine entered `CountTargets`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetResults {
    /// `None` until targets have been counted.
    pub valid_targets: Option<BTreeMap<BattleSquaddieId, HexCoordinate>>,
    pub coordinates_in_range: BTreeSet<HexCoordinate>,
}

impl TargetResults {
    fn valid_target_count(&self) -> Option<usize> {
        self.valid_targets.as_ref().map(BTreeMap::len)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub target_confirmed: bool,
    pub action_cancelled: bool,
}

/// Data the machine owns between updates.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerActionTargetContext {
    pub target_results: TargetResults,
    pub player_intent: PlayerIntent,
    pub player_input: Vec<PlayerInput>,
    /// More than one candidate; the legacy selector takes over.
    pub use_legacy_selector: bool,
    pub cancel_action_selection: bool,
    pub target_automatically_selected: bool,
    pub confirm_button: UiButton,
    pub cancel_button: UiButton,
}

impl Default for PlayerActionTargetContext {
    fn default() -> Self {
        Self {
            target_results: TargetResults::default(),
            player_intent: PlayerIntent::default(),
            player_input: Vec::new(),
            use_legacy_selector: false,
            cancel_action_selection: false,
            target_automatically_selected: false,
            confirm_button: UiButton::new("Confirm", ButtonArea::new(540.0, 640.0, 120.0, 40.0)),
            cancel_button: UiButton::new("Cancel", ButtonArea::new(680.0, 640.0, 120.0, 40.0)),
        }
    }
}

pub struct PlayerActionTargetStateMachine {
    state: PlayerActionTargetState,
    context: PlayerActionTargetContext,
    targeting: Rc<dyn TargetingService>,
}

impl PlayerActionTargetStateMachine {
    pub fn new(targeting: Rc<dyn TargetingService>) -> Self {
        Self {
            state: PlayerActionTargetState::Initialized,
            context: PlayerActionTargetContext::default(),
            targeting,
        }
    }

    pub fn state(&self) -> PlayerActionTargetState {
        self.state
    }

    pub fn context(&self) -> &PlayerActionTargetContext {
        &self.context
    }

    pub fn queue_input(&mut self, input: PlayerInput) {
        self.context.player_input.push(input);
    }

    /// Back to `Initialized` with a fresh context.
    pub fn reset(&mut self) {
        self.state = PlayerActionTargetState::Initialized;
        self.context = PlayerActionTargetContext::default();
    }

    /// Takes at most one transition; runs the state's action when none fires.
    pub fn update(
        &mut self,
        battle: &mut BattleState,
        board: &MessageBoard,
    ) -> Result<PlayerActionTargetState> {
        if let Some((transition, next)) = self.next_transition() {
            debug!(
                target: "battle::target",
                from = %self.state,
                to = %next,
                %transition,
                "target state transition"
            );
            self.on_transition(transition, battle, board)?;
            self.state = next;
            self.on_entry(next, battle)?;
        } else if self.state == PlayerActionTargetState::WaitingForPlayerConfirm {
            self.process_player_input();
        }
        Ok(self.state)
    }

    /// Updates until `stop` accepts the resulting state.
    pub fn update_until(
        &mut self,
        battle: &mut BattleState,
        board: &MessageBoard,
        mut stop: impl FnMut(PlayerActionTargetState) -> bool,
    ) -> Result<()> {
        for _ in 0..MAX_UPDATES_PER_DRIVE {
            let state = self.update(battle, board)?;
            if stop(state) {
                return Ok(());
            }
        }
        warn!(target: "battle::target", state = %self.state, "target state machine did not settle");
        Ok(())
    }

    /// One frame's worth of updates: stops at `Finished`, or the second time
    /// `WaitingForPlayerConfirm` is observed.
    pub fn drive(&mut self, battle: &mut BattleState, board: &MessageBoard) -> Result<()> {
        let mut waiting_seen = 0;
        self.update_until(battle, board, |state| match state {
            PlayerActionTargetState::Finished => true,
            PlayerActionTargetState::WaitingForPlayerConfirm => {
                waiting_seen += 1;
                waiting_seen >= 2
            }
            _ => false,
        })
    }

    fn next_transition(&self) -> Option<(PlayerActionTargetTransition, PlayerActionTargetState)> {
        if self.state != PlayerActionTargetState::Finished
            && self.guard(PlayerActionTargetTransition::Bypass)
        {
            return Some((
                PlayerActionTargetTransition::Bypass,
                PlayerActionTargetState::Finished,
            ));
        }
        transitions_from(self.state)
            .iter()
            .copied()
            .find(|(transition, _)| self.guard(*transition))
    }

    fn guard(&self, transition: PlayerActionTargetTransition) -> bool {
        let context = &self.context;
        let count = context.target_results.valid_target_count();
        match transition {
            PlayerActionTargetTransition::Initialize => true,
            PlayerActionTargetTransition::NoTargetsFound => count == Some(0),
            PlayerActionTargetTransition::UnsupportedCountTargets => count.is_some_and(|n| n > 1),
            PlayerActionTargetTransition::TargetsAutomaticallySelected => count == Some(1),
            PlayerActionTargetTransition::PlayerConfirmsTargetSelection => {
                count.is_some_and(|n| n > 0) && context.player_intent.target_confirmed
            }
            PlayerActionTargetTransition::PlayerCancelsActionSelection => {
                context.player_intent.action_cancelled
            }
            PlayerActionTargetTransition::Bypass => {
                context.use_legacy_selector || context.cancel_action_selection
            }
        }
    }

    fn on_transition(
        &mut self,
        transition: PlayerActionTargetTransition,
        battle: &mut BattleState,
        board: &MessageBoard,
    ) -> Result<()> {
        match transition {
            PlayerActionTargetTransition::NoTargetsFound => {
                board.send_message(battle, BattleMessage::PlayerCancelsTargetSelection)?;
                board.send_message(
                    battle,
                    BattleMessage::PlayerSelectionIsInvalid {
                        popup: PopupWindow::new(
                            PopupWindowReason::NoTargetsInRange,
                            "No targets in range",
                        ),
                    },
                )
            }
            PlayerActionTargetTransition::TargetsAutomaticallySelected => {
                let coordinate = self
                    .context
                    .target_results
                    .valid_targets
                    .as_ref()
                    .and_then(|targets| targets.values().next().copied())
                    .ok_or_else(|| RuntimeError::invariant(COMPONENT, "no target to select"))?;
                self.context.target_automatically_selected = true;
                board.send_message(battle, BattleMessage::PlayerSelectsTargetCoordinate { coordinate })
            }
            PlayerActionTargetTransition::PlayerConfirmsTargetSelection => {
                board.send_message(battle, BattleMessage::PlayerConfirmsAction)
            }
            PlayerActionTargetTransition::PlayerCancelsActionSelection => {
                board.send_message(battle, BattleMessage::PlayerCancelsTargetSelection)?;
                if self.context.target_automatically_selected {
                    board.send_message(battle, BattleMessage::PlayerCancelsPlayerActionConsiderations)?;
                }
                Ok(())
            }
            PlayerActionTargetTransition::Initialize
            | PlayerActionTargetTransition::UnsupportedCountTargets
            | PlayerActionTargetTransition::Bypass => Ok(()),
        }
    }

    fn on_entry(&mut self, state: PlayerActionTargetState, battle: &mut BattleState) -> Result<()> {
        match state {
            PlayerActionTargetState::CountTargets => self.count_targets_entry(battle),
            PlayerActionTargetState::NotApplicable => {
                self.context.use_legacy_selector = true;
                Ok(())
            }
            PlayerActionTargetState::CancelActionSelection => {
                self.context.cancel_action_selection = true;
                Ok(())
            }
            PlayerActionTargetState::WaitingForPlayerConfirm => {
                self.context.player_intent = PlayerIntent::default();
                Ok(())
            }
            PlayerActionTargetState::Initialized | PlayerActionTargetState::Finished => Ok(()),
        }
    }

    fn count_targets_entry(&mut self, battle: &mut BattleState) -> Result<()> {
        let actor = battle
            .decision_step
            .actor()
            .cloned()
            .ok_or_else(|| RuntimeError::invariant(COMPONENT, "decision step has no actor"))?;
        let action_template_id = battle
            .decision_step
            .action()
            .and_then(DecisionAction::action_template_id)
            .cloned()
            .ok_or_else(|| {
                RuntimeError::invariant(COMPONENT, "decision step has no action template")
            })?;

        let results = battle.find_valid_targets(self.targeting.as_ref(), &actor, &action_template_id)?;
        let valid_targets = results
            .battle_squaddie_ids_in_range
            .iter()
            .filter_map(|id| battle.map.location_of(id).map(|coordinate| (id.clone(), coordinate)))
            .collect::<BTreeMap<_, _>>();

        debug!(
            target: "battle::target",
            battle_squaddie_id = %actor,
            action_template_id = %action_template_id,
            targets = valid_targets.len(),
            "counted targets"
        );
        self.context.target_results = TargetResults {
            valid_targets: Some(valid_targets),
            coordinates_in_range: results.coordinates_in_range.clone(),
        };
        battle.targeting = Some(results);
        Ok(())
    }

    fn process_player_input(&mut self) {
        let context = &mut self.context;
        let inputs = std::mem::take(&mut context.player_input);
        for input in &inputs {
            match input {
                PlayerInput::Key(KeyEvent::Accept) => context.player_intent.target_confirmed = true,
                PlayerInput::Key(KeyEvent::Cancel) if context.target_automatically_selected => {
                    context.player_intent.action_cancelled = true;
                }
                PlayerInput::Key(_) | PlayerInput::Mouse(_) => {}
            }
        }

        let mouse_events = || {
            inputs.iter().filter_map(|input| match input {
                PlayerInput::Mouse(event) => Some(event),
                PlayerInput::Key(_) => None,
            })
        };
        if context.confirm_button.replay(mouse_events()) {
            context.player_intent.target_confirmed = true;
        }
        if context.cancel_button.replay(mouse_events())
            || mouse_events().any(|event| event.is_release_of(MouseButton::Cancel))
        {
            context.player_intent.action_cancelled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use battle_core::{
        ActionEffectTemplate, ActionTemplate, BattleConfig, BattleSquaddie, DamageType,
        MissionMap, ObjectRepository, SquaddieAffiliation, SquaddieTemplate, TargetingError,
        TargetingRequest, TargetingResults,
    };

    use super::*;
    use crate::message_board::{MessageListener, MessageType};

    struct FixedTargets(Vec<BattleSquaddieId>);

    impl TargetingService for FixedTargets {
        fn find_valid_targets(
            &self,
            request: &TargetingRequest<'_>,
        ) -> std::result::Result<TargetingResults, TargetingError> {
            Ok(TargetingResults {
                battle_squaddie_ids_in_range: self.0.clone(),
                coordinates_in_range: self
                    .0
                    .iter()
                    .filter_map(|id| request.map.location_of(id))
                    .collect(),
            })
        }
    }

    #[derive(Default)]
    struct Recording(RefCell<Vec<BattleMessage>>);

    impl MessageListener for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn receive_message(
            &self,
            _board: &MessageBoard,
            _state: &mut BattleState,
            message: &BattleMessage,
        ) -> Result<()> {
            self.0.borrow_mut().push(message.clone());
            Ok(())
        }
    }

    fn battle() -> BattleState {
        let mut repository = ObjectRepository::new();
        repository
            .add_action_template(
                ActionTemplate::new(
                    "slash",
                    "Slash",
                    vec![ActionEffectTemplate::attack(DamageType::Body, 1)],
                )
                .unwrap(),
            )
            .unwrap();
        let knight = SquaddieTemplate::new("knight", "Knight", SquaddieAffiliation::Player, 5)
            .with_action("slash");
        let bandit = SquaddieTemplate::new("bandit", "Bandit", SquaddieAffiliation::Enemy, 3);
        repository.add_squaddie_template(knight.clone()).unwrap();
        repository.add_squaddie_template(bandit.clone()).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("knight_0", &knight)).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("bandit_0", &bandit)).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("bandit_1", &bandit)).unwrap();

        let mut map = MissionMap::new(4, 4);
        map.add_squaddie("knight_0".into(), HexCoordinate::new(1, 1)).unwrap();
        map.add_squaddie("bandit_0".into(), HexCoordinate::new(2, 1)).unwrap();
        map.add_squaddie("bandit_1".into(), HexCoordinate::new(1, 2)).unwrap();

        let mut state = BattleState::new(BattleConfig::default(), repository, map);
        state.decision_step.set_actor("knight_0".into());
        state
            .decision_step
            .add_action(DecisionAction::ActionTemplate("slash".into()))
            .unwrap();
        state
    }

    fn recording_board() -> (MessageBoard, Rc<Recording>) {
        let recording = Rc::new(Recording::default());
        let mut board = MessageBoard::new();
        for message_type in [
            MessageType::PlayerSelectsTargetCoordinate,
            MessageType::PlayerConfirmsAction,
            MessageType::PlayerCancelsTargetSelection,
            MessageType::PlayerCancelsPlayerActionConsiderations,
            MessageType::PlayerSelectionIsInvalid,
        ] {
            board.add_listener(recording.clone(), message_type);
        }
        (board, recording)
    }

    fn machine(targets: &[&str]) -> PlayerActionTargetStateMachine {
        PlayerActionTargetStateMachine::new(Rc::new(FixedTargets(
            targets.iter().map(|id| BattleSquaddieId::from(*id)).collect(),
        )))
    }

    #[test]
    fn single_target_reaches_waiting_in_one_drive() {
        let (board, recording) = recording_board();
        let mut battle = battle();
        let mut machine = machine(&["bandit_0"]);

        machine.drive(&mut battle, &board).unwrap();

        assert_eq!(machine.state(), PlayerActionTargetState::WaitingForPlayerConfirm);
        assert!(machine.context().target_automatically_selected);
        assert_eq!(
            *recording.0.borrow(),
            vec![BattleMessage::PlayerSelectsTargetCoordinate {
                coordinate: HexCoordinate::new(2, 1)
            }]
        );
        assert!(battle.targeting.is_some());
    }

    #[test]
    fn accept_key_confirms_on_the_next_drive() {
        let (board, recording) = recording_board();
        let mut battle = battle();
        let mut machine = machine(&["bandit_0"]);
        machine.drive(&mut battle, &board).unwrap();

        machine.queue_input(PlayerInput::Key(KeyEvent::Accept));
        machine.drive(&mut battle, &board).unwrap();

        assert_eq!(machine.state(), PlayerActionTargetState::Finished);
        assert!(machine.context().player_input.is_empty());
        assert_eq!(recording.0.borrow().last(), Some(&BattleMessage::PlayerConfirmsAction));
    }

    #[test]
    fn cancel_after_auto_selection_cancels_both_levels() {
        let (board, recording) = recording_board();
        let mut battle = battle();
        let mut machine = machine(&["bandit_0"]);
        machine.drive(&mut battle, &board).unwrap();

        machine.queue_input(PlayerInput::Mouse(MouseEvent::release(MouseButton::Cancel, 0.0, 0.0)));
        machine.drive(&mut battle, &board).unwrap();

        assert_eq!(machine.state(), PlayerActionTargetState::Finished);
        assert!(machine.context().cancel_action_selection);
        assert_eq!(
            recording.0.borrow()[1..],
            [
                BattleMessage::PlayerCancelsTargetSelection,
                BattleMessage::PlayerCancelsPlayerActionConsiderations,
            ]
        );
    }

    #[test]
    fn confirm_button_click_confirms() {
        let (board, _) = recording_board();
        let mut battle = battle();
        let mut machine = machine(&["bandit_0"]);
        machine.drive(&mut battle, &board).unwrap();

        machine.queue_input(PlayerInput::Mouse(MouseEvent::press(MouseButton::Accept, 600.0, 660.0)));
        machine.queue_input(PlayerInput::Mouse(MouseEvent::release(MouseButton::Accept, 600.0, 660.0)));
        machine.drive(&mut battle, &board).unwrap();

        assert_eq!(machine.state(), PlayerActionTargetState::Finished);
        assert!(machine.context().player_intent.target_confirmed);
    }

    #[test]
    fn no_targets_cancels_with_a_popup() {
        let (board, recording) = recording_board();
        let mut battle = battle();
        let mut machine = machine(&[]);

        machine.drive(&mut battle, &board).unwrap();

        assert_eq!(machine.state(), PlayerActionTargetState::Finished);
        assert!(machine.context().cancel_action_selection);
        let messages = recording.0.borrow();
        assert_eq!(messages[0], BattleMessage::PlayerCancelsTargetSelection);
        assert!(matches!(
            &messages[1],
            BattleMessage::PlayerSelectionIsInvalid { popup }
                if popup.reason == PopupWindowReason::NoTargetsInRange
        ));
    }

    #[test]
    fn several_targets_fall_back_to_the_legacy_selector() {
        let (board, recording) = recording_board();
        let mut battle = battle();
        let mut machine = machine(&["bandit_0", "bandit_1"]);

        machine.drive(&mut battle, &board).unwrap();

        assert_eq!(machine.state(), PlayerActionTargetState::Finished);
        assert!(machine.context().use_legacy_selector);
        assert!(recording.0.borrow().is_empty());
    }

    #[test]
    fn counting_without_an_actor_is_an_invariant_error() {
        let (board, _) = recording_board();
        let mut battle = battle();
        battle.decision_step.clear();
        let mut machine = machine(&["bandit_0"]);

        let error = machine.drive(&mut battle, &board).unwrap_err();
        assert_eq!(
            error.to_string(),
            "PlayerActionTargetStateMachine: decision step has no actor"
        );
    }

    #[test]
    fn transition_table_has_no_exits_from_terminal_states() {
        assert!(transitions_from(PlayerActionTargetState::Finished).is_empty());
        assert_eq!(transitions_from(PlayerActionTargetState::CountTargets).len(), 3);
    }
}
