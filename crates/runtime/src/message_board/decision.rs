use std::rc::Rc;

use battle_core::{
    ActionTemplateId, AttributeType, BattleAction, BattleSquaddieId, DecisionAction,
    DecisionStepError, HexCoordinate, MapError, SquaddieAffiliation, TargetingService,
    validate_action,
};
use tracing::{debug, info};

use crate::error::{Result, RuntimeError};
use crate::state::{BattleState, PopupWindow, PopupWindowReason};

use super::{BattleMessage, MessageBoard, MessageListener, MessageType};

const COMPONENT: &str = "PlayerDecisionListener";

/// Turns selection messages into decision step changes and queued battle
/// actions.
///
/// Rejected selections leave the decision step untouched and are answered
/// with [`BattleMessage::PlayerSelectionIsInvalid`].
pub struct PlayerDecisionListener {
    targeting: Rc<dyn TargetingService>,
}

impl PlayerDecisionListener {
    /// Message types this listener should be registered for.
    pub const MESSAGE_TYPES: [MessageType; 16] = [
        MessageType::PlayerSelectsAndLocksSquaddie,
        MessageType::PlayerPeeksAtSquaddie,
        MessageType::PlayerSelectsActionThatRequiresATarget,
        MessageType::PlayerSelectsActionWithKnownTargets,
        MessageType::PlayerSelectsTargetCoordinate,
        MessageType::PlayerConfirmsAction,
        MessageType::PlayerCancelsTargetSelection,
        MessageType::PlayerCancelsTargetConfirmation,
        MessageType::PlayerCancelsPlayerActionConsiderations,
        MessageType::PlayerCancelsSquaddieSelection,
        MessageType::PlayerEndsTurn,
        MessageType::PlayerConfirmsDecisionStepActor,
        MessageType::PlayerMovesSquaddie,
        MessageType::SelectAndLockNextSquaddie,
        MessageType::StartedPlayerPhase,
        MessageType::PlayerCanControlDifferentSquaddie,
    ];

    pub fn new(targeting: Rc<dyn TargetingService>) -> Self {
        Self { targeting }
    }

    fn select_and_lock_squaddie(
        &self,
        board: &MessageBoard,
        state: &mut BattleState,
        battle_squaddie_id: &BattleSquaddieId,
    ) -> Result<()> {
        let (template, squaddie) = state.repository.get_squaddie_by_battle_id(battle_squaddie_id)?;
        let name = template.name.clone();
        if template.affiliation != SquaddieAffiliation::Player || squaddie.is_dead() {
            return reject(
                board,
                state,
                PopupWindowReason::CannotControlSquaddie,
                format!("Cannot control {name}"),
            );
        }
        if !squaddie.turn.has_action_points_remaining() {
            return reject(
                board,
                state,
                PopupWindowReason::NotEnoughActionPoints,
                format!("{name} has no action points left"),
            );
        }

        state.decision_step.set_actor(battle_squaddie_id.clone());
        state.clear_considerations();
        state.popup = None;
        state.peeked_squaddie = None;
        debug!(
            target: "battle::message_board",
            battle_squaddie_id = %battle_squaddie_id,
            "squaddie locked"
        );
        Ok(())
    }

    fn select_action(
        &self,
        board: &MessageBoard,
        state: &mut BattleState,
        action_template_id: &ActionTemplateId,
    ) -> Result<bool> {
        let actor = require_actor(state)?;
        let (actor_template, _) = state.repository.get_squaddie_by_battle_id(&actor)?;
        if !actor_template.knows_action(action_template_id) {
            return Err(RuntimeError::invariant(
                COMPONENT,
                format!("{actor} does not know action {action_template_id}"),
            ));
        }

        let action_template = state.repository.get_action_template_by_id(action_template_id)?;
        let validity = validate_action(&state.repository, &actor, action_template)?;
        if !validity.is_valid {
            let reason = validity
                .reason
                .map_or(PopupWindowReason::NotEnoughActionPoints, PopupWindowReason::from);
            reject(board, state, reason, validity.message.unwrap_or_default())?;
            return Ok(false);
        }

        state
            .decision_step
            .add_action(DecisionAction::ActionTemplate(action_template_id.clone()))?;
        state.clear_considerations();
        state.popup = None;
        Ok(true)
    }

    fn select_action_with_known_targets(
        &self,
        board: &MessageBoard,
        state: &mut BattleState,
        action_template_id: &ActionTemplateId,
        target_coordinate: HexCoordinate,
    ) -> Result<()> {
        if !self.select_action(board, state, action_template_id)? {
            return Ok(());
        }
        let actor = require_actor(state)?;
        let target_ids: Vec<_> = state.map.squaddie_at(&target_coordinate).cloned().into_iter().collect();
        consider_target(state, &actor, action_template_id, target_coordinate, &target_ids)
    }

    fn select_target_coordinate(
        &self,
        board: &MessageBoard,
        state: &mut BattleState,
        coordinate: HexCoordinate,
    ) -> Result<()> {
        let actor = require_actor(state)?;
        let action_template_id = require_action_template(state)?;

        if state.targeting.is_none() {
            let results = state.find_valid_targets(self.targeting.as_ref(), &actor, &action_template_id)?;
            state.targeting = Some(results);
        }
        let Some(targeting) = &state.targeting else {
            return Ok(());
        };

        if !targeting.coordinates_in_range.contains(&coordinate) {
            return reject(
                board,
                state,
                PopupWindowReason::TargetOutOfRange,
                "Target is out of range",
            );
        }
        let target_id = state
            .map
            .squaddie_at(&coordinate)
            .filter(|id| targeting.battle_squaddie_ids_in_range.contains(id))
            .cloned();
        let Some(target_id) = target_id else {
            return reject(
                board,
                state,
                PopupWindowReason::NoValidTargetAtLocation,
                "No valid target at that location",
            );
        };

        consider_target(state, &actor, &action_template_id, coordinate, &[target_id])
    }

    fn confirm_action(&self, state: &mut BattleState) -> Result<()> {
        let actor = require_actor(state)?;
        let action_template_id = require_action_template(state)?;
        let coordinate = state
            .decision_step
            .target()
            .and_then(|target| target.considered_coordinate)
            .ok_or(DecisionStepError::TargetNotConsidered)?;
        state.decision_step.set_confirmed_target(coordinate)?;

        let action_template = state.repository.get_action_template_by_id(&action_template_id)?;
        let effect_count = action_template.effects().len();
        let action_points = action_template.action_points();
        let template_penalty = action_template.multiple_attack_penalty();
        let chosen: Vec<_> = state.map.squaddie_at(&coordinate).cloned().into_iter().collect();
        let effect_target_ids = action_template
            .effects()
            .iter()
            .map(|effect| state.effect_target_ids(&actor, effect, &chosen))
            .collect::<Result<Vec<_>>>()?;

        let squaddie = state.repository.battle_squaddie_mut(&actor)?;
        let penalty_before = squaddie.turn.multiple_attack_penalty();
        squaddie.turn.spend_action_points(action_points)?;
        squaddie.turn.add_multiple_attack_penalty(template_penalty);

        for (effect_index, target_ids) in effect_target_ids.into_iter().enumerate() {
            let mut action = BattleAction::squaddie_effect(
                actor.clone(),
                action_template_id.clone(),
                effect_index,
                coordinate,
                target_ids,
            );
            action.actor_context.multiple_attack_penalty = penalty_before;
            state.recorder.add_ready_to_animate_battle_action(action);
        }
        state.clear_considerations();

        info!(
            target: "battle::message_board",
            battle_squaddie_id = %actor,
            action_template_id = %action_template_id,
            effects = effect_count,
            %coordinate,
            "action confirmed"
        );
        Ok(())
    }

    fn end_turn(&self, state: &mut BattleState) -> Result<()> {
        let actor = require_actor(state)?;
        state.decision_step.add_action(DecisionAction::EndTurn)?;
        state.repository.battle_squaddie_mut(&actor)?.turn.end_turn();
        state.recorder.add_ready_to_animate_battle_action(BattleAction::end_turn(actor.clone()));
        state.clear_considerations();
        info!(target: "battle::message_board", battle_squaddie_id = %actor, "turn ended");
        Ok(())
    }

    fn move_squaddie(
        &self,
        board: &MessageBoard,
        state: &mut BattleState,
        destination: HexCoordinate,
    ) -> Result<()> {
        let actor = require_actor(state)?;
        let start = state
            .map
            .location_of(&actor)
            .ok_or_else(|| MapError::SquaddieNotOnMap(actor.clone()))?;
        if start == destination
            || !state.map.is_passable(&destination)
            || state.map.squaddie_at(&destination).is_some()
        {
            return reject(board, state, PopupWindowReason::CannotMoveThere, "Cannot move there");
        }

        let (template, squaddie) = state.repository.get_squaddie_by_battle_id(&actor)?;
        let movement = template.movement_per_action as i32 + squaddie.attribute_amount(AttributeType::Movement);
        let movement = movement.max(1) as u32;
        let mut action_points = start.distance_to(&destination).div_ceil(movement);
        // Hustling squaddies cover any reachable distance for one point.
        if squaddie.attribute_amount(AttributeType::Hustle) > 0 {
            action_points = action_points.min(1);
        }
        if !squaddie.turn.can_afford(action_points) {
            return reject(
                board,
                state,
                PopupWindowReason::NotEnoughActionPoints,
                format!("Need {action_points} action points"),
            );
        }

        state.decision_step.add_action(DecisionAction::Movement)?;
        state.decision_step.set_considered_target(destination)?;
        state.decision_step.set_confirmed_target(destination)?;
        state
            .repository
            .battle_squaddie_mut(&actor)?
            .turn
            .spend_action_points(action_points)?;
        state
            .recorder
            .add_ready_to_animate_battle_action(BattleAction::movement(actor.clone(), start, destination));
        state.clear_considerations();
        state.popup = None;

        info!(
            target: "battle::message_board",
            battle_squaddie_id = %actor,
            %start,
            %destination,
            action_points,
            "movement confirmed"
        );
        Ok(())
    }

    fn select_and_lock_next_squaddie(&self, board: &MessageBoard, state: &mut BattleState) -> Result<()> {
        let ready = state.squaddies_ready_to_act(SquaddieAffiliation::Player);
        let current = state.decision_step.actor();
        let next = ready
            .iter()
            .find(|id| current.is_none_or(|current| *id > current))
            .or_else(|| ready.first())
            .cloned();

        match next {
            Some(battle_squaddie_id) => board.send_message(
                state,
                BattleMessage::PlayerSelectsAndLocksSquaddie { battle_squaddie_id },
            ),
            None => Ok(()),
        }
    }
}

impl MessageListener for PlayerDecisionListener {
    fn name(&self) -> &'static str {
        "player_decision"
    }

    fn receive_message(
        &self,
        board: &MessageBoard,
        state: &mut BattleState,
        message: &BattleMessage,
    ) -> Result<()> {
        match message {
            BattleMessage::PlayerSelectsAndLocksSquaddie { battle_squaddie_id } => {
                self.select_and_lock_squaddie(board, state, battle_squaddie_id)
            }
            BattleMessage::PlayerPeeksAtSquaddie { battle_squaddie_id } => {
                state.peeked_squaddie = battle_squaddie_id.clone();
                Ok(())
            }
            BattleMessage::PlayerSelectsActionThatRequiresATarget { action_template_id } => {
                self.select_action(board, state, action_template_id).map(|_| ())
            }
            BattleMessage::PlayerSelectsActionWithKnownTargets {
                action_template_id,
                target_coordinate,
            } => self.select_action_with_known_targets(
                board,
                state,
                action_template_id,
                *target_coordinate,
            ),
            BattleMessage::PlayerSelectsTargetCoordinate { coordinate } => {
                self.select_target_coordinate(board, state, *coordinate)
            }
            BattleMessage::PlayerConfirmsAction => self.confirm_action(state),
            BattleMessage::PlayerCancelsTargetSelection
            | BattleMessage::PlayerCancelsPlayerActionConsiderations => {
                state.decision_step.remove_action();
                state.clear_considerations();
                Ok(())
            }
            BattleMessage::PlayerCancelsTargetConfirmation => {
                state.decision_step.remove_target();
                state.forecast.clear();
                Ok(())
            }
            BattleMessage::PlayerCancelsSquaddieSelection => {
                state.decision_step.clear();
                state.clear_considerations();
                state.peeked_squaddie = None;
                Ok(())
            }
            BattleMessage::PlayerEndsTurn => self.end_turn(state),
            BattleMessage::PlayerConfirmsDecisionStepActor { battle_squaddie_id } => {
                if state.decision_step.actor() != Some(battle_squaddie_id) {
                    state.decision_step.set_actor(battle_squaddie_id.clone());
                }
                state.clear_considerations();
                Ok(())
            }
            BattleMessage::PlayerMovesSquaddie { destination } => {
                self.move_squaddie(board, state, *destination)
            }
            BattleMessage::SelectAndLockNextSquaddie => self.select_and_lock_next_squaddie(board, state),
            BattleMessage::StartedPlayerPhase { turn_count } => {
                info!(target: "battle::message_board", turn_count, "player phase started");
                state.decision_step.clear();
                state.clear_considerations();
                state.popup = None;
                board.send_message(state, BattleMessage::SelectAndLockNextSquaddie)
            }
            BattleMessage::PlayerCanControlDifferentSquaddie => {
                state.decision_step.clear();
                state.clear_considerations();
                board.send_message(state, BattleMessage::SelectAndLockNextSquaddie)
            }
            BattleMessage::BattleActionFinishesAnimation
            | BattleMessage::PlayerSelectionIsInvalid { .. } => Ok(()),
        }
    }
}

fn reject(
    board: &MessageBoard,
    state: &mut BattleState,
    reason: PopupWindowReason,
    text: impl Into<String>,
) -> Result<()> {
    board.send_message(
        state,
        BattleMessage::PlayerSelectionIsInvalid {
            popup: PopupWindow::new(reason, text),
        },
    )
}

fn require_actor(state: &BattleState) -> Result<BattleSquaddieId> {
    state
        .decision_step
        .actor()
        .cloned()
        .ok_or_else(|| RuntimeError::invariant(COMPONENT, "decision step has no actor"))
}

fn require_action_template(state: &BattleState) -> Result<ActionTemplateId> {
    state
        .decision_step
        .action()
        .and_then(DecisionAction::action_template_id)
        .cloned()
        .ok_or_else(|| RuntimeError::invariant(COMPONENT, "decision step has no action template"))
}

fn consider_target(
    state: &mut BattleState,
    actor: &BattleSquaddieId,
    action_template_id: &ActionTemplateId,
    coordinate: HexCoordinate,
    target_ids: &[BattleSquaddieId],
) -> Result<()> {
    state.decision_step.set_considered_target(coordinate)?;
    state.forecast = state.forecast_action(actor, action_template_id, target_ids)?;
    state.popup = None;
    Ok(())
}
