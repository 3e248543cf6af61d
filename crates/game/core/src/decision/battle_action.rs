use crate::combat::{BattleActionActorContext, BattleActionSquaddieChange};
use crate::ids::{ActionTemplateId, BattleSquaddieId};
use crate::map::HexCoordinate;

/// What a queued battle action does.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleActionAction {
    /// One effect of an action template.
    ActionTemplate {
        id: ActionTemplateId,
        effect_index: usize,
    },
    Movement,
    EndTurn,
}

/// Consequences of a battle action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleActionEffect {
    /// Changes to squaddies. `changes` stays `None` until the action reaches
    /// the head of the animation queue and is resolved.
    Squaddie {
        target_coordinate: HexCoordinate,
        target_ids: Vec<BattleSquaddieId>,
        changes: Option<Vec<BattleActionSquaddieChange>>,
    },
    Movement {
        start: HexCoordinate,
        end: HexCoordinate,
    },
    EndTurn,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleActionAnimation {
    pub completed: bool,
}

/// A confirmed decision waiting to be animated, or already animated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleAction {
    pub actor: BattleSquaddieId,
    pub action: BattleActionAction,
    pub effect: BattleActionEffect,
    pub actor_context: BattleActionActorContext,
    pub animation: BattleActionAnimation,
}

impl BattleAction {
    pub fn new(actor: BattleSquaddieId, action: BattleActionAction, effect: BattleActionEffect) -> Self {
        Self {
            actor,
            action,
            effect,
            actor_context: BattleActionActorContext::default(),
            animation: BattleActionAnimation::default(),
        }
    }

    pub fn end_turn(actor: BattleSquaddieId) -> Self {
        Self::new(actor, BattleActionAction::EndTurn, BattleActionEffect::EndTurn)
    }

    pub fn movement(actor: BattleSquaddieId, start: HexCoordinate, end: HexCoordinate) -> Self {
        Self::new(actor, BattleActionAction::Movement, BattleActionEffect::Movement { start, end })
    }

    /// One squaddie-targeting effect of an action template, unresolved.
    pub fn squaddie_effect(
        actor: BattleSquaddieId,
        action_template_id: ActionTemplateId,
        effect_index: usize,
        target_coordinate: HexCoordinate,
        target_ids: Vec<BattleSquaddieId>,
    ) -> Self {
        Self::new(
            actor,
            BattleActionAction::ActionTemplate {
                id: action_template_id,
                effect_index,
            },
            BattleActionEffect::Squaddie {
                target_coordinate,
                target_ids,
                changes: None,
            },
        )
    }

    /// Squaddie effects that have not been resolved yet.
    pub fn needs_resolution(&self) -> bool {
        matches!(self.effect, BattleActionEffect::Squaddie { changes: None, .. })
    }

    pub fn squaddie_changes(&self) -> Option<&[BattleActionSquaddieChange]> {
        match &self.effect {
            BattleActionEffect::Squaddie {
                changes: Some(changes),
                ..
            } => Some(changes),
            _ => None,
        }
    }
}
