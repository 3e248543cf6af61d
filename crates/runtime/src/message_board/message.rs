use battle_core::{ActionTemplateId, BattleSquaddieId, HexCoordinate};

use crate::state::PopupWindow;

/// Everything that can be announced on the [`MessageBoard`](super::MessageBoard).
///
/// Each variant carries only the payload its listeners need; the battle state
/// itself travels alongside every message.
#[derive(Clone, Debug, PartialEq, Eq, strum::EnumDiscriminants)]
#[strum_discriminants(name(MessageType))]
#[strum_discriminants(derive(Hash, PartialOrd, Ord, strum::Display, strum::AsRefStr))]
#[strum_discriminants(strum(serialize_all = "SCREAMING_SNAKE_CASE"))]
pub enum BattleMessage {
    PlayerSelectsAndLocksSquaddie {
        battle_squaddie_id: BattleSquaddieId,
    },
    PlayerPeeksAtSquaddie {
        battle_squaddie_id: Option<BattleSquaddieId>,
    },
    PlayerSelectsActionThatRequiresATarget {
        action_template_id: ActionTemplateId,
    },
    /// Action whose target needs no choosing, such as a self buff.
    PlayerSelectsActionWithKnownTargets {
        action_template_id: ActionTemplateId,
        target_coordinate: HexCoordinate,
    },
    PlayerSelectsTargetCoordinate {
        coordinate: HexCoordinate,
    },
    PlayerConfirmsAction,
    PlayerCancelsTargetSelection,
    PlayerCancelsTargetConfirmation,
    PlayerCancelsPlayerActionConsiderations,
    PlayerCancelsSquaddieSelection,
    PlayerEndsTurn,
    PlayerConfirmsDecisionStepActor {
        battle_squaddie_id: BattleSquaddieId,
    },
    PlayerMovesSquaddie {
        destination: HexCoordinate,
    },
    SelectAndLockNextSquaddie,
    StartedPlayerPhase {
        turn_count: u32,
    },
    PlayerCanControlDifferentSquaddie,
    BattleActionFinishesAnimation,
    PlayerSelectionIsInvalid {
        popup: PopupWindow,
    },
}

impl BattleMessage {
    pub fn message_type(&self) -> MessageType {
        MessageType::from(self)
    }
}
