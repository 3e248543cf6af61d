use tracing::debug;

use crate::error::Result;
use crate::state::BattleState;

use super::{BattleMessage, MessageBoard, MessageListener};

/// Shows rejected selections to the player.
#[derive(Debug, Default)]
pub struct PopupListener;

impl MessageListener for PopupListener {
    fn name(&self) -> &'static str {
        "popup"
    }

    fn receive_message(
        &self,
        _board: &MessageBoard,
        state: &mut BattleState,
        message: &BattleMessage,
    ) -> Result<()> {
        if let BattleMessage::PlayerSelectionIsInvalid { popup } = message {
            debug!(
                target: "battle::message_board",
                reason = %popup.reason,
                text = %popup.text,
                "player selection rejected"
            );
            state.popup = Some(popup.clone());
        }
        Ok(())
    }
}
