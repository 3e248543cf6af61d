//! Synchronous publish/subscribe bus between input handling and state changes.
//!
//! Components announce player (or computer) intents as [`BattleMessage`]s.
//! Listeners registered for a [`MessageType`] receive the message together
//! with the mutable [`BattleState`] and change it in place.
//!
//! Delivery happens inside [`MessageBoard::send_message`], in registration
//! order. A listener may send further messages; those are delivered before
//! the outer dispatch moves on to the next listener.

mod battle_action;
mod decision;
mod message;
mod popup;

use std::rc::Rc;

use tracing::trace;

use crate::error::Result;
use crate::state::BattleState;

pub use battle_action::BattleActionListener;
pub use decision::PlayerDecisionListener;
pub use message::{BattleMessage, MessageType};
pub use popup::PopupListener;

/// Reacts to messages of the types it was registered for.
pub trait MessageListener {
    /// Listener name for logging.
    fn name(&self) -> &'static str;

    fn receive_message(
        &self,
        board: &MessageBoard,
        state: &mut BattleState,
        message: &BattleMessage,
    ) -> Result<()>;
}

/// Registry of listeners keyed by message type.
#[derive(Default)]
pub struct MessageBoard {
    listeners: Vec<(MessageType, Rc<dyn MessageListener>)>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Rc<dyn MessageListener>, message_type: MessageType) {
        self.listeners.push((message_type, listener));
    }

    /// Registers one listener for several message types.
    pub fn add_listener_for_all(
        &mut self,
        listener: Rc<dyn MessageListener>,
        message_types: &[MessageType],
    ) {
        for message_type in message_types {
            self.add_listener(Rc::clone(&listener), *message_type);
        }
    }

    pub fn listener_count(&self, message_type: MessageType) -> usize {
        self.listeners
            .iter()
            .filter(|(registered, _)| *registered == message_type)
            .count()
    }

    /// Delivers `message` to every listener registered for its type.
    ///
    /// Stops at the first listener error.
    pub fn send_message(&self, state: &mut BattleState, message: BattleMessage) -> Result<()> {
        let message_type = message.message_type();
        trace!(
            target: "battle::message_board",
            message = %message_type,
            "dispatching message"
        );

        for (registered, listener) in &self.listeners {
            if *registered != message_type {
                continue;
            }
            trace!(
                target: "battle::message_board",
                message = %message_type,
                listener = listener.name(),
                "delivering message"
            );
            listener.receive_message(self, state, &message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use battle_core::{BattleConfig, MissionMap, ObjectRepository};

    use super::*;

    struct Recording {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        forward: Option<BattleMessage>,
    }

    impl MessageListener for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn receive_message(
            &self,
            board: &MessageBoard,
            state: &mut BattleState,
            message: &BattleMessage,
        ) -> Result<()> {
            self.log
                .borrow_mut()
                .push(format!("{}:{}", self.name, message.message_type()));
            if let Some(forward) = &self.forward {
                board.send_message(state, forward.clone())?;
            }
            Ok(())
        }
    }

    fn state() -> BattleState {
        BattleState::new(BattleConfig::default(), ObjectRepository::new(), MissionMap::new(1, 1))
    }

    #[test]
    fn delivers_in_registration_order_and_nested_messages_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut board = MessageBoard::new();
        board.add_listener(
            Rc::new(Recording {
                name: "first",
                log: Rc::clone(&log),
                forward: Some(BattleMessage::PlayerConfirmsAction),
            }),
            MessageType::PlayerEndsTurn,
        );
        board.add_listener(
            Rc::new(Recording {
                name: "second",
                log: Rc::clone(&log),
                forward: None,
            }),
            MessageType::PlayerEndsTurn,
        );
        board.add_listener(
            Rc::new(Recording {
                name: "nested",
                log: Rc::clone(&log),
                forward: None,
            }),
            MessageType::PlayerConfirmsAction,
        );

        board
            .send_message(&mut state(), BattleMessage::PlayerEndsTurn)
            .unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "first:PLAYER_ENDS_TURN",
                "nested:PLAYER_CONFIRMS_ACTION",
                "second:PLAYER_ENDS_TURN",
            ]
        );
    }

    #[test]
    fn unregistered_messages_are_dropped() {
        let board = MessageBoard::new();
        assert_eq!(board.listener_count(MessageType::PlayerEndsTurn), 0);
        board
            .send_message(&mut state(), BattleMessage::BattleActionFinishesAnimation)
            .unwrap();
    }
}
