//! Runtime orchestration for turn-based tactical battles.
//!
//! This crate drives a [`battle_core`] battle tick by tick. Consumers build a
//! [`BattleOrchestrator`], load a [`BattleState`], and feed it ticks and input
//! events until the battle completes.
//!
//! Modules are organized by responsibility:
//! - [`orchestrator`] hosts the mode state machine, its builder and one
//!   component per mode
//! - [`message_board`] routes battle messages to listeners that edit the
//!   decision step
//! - [`player_action_target`] runs target selection for the chosen action
//! - [`strategy`] decides for computer-controlled teams
//! - [`state`] holds everything a tick may read or change
pub mod config;
pub mod error;
pub mod input;
pub mod message_board;
pub mod orchestrator;
pub mod player_action_target;
pub mod rng;
pub mod state;
pub mod strategy;

pub use config::OrchestratorConfig;
pub use error::{Result, RuntimeError};
pub use input::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
pub use message_board::{BattleMessage, MessageBoard, MessageListener, MessageType};
pub use orchestrator::{
    BattleOrchestrator, BattleOrchestratorBuilder, BattleOrchestratorMode, MapDisplay,
    OrchestratorComponent, OrchestratorContext, RecommendedStateChanges, UiControlSettings,
};
pub use player_action_target::{
    PlayerActionTargetState, PlayerActionTargetStateMachine, PlayerActionTargetTransition,
    PlayerInput,
};
pub use rng::RandomRoller;
pub use state::{BattleState, PopupWindow, PopupWindowReason};
pub use strategy::{ComputerDecision, EndTurnStrategy, TargetFoeInRange, TeamStrategy};
