//! Turn decisions and the queue of actions waiting to animate.

mod battle_action;
mod recorder;
mod step;

pub use battle_action::{BattleAction, BattleActionAction, BattleActionAnimation, BattleActionEffect};
pub use recorder::BattleActionRecorder;
pub use step::{BattleActionDecisionStep, DecisionAction, DecisionStepError, DecisionTarget};
