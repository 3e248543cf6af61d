use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while spending a squaddie's turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("needs {required} action points but only {remaining} remain")]
    NotEnoughActionPoints { required: u32, remaining: u32 },
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "TURN_NOT_ENOUGH_ACTION_POINTS"
    }
}

/// Per-turn resources of one battle squaddie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquaddieTurn {
    remaining_action_points: u32,
    /// Sum of penalties from attacks already made this turn (zero or negative).
    multiple_attack_penalty: i32,
}

impl Default for SquaddieTurn {
    fn default() -> Self {
        Self::new(BattleConfig::DEFAULT_ACTION_POINTS)
    }
}

impl SquaddieTurn {
    pub fn new(action_points: u32) -> Self {
        Self {
            remaining_action_points: action_points,
            multiple_attack_penalty: 0,
        }
    }

    pub fn remaining_action_points(&self) -> u32 {
        self.remaining_action_points
    }

    pub fn multiple_attack_penalty(&self) -> i32 {
        self.multiple_attack_penalty
    }

    pub fn can_afford(&self, action_points: u32) -> bool {
        self.remaining_action_points >= action_points
    }

    pub fn has_action_points_remaining(&self) -> bool {
        self.remaining_action_points > 0
    }

    pub fn spend_action_points(&mut self, action_points: u32) -> Result<(), TurnError> {
        if !self.can_afford(action_points) {
            return Err(TurnError::NotEnoughActionPoints {
                required: action_points,
                remaining: self.remaining_action_points,
            });
        }
        self.remaining_action_points -= action_points;
        Ok(())
    }

    /// Adds a template's penalty to every later attack this turn.
    pub fn add_multiple_attack_penalty(&mut self, penalty: i32) {
        self.multiple_attack_penalty += penalty;
    }

    pub fn end_turn(&mut self) {
        self.remaining_action_points = 0;
    }

    pub fn begin_new_turn(&mut self, action_points: u32) {
        *self = Self::new(action_points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spending_more_than_remaining_fails() {
        let mut turn = SquaddieTurn::default();
        turn.spend_action_points(2).unwrap();
        assert_eq!(turn.remaining_action_points(), 1);
        assert_eq!(
            turn.spend_action_points(2),
            Err(TurnError::NotEnoughActionPoints {
                required: 2,
                remaining: 1
            })
        );
    }

    #[test]
    fn new_turn_clears_the_penalty() {
        let mut turn = SquaddieTurn::default();
        turn.add_multiple_attack_penalty(-1);
        turn.add_multiple_attack_penalty(-1);
        turn.end_turn();
        assert_eq!(turn.multiple_attack_penalty(), -2);
        assert!(!turn.has_action_points_remaining());

        turn.begin_new_turn(3);
        assert_eq!(turn.multiple_attack_penalty(), 0);
        assert_eq!(turn.remaining_action_points(), 3);
    }
}
