//! Dice rolling.

use std::collections::BTreeMap;

use crate::config::BattleConfig;

/// Source of die faces.
///
/// The runtime plugs in a seeded RNG; tests use [`SequenceRoller`].
pub trait DiceRoller {
    /// Rolls one die, returning a face in `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> u32;
}

/// Replays predetermined faces, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct SequenceRoller {
    faces: Vec<u32>,
    next: usize,
}

impl SequenceRoller {
    /// # Panics
    ///
    /// Panics if `faces` is empty.
    pub fn new(faces: impl Into<Vec<u32>>) -> Self {
        let faces = faces.into();
        assert!(!faces.is_empty(), "SequenceRoller needs at least one face");
        Self { faces, next: 0 }
    }
}

impl DiceRoller for SequenceRoller {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        face.clamp(1, sides)
    }
}

/// Named contribution to a roll total.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RollModifierType {
    MultipleAttackPenalty,
}

/// The actor's roll for one effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollResult {
    /// `false` when the effect never rolls; `rolls` is then empty.
    pub occurred: bool,
    pub rolls: Vec<u32>,
    pub roll_modifiers: BTreeMap<RollModifierType, i32>,
}

impl RollResult {
    /// An effect that succeeds without rolling.
    pub fn not_rolled() -> Self {
        Self::default()
    }

    /// Rolls the configured dice pool.
    pub fn roll(roller: &mut dyn DiceRoller, roll_modifiers: BTreeMap<RollModifierType, i32>) -> Self {
        let rolls = (0..BattleConfig::DICE_COUNT)
            .map(|_| roller.roll_die(BattleConfig::DICE_SIDES))
            .collect();
        Self {
            occurred: true,
            rolls,
            roll_modifiers,
        }
    }

    /// Sum of the dice alone.
    pub fn natural_total(&self) -> i32 {
        self.rolls.iter().sum::<u32>() as i32
    }

    pub fn modifier_total(&self) -> i32 {
        self.roll_modifiers.values().sum()
    }

    pub fn total(&self) -> i32 {
        self.natural_total() + self.modifier_total()
    }
}

/// Roll modifiers an actor brings to an attack.
pub fn roll_modifiers_for(multiple_attack_penalty: i32) -> BTreeMap<RollModifierType, i32> {
    let mut modifiers = BTreeMap::new();
    if multiple_attack_penalty != 0 {
        modifiers.insert(RollModifierType::MultipleAttackPenalty, multiple_attack_penalty);
    }
    modifiers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_roller_cycles() {
        let mut roller = SequenceRoller::new([2, 5]);
        assert_eq!(roller.roll_die(6), 2);
        assert_eq!(roller.roll_die(6), 5);
        assert_eq!(roller.roll_die(6), 2);
    }

    #[test]
    fn totals_include_modifiers() {
        let mut roller = SequenceRoller::new([3, 4]);
        let roll = RollResult::roll(&mut roller, roll_modifiers_for(-2));
        assert!(roll.occurred);
        assert_eq!(roll.natural_total(), 7);
        assert_eq!(roll.total(), 5);
        assert!(roll_modifiers_for(0).is_empty());
    }
}
