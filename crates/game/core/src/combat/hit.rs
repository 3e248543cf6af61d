//! Degree of success for rolled effects.

use crate::action::TraitStatusStorage;
use crate::config::BattleConfig;

/// How well an effect landed.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DegreeOfSuccess {
    CriticalFailure,
    Failure,
    Success,
    CriticalSuccess,
}

impl DegreeOfSuccess {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::CriticalSuccess)
    }
}

/// Degree of success for a roll against a defense.
///
/// # Arguments
///
/// * `natural` - Sum of the dice alone
/// * `modifier_total` - Sum of roll modifiers (multiple attack penalty, ...)
/// * `defense` - Target's defense against the effect
/// * `traits` - Effect traits; `CANNOT_CRITICALLY_*` cap the result
/// * `critical_margin` - Distance from the defense that turns a result critical
pub fn degree_of_success(
    natural: i32,
    modifier_total: i32,
    defense: i32,
    traits: TraitStatusStorage,
    critical_margin: i32,
) -> DegreeOfSuccess {
    let total = natural + modifier_total;
    let max_natural = (BattleConfig::DICE_SIDES as i32) * (BattleConfig::DICE_COUNT as i32);
    let min_natural = BattleConfig::DICE_COUNT as i32;

    let mut degree = if total >= defense + critical_margin {
        DegreeOfSuccess::CriticalSuccess
    } else if total >= defense {
        DegreeOfSuccess::Success
    } else if total <= defense - critical_margin {
        DegreeOfSuccess::CriticalFailure
    } else {
        DegreeOfSuccess::Failure
    };

    if natural == max_natural {
        degree = DegreeOfSuccess::CriticalSuccess;
    } else if natural == min_natural {
        degree = DegreeOfSuccess::CriticalFailure;
    }

    if degree == DegreeOfSuccess::CriticalSuccess
        && traits.contains(TraitStatusStorage::CANNOT_CRITICALLY_SUCCEED)
    {
        degree = DegreeOfSuccess::Success;
    }
    if degree == DegreeOfSuccess::CriticalFailure
        && traits.contains(TraitStatusStorage::CANNOT_CRITICALLY_FAIL)
    {
        degree = DegreeOfSuccess::Failure;
    }
    degree
}

/// Number of the 36 possible 2d6 outcomes landing on each degree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeOfSuccessChances {
    pub critical_failure: u32,
    pub failure: u32,
    pub success: u32,
    pub critical_success: u32,
}

impl DegreeOfSuccessChances {
    pub const OUTCOMES: u32 = BattleConfig::DICE_SIDES * BattleConfig::DICE_SIDES;

    /// Chances for an effect that succeeds without rolling.
    pub fn certain_success() -> Self {
        Self {
            success: Self::OUTCOMES,
            ..Self::default()
        }
    }

    /// Enumerates every pair of die faces.
    pub fn for_roll(
        modifier_total: i32,
        defense: i32,
        traits: TraitStatusStorage,
        critical_margin: i32,
    ) -> Self {
        let mut chances = Self::default();
        for first in 1..=BattleConfig::DICE_SIDES {
            for second in 1..=BattleConfig::DICE_SIDES {
                let natural = (first + second) as i32;
                match degree_of_success(natural, modifier_total, defense, traits, critical_margin) {
                    DegreeOfSuccess::CriticalFailure => chances.critical_failure += 1,
                    DegreeOfSuccess::Failure => chances.failure += 1,
                    DegreeOfSuccess::Success => chances.success += 1,
                    DegreeOfSuccess::CriticalSuccess => chances.critical_success += 1,
                }
            }
        }
        chances
    }

    pub fn count(&self, degree: DegreeOfSuccess) -> u32 {
        match degree {
            DegreeOfSuccess::CriticalFailure => self.critical_failure,
            DegreeOfSuccess::Failure => self.failure,
            DegreeOfSuccess::Success => self.success,
            DegreeOfSuccess::CriticalSuccess => self.critical_success,
        }
    }

    /// Whole-number percentage, rounded down.
    pub fn percent(&self, degree: DegreeOfSuccess) -> u32 {
        self.count(degree) * 100 / Self::OUTCOMES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARGIN: i32 = BattleConfig::DEFAULT_CRITICAL_MARGIN;

    #[test]
    fn margins_decide_the_degree() {
        let none = TraitStatusStorage::empty();
        assert_eq!(degree_of_success(7, 0, 7, none, MARGIN), DegreeOfSuccess::Success);
        assert_eq!(degree_of_success(6, 0, 7, none, MARGIN), DegreeOfSuccess::Failure);
        assert_eq!(degree_of_success(11, 0, 5, none, MARGIN), DegreeOfSuccess::CriticalSuccess);
        assert_eq!(degree_of_success(3, 0, 9, none, MARGIN), DegreeOfSuccess::CriticalFailure);
        assert_eq!(degree_of_success(8, -2, 7, none, MARGIN), DegreeOfSuccess::Failure);
    }

    #[test]
    fn natural_extremes_are_critical_unless_forbidden() {
        let none = TraitStatusStorage::empty();
        assert_eq!(degree_of_success(12, 0, 20, none, MARGIN), DegreeOfSuccess::CriticalSuccess);
        assert_eq!(degree_of_success(2, 0, 0, none, MARGIN), DegreeOfSuccess::CriticalFailure);

        let capped =
            TraitStatusStorage::CANNOT_CRITICALLY_SUCCEED | TraitStatusStorage::CANNOT_CRITICALLY_FAIL;
        assert_eq!(degree_of_success(12, 0, 20, capped, MARGIN), DegreeOfSuccess::Success);
        assert_eq!(degree_of_success(2, 0, 0, capped, MARGIN), DegreeOfSuccess::Failure);
    }

    #[test]
    fn chances_cover_all_outcomes() {
        let chances = DegreeOfSuccessChances::for_roll(0, 7, TraitStatusStorage::empty(), MARGIN);
        let total = chances.critical_failure + chances.failure + chances.success + chances.critical_success;
        assert_eq!(total, DegreeOfSuccessChances::OUTCOMES);
        // 7 or better on 2d6, minus the natural 12 counted as critical
        assert_eq!(chances.success + chances.critical_success, 21);
        assert_eq!(chances.critical_success, 1);
        assert_eq!(chances.critical_failure, 1);
        assert_eq!(DegreeOfSuccessChances::certain_success().percent(DegreeOfSuccess::Success), 100);
    }
}
