//! Combat resolution.
//!
//! Dice, degree of success and the action calculator. Everything here is
//! deterministic given a [`DiceRoller`]; forecasting and resolution share the
//! [`BattleActionSquaddieChange`] shape.
//!
//! # Core Functions
//!
//! - [`ActionCalculator::forecast_results`]: outcomes per degree with chances
//! - [`ActionCalculator::calculate_results`]: roll once, resolve every target
//! - [`apply_results`]: commit a resolution to the repository

pub mod calculator;
pub mod damage;
pub mod hit;
pub mod result;
pub mod roll;

pub use calculator::{
    ActionCalculator, CalculatorError, EffectForecast, EffectRequest, EffectResolution,
    SquaddieForecast, apply_results,
};
pub use damage::DamageExplanation;
pub use hit::{DegreeOfSuccess, DegreeOfSuccessChances, degree_of_success};
pub use result::{BattleActionActorContext, BattleActionSquaddieChange, SquaddieSnapshot};
pub use roll::{DiceRoller, RollModifierType, RollResult, SequenceRoller, roll_modifiers_for};
