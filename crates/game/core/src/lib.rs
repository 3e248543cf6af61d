//! Deterministic battle rules shared by the runtime, content loaders and tools.
//!
//! `battle-core` defines the canonical data model (squaddies, action
//! templates, attribute modifiers, decision steps, battle actions) and the
//! pure calculations over it. Nothing here logs, reads the clock or rolls
//! real dice; randomness enters through [`DiceRoller`].
pub mod action;
pub mod attribute;
pub mod combat;
pub mod config;
pub mod decision;
pub mod error;
pub mod ids;
pub mod map;
pub mod mission;
pub mod repository;
pub mod squaddie;
pub mod validity;

pub use action::{
    ActionEffectTemplate, ActionRange, ActionResourceCost, ActionTemplate, ActionTemplateError,
    DamageType, HealingType, TargetAffiliations, TargetRelation, TargetingShape,
    TraitStatusStorage, VersusSquaddieResistance,
};
pub use attribute::{
    AttributeModifier, AttributeSource, AttributeType, AttributeTypeAndAmount,
    calculate_attribute_amount, calculate_current_attribute_modifiers,
};
pub use combat::{
    ActionCalculator, BattleActionActorContext, BattleActionSquaddieChange, CalculatorError,
    DamageExplanation, DegreeOfSuccess, DegreeOfSuccessChances, DiceRoller, EffectForecast,
    EffectRequest, EffectResolution, RollModifierType, RollResult, SequenceRoller,
    SquaddieForecast, SquaddieSnapshot, apply_results,
};
pub use config::BattleConfig;
pub use decision::{
    BattleAction, BattleActionAction, BattleActionAnimation, BattleActionDecisionStep,
    BattleActionEffect, BattleActionRecorder, DecisionAction, DecisionStepError, DecisionTarget,
};
pub use error::{ErrorSeverity, GameError};
pub use ids::{ActionTemplateId, BattleSquaddieId, CutsceneId, SquaddieTemplateId};
pub use map::{
    HexCoordinate, MapError, MissionMap, RangeTargeting, TargetingError, TargetingRequest,
    TargetingResults, TargetingService,
};
pub use mission::{
    BattleCompletionStatus, Cutscene, CutsceneTrigger, CutsceneTriggerCondition, DialogueLine,
    MissionObjective, evaluate_objectives,
};
pub use repository::{ObjectRepository, RepositoryError};
pub use squaddie::{
    BattleSquaddie, SquaddieAffiliation, SquaddieDefenses, SquaddieTemplate, SquaddieTurn,
    TurnError,
};
pub use validity::{
    ActionPointCheck, ActionValidity, ActionValidityCheck, ActionValidityReason, BuffSelfCheck,
    validate_action,
};
