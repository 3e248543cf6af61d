//! Action templates: what a squaddie can do and what each effect does.
//!
//! An [`ActionTemplate`] owns an ordered list of [`ActionEffectTemplate`]s.
//! Confirming a template queues one battle action per effect, so multi-hit
//! attacks resolve and animate one hit at a time.

mod effect_template;
mod error;
mod targeting;
mod template;
mod trait_status;

pub use effect_template::{ActionEffectTemplate, DamageType, HealingType, VersusSquaddieResistance};
pub use error::ActionTemplateError;
pub use targeting::{ActionRange, TargetAffiliations, TargetRelation, TargetingShape};
pub use template::{ActionResourceCost, ActionTemplate};
pub use trait_status::TraitStatusStorage;
