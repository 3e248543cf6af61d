use crate::ids::ActionTemplateId;

use super::{
    ActionEffectTemplate, ActionRange, ActionTemplateError, TargetAffiliations, TargetingShape,
};

/// What using an action costs the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionResourceCost {
    pub action_points: u32,
}

impl Default for ActionResourceCost {
    fn default() -> Self {
        Self { action_points: 1 }
    }
}

/// A named action made of one or more effects.
///
/// Templates are shared by id through [`crate::ObjectRepository`] and never
/// mutated after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionTemplate {
    id: ActionTemplateId,
    name: String,
    effects: Vec<ActionEffectTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    range: ActionRange,
    #[cfg_attr(feature = "serde", serde(default))]
    shape: TargetingShape,
    #[cfg_attr(feature = "serde", serde(default))]
    resource_cost: ActionResourceCost,
}

impl ActionTemplate {
    /// Creates a template, sanitizing every effect.
    pub fn new(
        id: impl Into<ActionTemplateId>,
        name: impl Into<String>,
        effects: Vec<ActionEffectTemplate>,
    ) -> Result<Self, ActionTemplateError> {
        let id = id.into();
        if effects.is_empty() {
            return Err(ActionTemplateError::NoEffects(id));
        }
        Ok(Self {
            id,
            name: name.into(),
            effects: effects.into_iter().map(ActionEffectTemplate::sanitize).collect(),
            range: ActionRange::default(),
            shape: TargetingShape::default(),
            resource_cost: ActionResourceCost::default(),
        })
    }

    pub fn with_range(mut self, range: ActionRange) -> Result<Self, ActionTemplateError> {
        if range.min > range.max {
            return Err(ActionTemplateError::InvalidRange {
                id: self.id,
                min: range.min,
                max: range.max,
            });
        }
        self.range = range;
        Ok(self)
    }

    pub fn with_shape(mut self, shape: TargetingShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_action_points(mut self, action_points: u32) -> Self {
        self.resource_cost.action_points = action_points;
        self
    }

    /// Re-applies construction rules to a deserialized template.
    pub fn sanitize(self) -> Result<Self, ActionTemplateError> {
        let Self {
            id,
            name,
            effects,
            range,
            shape,
            resource_cost,
        } = self;
        Ok(Self::new(id, name, effects)?
            .with_range(range)?
            .with_shape(shape)
            .with_action_points(resource_cost.action_points))
    }

    pub fn id(&self) -> &ActionTemplateId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn effects(&self) -> &[ActionEffectTemplate] {
        &self.effects
    }

    pub fn effect(&self, index: usize) -> Option<&ActionEffectTemplate> {
        self.effects.get(index)
    }

    pub fn range(&self) -> ActionRange {
        self.range
    }

    pub fn shape(&self) -> TargetingShape {
        self.shape
    }

    pub fn action_points(&self) -> u32 {
        self.resource_cost.action_points
    }

    /// Union of every effect's target affiliations.
    pub fn target_affiliations(&self) -> TargetAffiliations {
        self.effects
            .iter()
            .fold(TargetAffiliations::default(), |acc, effect| acc.union(effect.targets))
    }

    pub fn targets_only_self(&self) -> bool {
        self.target_affiliations().is_self_only()
    }

    pub fn is_attack(&self) -> bool {
        self.effects.iter().any(ActionEffectTemplate::is_attack)
    }

    pub fn is_healing(&self) -> bool {
        self.effects.iter().any(ActionEffectTemplate::is_healing)
    }

    /// Penalty this template adds to later attacks in the same turn.
    ///
    /// A template contributes at most one step no matter how many effects it has.
    pub fn multiple_attack_penalty(&self) -> i32 {
        self.effects
            .iter()
            .map(ActionEffectTemplate::multiple_attack_penalty)
            .min()
            .unwrap_or(0)
    }
}
