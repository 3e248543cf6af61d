use crate::action::VersusSquaddieResistance;
use crate::attribute::AttributeModifier;
use crate::ids::{ActionTemplateId, SquaddieTemplateId};

use super::SquaddieAffiliation;

/// Base defenses before attribute modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SquaddieDefenses {
    pub armor: i32,
    pub body: i32,
    pub mind: i32,
    pub soul: i32,
}

impl SquaddieDefenses {
    /// Base value rolled against, `None` for effects that never roll.
    pub fn against(&self, resistance: VersusSquaddieResistance) -> Option<i32> {
        match resistance {
            VersusSquaddieResistance::Armor => Some(self.armor),
            VersusSquaddieResistance::Body => Some(self.body),
            VersusSquaddieResistance::Mind => Some(self.mind),
            VersusSquaddieResistance::Soul => Some(self.soul),
            VersusSquaddieResistance::Other => None,
        }
    }
}

/// Static description shared by every battle squaddie created from it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquaddieTemplate {
    pub id: SquaddieTemplateId,
    pub name: String,
    pub affiliation: SquaddieAffiliation,
    pub max_hit_points: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defenses: SquaddieDefenses,
    #[cfg_attr(feature = "serde", serde(default = "default_movement"))]
    pub movement_per_action: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_template_ids: Vec<ActionTemplateId>,
    /// Modifiers every battle squaddie of this template starts with.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attribute_modifiers: Vec<AttributeModifier>,
}

#[cfg(feature = "serde")]
fn default_movement() -> u32 {
    SquaddieTemplate::DEFAULT_MOVEMENT
}

impl SquaddieTemplate {
    pub const DEFAULT_MOVEMENT: u32 = 2;

    pub fn new(
        id: impl Into<SquaddieTemplateId>,
        name: impl Into<String>,
        affiliation: SquaddieAffiliation,
        max_hit_points: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            affiliation,
            max_hit_points,
            defenses: SquaddieDefenses::default(),
            movement_per_action: Self::DEFAULT_MOVEMENT,
            action_template_ids: Vec::new(),
            attribute_modifiers: Vec::new(),
        }
    }

    pub fn with_defenses(mut self, defenses: SquaddieDefenses) -> Self {
        self.defenses = defenses;
        self
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.defenses.armor = armor;
        self
    }

    pub fn with_movement(mut self, movement_per_action: u32) -> Self {
        self.movement_per_action = movement_per_action;
        self
    }

    pub fn with_action(mut self, action_template_id: impl Into<ActionTemplateId>) -> Self {
        self.action_template_ids.push(action_template_id.into());
        self
    }

    pub fn with_attribute_modifier(mut self, modifier: AttributeModifier) -> Self {
        self.attribute_modifiers.push(modifier);
        self
    }

    pub fn knows_action(&self, action_template_id: &ActionTemplateId) -> bool {
        self.action_template_ids.contains(action_template_id)
    }
}
