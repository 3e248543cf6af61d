use crate::attribute::{
    AttributeModifier, AttributeType, AttributeTypeAndAmount, calculate_attribute_amount,
    calculate_current_attribute_modifiers,
};
use crate::ids::{BattleSquaddieId, SquaddieTemplateId};

use super::{SquaddieTemplate, SquaddieTurn};

/// A squaddie placed on the battlefield.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSquaddie {
    pub battle_squaddie_id: BattleSquaddieId,
    pub squaddie_template_id: SquaddieTemplateId,
    hit_points: u32,
    max_hit_points: u32,
    attribute_modifiers: Vec<AttributeModifier>,
    pub turn: SquaddieTurn,
}

impl BattleSquaddie {
    /// Spawns at full health carrying the template's innate modifiers.
    pub fn new(battle_squaddie_id: impl Into<BattleSquaddieId>, template: &SquaddieTemplate) -> Self {
        Self {
            battle_squaddie_id: battle_squaddie_id.into(),
            squaddie_template_id: template.id.clone(),
            hit_points: template.max_hit_points,
            max_hit_points: template.max_hit_points,
            attribute_modifiers: template.attribute_modifiers.clone(),
            turn: SquaddieTurn::default(),
        }
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    pub fn max_hit_points(&self) -> u32 {
        self.max_hit_points
    }

    pub fn damage_taken(&self) -> u32 {
        self.max_hit_points - self.hit_points
    }

    pub fn is_dead(&self) -> bool {
        self.hit_points == 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// Every modifier, active or not.
    pub fn attribute_modifiers(&self) -> &[AttributeModifier] {
        &self.attribute_modifiers
    }

    pub fn current_attribute_modifiers(&self) -> Vec<AttributeTypeAndAmount> {
        calculate_current_attribute_modifiers(&self.attribute_modifiers)
    }

    pub fn attribute_amount(&self, attribute_type: AttributeType) -> i32 {
        calculate_attribute_amount(&self.attribute_modifiers, attribute_type)
    }

    pub fn add_attribute_modifier(&mut self, modifier: AttributeModifier) {
        self.attribute_modifiers.push(modifier);
    }

    /// Removes hit points, returning how many were actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hit_points);
        self.hit_points -= lost;
        lost
    }

    /// Restores hit points, returning how many were actually gained.
    pub fn receive_healing(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.damage_taken());
        self.hit_points += gained;
        gained
    }

    /// Damage active `ABSORB` modifiers would soak from `raw`.
    pub fn absorbable(&self, raw: u32) -> u32 {
        let absorb = self.attribute_amount(AttributeType::Absorb).max(0) as u32;
        raw.min(absorb)
    }

    /// Wears down `ABSORB` modifiers by `absorbed` points, first come first served.
    pub fn consume_absorb(&mut self, absorbed: u32) {
        let mut remaining = absorbed;
        for modifier in self
            .attribute_modifiers
            .iter_mut()
            .filter(|m| m.attribute_type == AttributeType::Absorb && m.is_active())
        {
            if remaining == 0 {
                break;
            }
            let used = remaining.min(modifier.amount.max(0) as u32);
            modifier.reduce_amount(used);
            remaining -= used;
        }
    }

    /// Starts the squaddie's turn: refreshes action points and ticks durations.
    pub fn begin_new_turn(&mut self, action_points: u32) {
        self.turn.begin_new_turn(action_points);
        for modifier in &mut self.attribute_modifiers {
            modifier.decrease_duration();
        }
    }
}
