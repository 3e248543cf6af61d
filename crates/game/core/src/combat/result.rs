//! Result shapes shared by forecasting and resolution.

use crate::attribute::{AttributeModifier, AttributeTypeAndAmount};
use crate::ids::BattleSquaddieId;
use crate::squaddie::BattleSquaddie;

use super::{DamageExplanation, DegreeOfSuccess, RollResult};

/// Hit points and net attributes of a squaddie at one moment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquaddieSnapshot {
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub attribute_modifiers: Vec<AttributeTypeAndAmount>,
}

impl SquaddieSnapshot {
    pub fn of(squaddie: &BattleSquaddie) -> Self {
        Self {
            hit_points: squaddie.hit_points(),
            max_hit_points: squaddie.max_hit_points(),
            attribute_modifiers: squaddie.current_attribute_modifiers(),
        }
    }
}

/// What one effect does (or would do) to one squaddie.
///
/// Forecasts list one change per reachable degree of success; resolution
/// produces the change for the degree actually rolled. Both are computed by
/// the same code, so a forecast entry equals the resolved change for that
/// degree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleActionSquaddieChange {
    pub battle_squaddie_id: BattleSquaddieId,
    pub degree_of_success: DegreeOfSuccess,
    /// Percent chance of landing on `degree_of_success`.
    pub chance_of_degree_of_success: u32,
    pub damage: DamageExplanation,
    pub healing_received: u32,
    pub attribute_modifiers_granted: Vec<AttributeModifier>,
    pub attributes_before: SquaddieSnapshot,
    pub attributes_after: SquaddieSnapshot,
}

impl BattleActionSquaddieChange {
    /// Applies the change to a squaddie.
    ///
    /// Absorb is worn down first, then hit points change, then the granted
    /// modifiers are attached.
    pub fn apply_to(&self, squaddie: &mut BattleSquaddie) {
        squaddie.consume_absorb(self.damage.absorbed);
        squaddie.take_damage(self.damage.net);
        squaddie.receive_healing(self.healing_received);
        for modifier in &self.attribute_modifiers_granted {
            squaddie.add_attribute_modifier(modifier.clone());
        }
    }
}

/// The acting squaddie's side of a resolved effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleActionActorContext {
    pub actor_roll: RollResult,
    /// Accumulated penalty in force when the effect was used.
    pub multiple_attack_penalty: i32,
    pub actor_attribute_modifiers: Vec<AttributeTypeAndAmount>,
}
