use std::collections::BTreeMap;

use crate::attribute::AttributeModifier;
use crate::config::BattleConfig;

use super::{TargetAffiliations, TraitStatusStorage};

/// Kind of harm an effect deals.
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
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum DamageType {
    Body,
    Mind,
    Soul,
    Unknown,
}

/// Kind of restoration an effect performs.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum HealingType {
    LostHitPoints,
}

/// Which defense an effect rolls against.
///
/// `Other` means the effect never rolls.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum VersusSquaddieResistance {
    Armor,
    Body,
    Mind,
    Soul,
    #[default]
    Other,
}

/// Static description of one effect of an action.
///
/// Build with the `with_*` methods and finish with [`sanitize`](Self::sanitize);
/// [`ActionTemplate::new`](crate::ActionTemplate::new) sanitizes every effect it
/// receives, so templates in the repository are always normalized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionEffectTemplate {
    pub damage: BTreeMap<DamageType, u32>,
    pub healing: BTreeMap<HealingType, u32>,
    pub traits: TraitStatusStorage,
    pub attribute_modifiers: Vec<AttributeModifier>,
    pub targets: TargetAffiliations,
    pub versus_squaddie_resistance: VersusSquaddieResistance,
}

impl ActionEffectTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a plain attack against armor.
    pub fn attack(damage_type: DamageType, amount: u32) -> Self {
        Self::new()
            .with_damage(damage_type, amount)
            .with_traits(TraitStatusStorage::ATTACK)
            .targeting(TargetAffiliations::FOE)
            .versus(VersusSquaddieResistance::Armor)
    }

    pub fn with_damage(mut self, damage_type: DamageType, amount: u32) -> Self {
        self.damage.insert(damage_type, amount);
        self
    }

    pub fn with_healing(mut self, healing_type: HealingType, amount: u32) -> Self {
        self.healing.insert(healing_type, amount);
        self
    }

    pub fn with_traits(mut self, traits: TraitStatusStorage) -> Self {
        self.traits |= traits;
        self
    }

    pub fn with_attribute_modifier(mut self, modifier: AttributeModifier) -> Self {
        self.attribute_modifiers.push(modifier);
        self
    }

    pub fn targeting(mut self, targets: TargetAffiliations) -> Self {
        self.targets = targets;
        self
    }

    pub fn versus(mut self, resistance: VersusSquaddieResistance) -> Self {
        self.versus_squaddie_resistance = resistance;
        self
    }

    /// Normalizes the effect.
    ///
    /// - zero damage and healing entries are dropped
    /// - any damage implies `ATTACK`, any healing implies `HEALING`
    /// - an effect without target affiliations targets foes when it
    ///   attacks and only its user otherwise
    pub fn sanitize(mut self) -> Self {
        self.damage.retain(|_, amount| *amount > 0);
        self.healing.retain(|_, amount| *amount > 0);

        if !self.damage.is_empty() {
            self.traits |= TraitStatusStorage::ATTACK;
        }
        if !self.healing.is_empty() {
            self.traits |= TraitStatusStorage::HEALING;
        }
        if !self.targets.any() {
            self.targets = if self.is_attack() {
                TargetAffiliations::FOE
            } else {
                TargetAffiliations::SELF_ONLY
            };
        }
        self
    }

    pub fn is_attack(&self) -> bool {
        self.traits.is_attack()
    }

    pub fn is_healing(&self) -> bool {
        self.traits.is_healing()
    }

    pub fn targets_only_self(&self) -> bool {
        self.targets.is_self_only()
    }

    pub fn total_damage(&self) -> u32 {
        self.damage.values().sum()
    }

    pub fn total_healing(&self) -> u32 {
        self.healing.values().sum()
    }

    /// Penalty this effect adds to later attacks in the same turn.
    pub fn multiple_attack_penalty(&self) -> i32 {
        if self.is_attack() && !self.traits.contains(TraitStatusStorage::NO_MULTIPLE_ATTACK_PENALTY)
        {
            BattleConfig::MULTIPLE_ATTACK_PENALTY
        } else {
            0
        }
    }

    /// Whether the accumulated multiple attack penalty applies to this effect's roll.
    pub fn suffers_multiple_attack_penalty(&self) -> bool {
        self.multiple_attack_penalty() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttributeSource, AttributeType};

    #[test]
    fn sanitize_infers_traits_and_targets() {
        let strike = ActionEffectTemplate::new()
            .with_damage(DamageType::Body, 2)
            .sanitize();
        assert!(strike.is_attack());
        assert_eq!(strike.targets, TargetAffiliations::FOE);

        let bandage = ActionEffectTemplate::new()
            .with_healing(HealingType::LostHitPoints, 2)
            .sanitize();
        assert!(bandage.is_healing());
        assert!(bandage.targets_only_self());
    }

    #[test]
    fn sanitize_keeps_explicit_targets_and_drops_zero_amounts() {
        let effect = ActionEffectTemplate::new()
            .with_damage(DamageType::Mind, 0)
            .targeting(TargetAffiliations::FRIENDLY)
            .with_attribute_modifier(AttributeModifier::new(
                AttributeType::Armor,
                AttributeSource::Circumstance,
                1,
            ))
            .sanitize();

        assert!(effect.damage.is_empty());
        assert!(!effect.is_attack());
        assert_eq!(effect.targets, TargetAffiliations::FRIENDLY);
    }

    #[test]
    fn only_plain_attacks_carry_the_penalty() {
        let attack = ActionEffectTemplate::attack(DamageType::Body, 1);
        assert_eq!(attack.multiple_attack_penalty(), -1);

        let quick = ActionEffectTemplate::attack(DamageType::Body, 1)
            .with_traits(TraitStatusStorage::NO_MULTIPLE_ATTACK_PENALTY);
        assert_eq!(quick.multiple_attack_penalty(), 0);

        let heal = ActionEffectTemplate::new()
            .with_healing(HealingType::LostHitPoints, 1)
            .sanitize();
        assert_eq!(heal.multiple_attack_penalty(), 0);
    }

    #[test]
    fn totals_sum_every_type() {
        let effect = ActionEffectTemplate::new()
            .with_damage(DamageType::Body, 2)
            .with_damage(DamageType::Soul, 1);
        assert_eq!(effect.total_damage(), 3);
        assert_eq!(effect.total_healing(), 0);
    }
}
