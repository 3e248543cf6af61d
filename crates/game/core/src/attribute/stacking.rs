use std::collections::BTreeMap;

use super::{AttributeModifier, AttributeSource, AttributeType};

/// Net amount of one attribute after stacking rules have been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeTypeAndAmount {
    pub attribute_type: AttributeType,
    pub amount: i32,
}

impl AttributeTypeAndAmount {
    pub const fn new(attribute_type: AttributeType, amount: i32) -> Self {
        Self {
            attribute_type,
            amount,
        }
    }
}

/// Collapses every modifier on a squaddie into one net amount per attribute.
///
/// 1. Inactive modifiers are ignored.
/// 2. Within one (type, source) pair the largest bonus is kept.
/// 3. Within one (type, source) pair the most negative penalty is kept.
/// 4. Surviving bonuses and penalties are summed per type.
/// 5. Types netting to exactly zero are dropped.
///
/// The result is ordered by [`AttributeType`].
pub fn calculate_current_attribute_modifiers(
    modifiers: &[AttributeModifier],
) -> Vec<AttributeTypeAndAmount> {
    let mut best_bonus: BTreeMap<(AttributeType, AttributeSource), i32> = BTreeMap::new();
    let mut worst_penalty: BTreeMap<(AttributeType, AttributeSource), i32> = BTreeMap::new();

    for modifier in modifiers.iter().filter(|m| m.is_active()) {
        let key = (modifier.attribute_type, modifier.source);
        match modifier.amount {
            amount if amount > 0 => {
                let best = best_bonus.entry(key).or_insert(amount);
                *best = (*best).max(amount);
            }
            amount if amount < 0 => {
                let worst = worst_penalty.entry(key).or_insert(amount);
                *worst = (*worst).min(amount);
            }
            _ => {}
        }
    }

    let mut net: BTreeMap<AttributeType, i32> = BTreeMap::new();
    for ((attribute_type, _), amount) in best_bonus.into_iter().chain(worst_penalty) {
        *net.entry(attribute_type).or_insert(0) += amount;
    }

    net.into_iter()
        .filter(|(_, amount)| *amount != 0)
        .map(|(attribute_type, amount)| AttributeTypeAndAmount::new(attribute_type, amount))
        .collect()
}

/// Net amount for a single attribute, `0` when nothing applies.
pub fn calculate_attribute_amount(
    modifiers: &[AttributeModifier],
    attribute_type: AttributeType,
) -> i32 {
    calculate_current_attribute_modifiers(modifiers)
        .into_iter()
        .find(|entry| entry.attribute_type == attribute_type)
        .map_or(0, |entry| entry.amount)
}
