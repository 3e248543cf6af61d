//! Damage and healing arithmetic.

use super::DegreeOfSuccess;

/// Breakdown of damage dealt to one squaddie.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageExplanation {
    /// Damage after the degree of success was applied.
    pub raw: u32,
    /// Portion soaked by `ABSORB` modifiers.
    pub absorbed: u32,
    /// Hit points actually lost.
    pub net: u32,
}

/// Damage an effect deals at a given degree of success.
pub fn damage_for_degree(base: u32, degree: DegreeOfSuccess) -> u32 {
    match degree {
        DegreeOfSuccess::CriticalSuccess => base.saturating_mul(2),
        DegreeOfSuccess::Success => base,
        DegreeOfSuccess::Failure | DegreeOfSuccess::CriticalFailure => 0,
    }
}

/// Splits raw damage into absorbed and net parts.
///
/// # Arguments
///
/// * `raw` - Damage after the degree of success
/// * `absorbable` - Points the target's `ABSORB` modifiers can soak
/// * `hit_points` - Target's current hit points
pub fn explain_damage(raw: u32, absorbable: u32, hit_points: u32) -> DamageExplanation {
    let absorbed = raw.min(absorbable);
    DamageExplanation {
        raw,
        absorbed,
        net: (raw - absorbed).min(hit_points),
    }
}

/// Healing a squaddie actually receives.
pub fn healing_received(amount: u32, degree: DegreeOfSuccess, damage_taken: u32) -> u32 {
    if degree.is_success() {
        amount.min(damage_taken)
    } else {
        0
    }
}
