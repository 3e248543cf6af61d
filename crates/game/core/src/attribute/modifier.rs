use super::{AttributeSource, AttributeType};

/// A single adjustment to one squaddie attribute.
///
/// Modifiers wear out through [`decrease_duration`](Self::decrease_duration),
/// [`spend_use`](Self::spend_use) and [`reduce_amount`](Self::reduce_amount).
/// Once inactive they stay inactive; consumers filter them out rather than
/// deleting them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeModifier {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub attribute_type: AttributeType,
    pub source: AttributeSource,
    pub amount: i32,
    /// Remaining turns. `None` lasts until the battle ends.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
    /// Remaining uses. `None` is unlimited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub number_of_uses: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl AttributeModifier {
    pub fn new(attribute_type: AttributeType, source: AttributeSource, amount: i32) -> Self {
        Self {
            attribute_type,
            source,
            amount,
            duration: None,
            number_of_uses: None,
            description: String::new(),
        }
    }

    /// Builder: expire after this many turns.
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Builder: expire after this many uses.
    pub fn with_number_of_uses(mut self, number_of_uses: u32) -> Self {
        self.number_of_uses = Some(number_of_uses);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_active(&self) -> bool {
        if self.duration == Some(0) || self.number_of_uses == Some(0) {
            return false;
        }
        !(self.amount <= 0 && self.attribute_type.requires_positive_amount())
    }

    /// Counts down one turn. Unlimited modifiers are unaffected.
    pub fn decrease_duration(&mut self) {
        if let Some(duration) = self.duration.as_mut() {
            *duration = duration.saturating_sub(1);
        }
    }

    /// Consumes one use. Unlimited modifiers are unaffected.
    pub fn spend_use(&mut self) {
        if let Some(uses) = self.number_of_uses.as_mut() {
            *uses = uses.saturating_sub(1);
        }
    }

    /// Moves the amount `by` points toward zero without crossing it.
    pub fn reduce_amount(&mut self, by: u32) {
        let by = i32::try_from(by).unwrap_or(i32::MAX);
        self.amount = if self.amount > 0 {
            self.amount.saturating_sub(by).max(0)
        } else {
            self.amount.saturating_add(by).min(0)
        };
    }

    /// Short text for HUD tooltips, e.g. `"Armor +1 (Circumstance)"`.
    pub fn readable_description(&self) -> String {
        let name = match self.attribute_type {
            AttributeType::Armor => "Armor",
            AttributeType::Movement => "Movement",
            AttributeType::Hustle => "Hustle",
            AttributeType::Elusive => "Elusive",
            AttributeType::Absorb => "Absorb",
        };
        let source = match self.source {
            AttributeSource::Circumstance => "Circumstance",
            AttributeSource::Item => "Item",
            AttributeSource::Status => "Status",
            AttributeSource::Proficiency => "Proficiency",
        };
        if self.attribute_type.is_binary() {
            format!("{name} ({source})")
        } else {
            format!("{name} {:+} ({source})", self.amount)
        }
    }
}
