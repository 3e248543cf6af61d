/// Stat an [`super::AttributeModifier`] adjusts.
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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AttributeType {
    /// Raises the defense attacks roll against.
    Armor,
    /// Extra tiles per action point of movement.
    Movement,
    /// On/off: moving costs no more than one action point per action.
    Hustle,
    /// On/off: the squaddie cannot be critically hit.
    Elusive,
    /// Soaks this much incoming damage, then wears down.
    Absorb,
}

impl AttributeType {
    /// Binary attributes only care whether they are on, not how large they are.
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::Hustle | Self::Elusive)
    }

    /// Attributes that have no meaning once their amount drops to zero or below.
    pub const fn requires_positive_amount(&self) -> bool {
        self.is_binary() || matches!(self, Self::Absorb | Self::Movement)
    }
}

/// Where a modifier came from. Modifiers from the same source do not stack.
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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AttributeSource {
    /// Positioning, spells and other situational effects.
    Circumstance,
    /// Equipment.
    Item,
    /// Ongoing conditions such as being inspired or frightened.
    Status,
    /// Training; usually innate to the squaddie template.
    Proficiency,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn binary_attributes() {
        assert!(AttributeType::Hustle.is_binary());
        assert!(AttributeType::Elusive.is_binary());
        assert!(!AttributeType::Armor.is_binary());
        assert!(AttributeType::Absorb.requires_positive_amount());
        assert!(!AttributeType::Armor.requires_positive_amount());
    }

    #[test]
    fn parses_content_names() {
        assert_eq!(AttributeType::from_str("armor").unwrap(), AttributeType::Armor);
        assert_eq!(
            AttributeSource::from_str("CIRCUMSTANCE").unwrap(),
            AttributeSource::Circumstance
        );
        assert_eq!(AttributeType::Absorb.to_string(), "ABSORB");
    }
}
