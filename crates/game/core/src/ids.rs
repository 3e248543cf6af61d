use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifies one squaddie placed on the battlefield.
    ///
    /// Several battle squaddies may share a [`SquaddieTemplateId`].
    BattleSquaddieId
);

string_id!(
    /// Identifies the static description a battle squaddie was created from.
    SquaddieTemplateId
);

string_id!(
    /// Identifies an [`crate::ActionTemplate`] in the object repository.
    ActionTemplateId
);

string_id!(
    /// Identifies a cutscene registered with a mission.
    CutsceneId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_their_raw_value() {
        let id = BattleSquaddieId::from("knight_0");
        assert_eq!(id.to_string(), "knight_0");
        assert_eq!(id.as_str(), "knight_0");
    }

    #[test]
    fn ids_of_different_kinds_do_not_mix() {
        let action = ActionTemplateId::new("sword");
        let template = SquaddieTemplateId::new("sword");
        assert_eq!(action.as_str(), template.as_str());
    }
}
