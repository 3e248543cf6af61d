use crate::action::TargetRelation;

/// Team a squaddie fights for.
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
pub enum SquaddieAffiliation {
    Player,
    Ally,
    Enemy,
    /// Neutral squaddies are hostile to every other team.
    None,
}

impl SquaddieAffiliation {
    /// Phase order within a round.
    pub const PHASE_ORDER: [SquaddieAffiliation; 4] = [Self::Player, Self::Ally, Self::Enemy, Self::None];

    pub fn is_friendly_with(&self, other: SquaddieAffiliation) -> bool {
        match (self, other) {
            (Self::Player | Self::Ally, Self::Player | Self::Ally) => true,
            (Self::Enemy, Self::Enemy) => true,
            _ => false,
        }
    }

    /// How a squaddie of this team sees a squaddie of `other`.
    pub fn relation_to(&self, other: SquaddieAffiliation, same_squaddie: bool) -> TargetRelation {
        if same_squaddie {
            TargetRelation::Myself
        } else if self.is_friendly_with(other) {
            TargetRelation::Ally
        } else {
            TargetRelation::Foe
        }
    }

    /// The team phase that follows this one.
    pub fn next_phase(&self) -> SquaddieAffiliation {
        match self {
            Self::Player => Self::Ally,
            Self::Ally => Self::Enemy,
            Self::Enemy => Self::None,
            Self::None => Self::Player,
        }
    }
}
