//! Who and where an action may target.

/// Relation between the acting squaddie and a potential target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRelation {
    /// The actor itself.
    Myself,
    /// Someone friendly to the actor.
    Ally,
    /// Someone hostile to the actor.
    Foe,
}

/// Which relations an effect may be aimed at.
///
/// Every flag defaults to `false`; [`crate::ActionEffectTemplate::sanitize`]
/// guarantees at least one is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TargetAffiliations {
    pub target_self: bool,
    pub target_ally: bool,
    pub target_foe: bool,
}

impl TargetAffiliations {
    pub const SELF_ONLY: Self = Self {
        target_self: true,
        target_ally: false,
        target_foe: false,
    };
    pub const FOE: Self = Self {
        target_self: false,
        target_ally: false,
        target_foe: true,
    };
    pub const FRIENDLY: Self = Self {
        target_self: true,
        target_ally: true,
        target_foe: false,
    };

    pub fn allows(&self, relation: TargetRelation) -> bool {
        match relation {
            TargetRelation::Myself => self.target_self,
            TargetRelation::Ally => self.target_ally,
            TargetRelation::Foe => self.target_foe,
        }
    }

    pub fn any(&self) -> bool {
        self.target_self || self.target_ally || self.target_foe
    }

    pub fn is_self_only(&self) -> bool {
        self.target_self && !self.target_ally && !self.target_foe
    }

    /// Combines the permissions of several effects.
    pub fn union(self, other: Self) -> Self {
        Self {
            target_self: self.target_self || other.target_self,
            target_ally: self.target_ally || other.target_ally,
            target_foe: self.target_foe || other.target_foe,
        }
    }
}

/// Inclusive distance band (in hex steps) an action reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRange {
    pub min: u32,
    pub max: u32,
}

impl ActionRange {
    pub const SELF: Self = Self { min: 0, max: 0 };
    pub const MELEE: Self = Self { min: 1, max: 1 };

    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, distance: u32) -> bool {
        (self.min..=self.max).contains(&distance)
    }
}

impl Default for ActionRange {
    fn default() -> Self {
        Self::MELEE
    }
}

/// How the range spreads out from the actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingShape {
    /// Any tile within range.
    #[default]
    Snake,
    /// Only tiles along one of the six hex axes.
    Line,
}
