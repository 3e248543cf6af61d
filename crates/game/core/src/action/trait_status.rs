use bitflags::bitflags;

bitflags! {
    /// Boolean traits attached to an action effect.
    ///
    /// Serialized as `"ATTACK | NO_MULTIPLE_ATTACK_PENALTY"` in content files.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct TraitStatusStorage: u16 {
        /// Rolls against a defense and contributes to the multiple attack penalty.
        const ATTACK                      = 1 << 0;
        /// Restores lost hit points.
        const HEALING                     = 1 << 1;
        /// Skips the roll entirely.
        const ALWAYS_SUCCEEDS             = 1 << 2;
        const CANNOT_CRITICALLY_SUCCEED   = 1 << 3;
        const CANNOT_CRITICALLY_FAIL      = 1 << 4;
        /// Attacks that neither suffer nor add to the multiple attack penalty.
        const NO_MULTIPLE_ATTACK_PENALTY  = 1 << 5;
    }
}

impl TraitStatusStorage {
    pub fn is_attack(&self) -> bool {
        self.contains(Self::ATTACK)
    }

    pub fn is_healing(&self) -> bool {
        self.contains(Self::HEALING)
    }
}
