/// Battle rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Action points every squaddie receives at the start of its team's phase.
    pub action_points_per_turn: u32,

    /// How far above (or below) the defense a roll must land to become a
    /// critical success (or failure).
    pub critical_margin: i32,
}

impl BattleConfig {
    // ===== compile-time constants =====
    pub const DEFAULT_ACTION_POINTS: u32 = 3;
    /// Roll penalty contributed by each attack that does not waive it.
    pub const MULTIPLE_ATTACK_PENALTY: i32 = -1;
    pub const DICE_SIDES: u32 = 6;
    pub const DICE_COUNT: usize = 2;
    pub const DEFAULT_CRITICAL_MARGIN: i32 = 6;

    pub fn new() -> Self {
        Self {
            action_points_per_turn: Self::DEFAULT_ACTION_POINTS,
            critical_margin: Self::DEFAULT_CRITICAL_MARGIN,
        }
    }

    pub fn with_action_points(action_points_per_turn: u32) -> Self {
        Self {
            action_points_per_turn,
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
