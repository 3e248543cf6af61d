use std::fmt;

/// Axial hex coordinate (`q` column, `r` row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoordinate {
    pub q: i32,
    pub r: i32,
}

impl HexCoordinate {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Number of hex steps between two coordinates.
    pub fn distance_to(&self, other: &HexCoordinate) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }

    /// The six coordinates sharing an edge with this one.
    pub fn neighbors(&self) -> [HexCoordinate; 6] {
        [
            Self::new(self.q + 1, self.r),
            Self::new(self.q - 1, self.r),
            Self::new(self.q, self.r + 1),
            Self::new(self.q, self.r - 1),
            Self::new(self.q + 1, self.r - 1),
            Self::new(self.q - 1, self.r + 1),
        ]
    }
}

impl fmt::Display for HexCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_counts_hex_steps() {
        let origin = HexCoordinate::ORIGIN;
        assert_eq!(origin.distance_to(&origin), 0);
        assert_eq!(origin.distance_to(&HexCoordinate::new(0, 1)), 1);
        assert_eq!(origin.distance_to(&HexCoordinate::new(1, -1)), 1);
        assert_eq!(origin.distance_to(&HexCoordinate::new(2, 1)), 3);
        assert_eq!(origin.distance_to(&HexCoordinate::new(-2, 2)), 2);
    }

    #[test]
    fn every_neighbor_is_one_step_away() {
        let center = HexCoordinate::new(3, 4);
        for neighbor in center.neighbors() {
            assert_eq!(center.distance_to(&neighbor), 1);
        }
    }
}
