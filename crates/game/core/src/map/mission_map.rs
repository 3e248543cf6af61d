use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ErrorSeverity, GameError};
use crate::ids::BattleSquaddieId;

use super::HexCoordinate;

/// Errors raised while placing squaddies on the map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("coordinate {0} is outside the map")]
    OutOfBounds(HexCoordinate),

    #[error("coordinate {coordinate} is already occupied by {occupant}")]
    Occupied {
        coordinate: HexCoordinate,
        occupant: BattleSquaddieId,
    },

    #[error("coordinate {0} cannot be stood on")]
    Impassable(HexCoordinate),

    #[error("squaddie {0} is not on the map")]
    SquaddieNotOnMap(BattleSquaddieId),
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds(_) | Self::Occupied { .. } | Self::Impassable(_) => {
                ErrorSeverity::Recoverable
            }
            Self::SquaddieNotOnMap(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds(_) => "MAP_OUT_OF_BOUNDS",
            Self::Occupied { .. } => "MAP_OCCUPIED",
            Self::Impassable(_) => "MAP_IMPASSABLE",
            Self::SquaddieNotOnMap(_) => "MAP_SQUADDIE_NOT_ON_MAP",
        }
    }
}

/// Mission map: tile bounds plus a two-way squaddie location index.
///
/// Tiles form a parallelogram with `0 <= q < width` and `0 <= r < height`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissionMap {
    width: u32,
    height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    impassable: BTreeSet<HexCoordinate>,
    #[cfg_attr(feature = "serde", serde(default))]
    locations: BTreeMap<BattleSquaddieId, HexCoordinate>,
}

impl MissionMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            impassable: BTreeSet::new(),
            locations: BTreeMap::new(),
        }
    }

    /// Builder: mark tiles nobody can stand on (walls, pits).
    pub fn with_impassable(mut self, tiles: impl IntoIterator<Item = HexCoordinate>) -> Self {
        self.impassable.extend(tiles);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_on_map(&self, coordinate: &HexCoordinate) -> bool {
        coordinate.q >= 0
            && coordinate.r >= 0
            && (coordinate.q as u32) < self.width
            && (coordinate.r as u32) < self.height
    }

    pub fn is_passable(&self, coordinate: &HexCoordinate) -> bool {
        self.is_on_map(coordinate) && !self.impassable.contains(coordinate)
    }

    /// Iterates every tile on the map in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = HexCoordinate> + '_ {
        (0..self.height as i32)
            .flat_map(move |r| (0..self.width as i32).map(move |q| HexCoordinate::new(q, r)))
    }

    pub fn location_of(&self, battle_squaddie_id: &BattleSquaddieId) -> Option<HexCoordinate> {
        self.locations.get(battle_squaddie_id).copied()
    }

    pub fn squaddie_at(&self, coordinate: &HexCoordinate) -> Option<&BattleSquaddieId> {
        self.locations
            .iter()
            .find(|(_, location)| *location == coordinate)
            .map(|(id, _)| id)
    }

    pub fn squaddies(&self) -> impl Iterator<Item = (&BattleSquaddieId, &HexCoordinate)> {
        self.locations.iter()
    }

    pub fn add_squaddie(
        &mut self,
        battle_squaddie_id: BattleSquaddieId,
        coordinate: HexCoordinate,
    ) -> Result<(), MapError> {
        self.ensure_can_stand(&battle_squaddie_id, coordinate)?;
        self.locations.insert(battle_squaddie_id, coordinate);
        Ok(())
    }

    pub fn move_squaddie(
        &mut self,
        battle_squaddie_id: &BattleSquaddieId,
        destination: HexCoordinate,
    ) -> Result<(), MapError> {
        if !self.locations.contains_key(battle_squaddie_id) {
            return Err(MapError::SquaddieNotOnMap(battle_squaddie_id.clone()));
        }
        self.ensure_can_stand(battle_squaddie_id, destination)?;
        self.locations.insert(battle_squaddie_id.clone(), destination);
        Ok(())
    }

    /// Removes the squaddie from the map, returning where it stood.
    pub fn remove_squaddie(&mut self, battle_squaddie_id: &BattleSquaddieId) -> Option<HexCoordinate> {
        self.locations.remove(battle_squaddie_id)
    }

    fn ensure_can_stand(
        &self,
        battle_squaddie_id: &BattleSquaddieId,
        coordinate: HexCoordinate,
    ) -> Result<(), MapError> {
        if !self.is_on_map(&coordinate) {
            return Err(MapError::OutOfBounds(coordinate));
        }
        if self.impassable.contains(&coordinate) {
            return Err(MapError::Impassable(coordinate));
        }
        match self.squaddie_at(&coordinate) {
            Some(occupant) if occupant != battle_squaddie_id => Err(MapError::Occupied {
                coordinate,
                occupant: occupant.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_squaddie_locations_both_ways() {
        let mut map = MissionMap::new(4, 4);
        let knight = BattleSquaddieId::from("knight");
        map.add_squaddie(knight.clone(), HexCoordinate::new(1, 2)).unwrap();

        assert_eq!(map.location_of(&knight), Some(HexCoordinate::new(1, 2)));
        assert_eq!(map.squaddie_at(&HexCoordinate::new(1, 2)), Some(&knight));
        assert_eq!(map.squaddie_at(&HexCoordinate::new(2, 2)), None);
    }

    #[test]
    fn rejects_occupied_and_out_of_bounds_tiles() {
        let mut map = MissionMap::new(3, 3).with_impassable([HexCoordinate::new(2, 2)]);
        map.add_squaddie("a".into(), HexCoordinate::new(0, 0)).unwrap();

        assert!(matches!(
            map.add_squaddie("b".into(), HexCoordinate::new(0, 0)),
            Err(MapError::Occupied { .. })
        ));
        assert_eq!(
            map.add_squaddie("b".into(), HexCoordinate::new(3, 0)),
            Err(MapError::OutOfBounds(HexCoordinate::new(3, 0)))
        );
        assert_eq!(
            map.add_squaddie("b".into(), HexCoordinate::new(2, 2)),
            Err(MapError::Impassable(HexCoordinate::new(2, 2)))
        );
    }

    #[test]
    fn moving_frees_the_previous_tile() {
        let mut map = MissionMap::new(3, 3);
        let scout = BattleSquaddieId::from("scout");
        map.add_squaddie(scout.clone(), HexCoordinate::new(0, 0)).unwrap();
        map.move_squaddie(&scout, HexCoordinate::new(1, 1)).unwrap();

        assert_eq!(map.squaddie_at(&HexCoordinate::new(0, 0)), None);
        assert_eq!(map.location_of(&scout), Some(HexCoordinate::new(1, 1)));
        assert_eq!(map.coordinates().count(), 9);
    }
}
