//! Battlefield geometry consumed by the battle rules.
//!
//! Only coordinate lookup lives here: where each squaddie stands and which
//! tiles exist. Terrain costs and screen projection belong to the host.

mod coordinate;
mod mission_map;
mod targeting;

pub use coordinate::HexCoordinate;
pub use mission_map::{MapError, MissionMap};
pub use targeting::{
    RangeTargeting, TargetingError, TargetingRequest, TargetingResults, TargetingService,
};
