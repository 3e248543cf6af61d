//! Data-driven battle content and its loaders.
//!
//! This crate reads RON/TOML data files into battle-core types:
//! - Action templates (RON)
//! - Squaddie templates (RON)
//! - Missions: map, placements, objectives, cutscenes (RON)
//! - Battle rules (TOML)
//!
//! Every loader returns plain battle-core values; assembling them into a
//! playable battle is [`loaders::ContentFactory::load_mission`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionTemplateLoader, ContentFactory, LoadedMission, MissionDefinition, MissionLoader,
    MissionMapSpec, RulesLoader, SquaddieLoader, SquaddiePlacement,
};
