//! Content loaders for reading battle data from files.
//!
//! Each loader turns one RON/TOML file into battle-core values.
//! [`ContentFactory`] ties them together for a whole data directory.

pub mod actions;
pub mod config;
pub mod factory;
pub mod mission;
pub mod squaddies;

pub use actions::ActionTemplateLoader;
pub use config::RulesLoader;
pub use factory::{ContentFactory, LoadedMission};
pub use mission::{MissionDefinition, MissionLoader, MissionMapSpec, SquaddiePlacement};
pub use squaddies::SquaddieLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
