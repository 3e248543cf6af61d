//! Squaddie template loader.

use std::path::Path;

use battle_core::SquaddieTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for squaddie templates from RON files.
pub struct SquaddieLoader;

impl SquaddieLoader {
    /// Load a RON list of squaddie templates.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing `Vec<SquaddieTemplate>`
    pub fn load(path: &Path) -> LoadResult<Vec<SquaddieTemplate>> {
        let content = read_file(path)?;
        let templates: Vec<SquaddieTemplate> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse squaddie RON: {}", e))?;

        Ok(templates)
    }
}
