//! Action template loader.
//!
//! Loads action templates from RON data files.

use std::path::Path;

use battle_core::ActionTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for action templates.
pub struct ActionTemplateLoader;

impl ActionTemplateLoader {
    /// Load every action template in a RON list.
    ///
    /// Templates are re-sanitized after parsing, so data files may omit
    /// traits and targets that the effect implies.
    pub fn load(path: &Path) -> LoadResult<Vec<ActionTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ActionTemplate>> {
        let templates: Vec<ActionTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse action template RON: {}", e))?;
        templates
            .into_iter()
            .map(|template| template.sanitize().map_err(anyhow::Error::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{TargetAffiliations, TraitStatusStorage};

    #[test]
    fn parses_and_sanitizes_templates() {
        let templates = ActionTemplateLoader::parse(
            r#"[
                (
                    id: "jab",
                    name: "Jab",
                    effects: [(damage: {Body: 1})],
                ),
            ]"#,
        )
        .unwrap();

        let jab = &templates[0];
        assert_eq!(jab.id().as_str(), "jab");
        assert!(jab.effects()[0].traits.contains(TraitStatusStorage::ATTACK));
        assert_eq!(jab.effects()[0].targets, TargetAffiliations::FOE);
        assert_eq!(jab.action_points(), 1);
    }

    #[test]
    fn rejects_templates_without_effects() {
        let err = ActionTemplateLoader::parse(r#"[(id: "idle", name: "Idle", effects: [])]"#)
            .unwrap_err();
        assert!(err.to_string().contains("no effects"));
    }
}
