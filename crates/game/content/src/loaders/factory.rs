//! Content factory for assembling a playable mission from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use battle_core::{
    ActionTemplate, BattleConfig, BattleSquaddie, Cutscene, CutsceneTrigger, MissionMap,
    MissionObjective, ObjectRepository, SquaddieTemplate,
};

use crate::loaders::{
    ActionTemplateLoader, LoadResult, MissionDefinition, MissionLoader, RulesLoader,
    SquaddieLoader,
};

/// Everything needed to start a battle.
#[derive(Debug, Clone)]
pub struct LoadedMission {
    pub name: String,
    pub config: BattleConfig,
    pub repository: ObjectRepository,
    pub map: MissionMap,
    pub objectives: Vec<MissionObjective>,
    pub cutscenes: Vec<Cutscene>,
    pub cutscene_triggers: Vec<CutsceneTrigger>,
}

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── actions.ron
/// ├── squaddies.ron
/// └── missions/
///     └── bandit_ambush.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load battle rules from `rules.toml`.
    pub fn load_rules(&self) -> LoadResult<BattleConfig> {
        RulesLoader::load(&self.data_dir.join("rules.toml"))
    }

    /// Load action templates from `actions.ron`.
    pub fn load_action_templates(&self) -> LoadResult<Vec<ActionTemplate>> {
        ActionTemplateLoader::load(&self.data_dir.join("actions.ron"))
    }

    /// Load squaddie templates from `squaddies.ron`.
    pub fn load_squaddie_templates(&self) -> LoadResult<Vec<SquaddieTemplate>> {
        SquaddieLoader::load(&self.data_dir.join("squaddies.ron"))
    }

    /// Load a mission definition from `missions/{mission_name}.ron`.
    pub fn load_mission_definition(&self, mission_name: &str) -> LoadResult<MissionDefinition> {
        let path = self
            .data_dir
            .join("missions")
            .join(format!("{}.ron", mission_name));
        MissionLoader::load(&path)
    }

    /// Load and assemble a mission: repository, map, objectives and cutscenes.
    ///
    /// Fails when a squaddie references an unknown action or template, or
    /// when two placements collide.
    pub fn load_mission(&self, mission_name: &str) -> LoadResult<LoadedMission> {
        let config = self.load_rules()?;
        let mission = self.load_mission_definition(mission_name)?;

        let mut repository = ObjectRepository::new();
        for template in self.load_action_templates()? {
            repository.add_action_template(template)?;
        }
        for template in self.load_squaddie_templates()? {
            for action_id in &template.action_template_ids {
                repository
                    .get_action_template_by_id(action_id)
                    .with_context(|| format!("squaddie template {}", template.id))?;
            }
            repository.add_squaddie_template(template)?;
        }

        let mut map = mission.map.build();
        for placement in &mission.squaddies {
            let template = repository
                .get_squaddie_template(&placement.squaddie_template_id)
                .with_context(|| format!("placing {}", placement.battle_squaddie_id))?;
            let mut squaddie = BattleSquaddie::new(placement.battle_squaddie_id.clone(), template);
            squaddie.turn.begin_new_turn(config.action_points_per_turn);
            repository.add_battle_squaddie(squaddie)?;
            map.add_squaddie(placement.battle_squaddie_id.clone(), placement.coordinate)
                .with_context(|| format!("placing {}", placement.battle_squaddie_id))?;
        }

        Ok(LoadedMission {
            name: mission.name,
            config,
            repository,
            map,
            objectives: mission.objectives,
            cutscenes: mission.cutscenes,
            cutscene_triggers: mission.cutscene_triggers,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_directory_reports_the_path() {
        let err = ContentFactory::new("/nonexistent/battle").load_rules().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/battle/rules.toml"));
    }
}
