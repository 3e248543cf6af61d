//! Mission loader.
//!
//! A mission file describes the map, who stands where, how the battle is
//! won or lost and which cutscenes play along the way.

use std::path::Path;

use battle_core::{
    BattleSquaddieId, Cutscene, CutsceneTrigger, HexCoordinate, MissionMap, MissionObjective,
    SquaddieTemplateId,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map bounds and blocked tiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionMapSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub impassable: Vec<HexCoordinate>,
}

impl MissionMapSpec {
    /// An empty map; squaddies are placed separately.
    pub fn build(&self) -> MissionMap {
        MissionMap::new(self.width, self.height).with_impassable(self.impassable.iter().copied())
    }
}

/// One squaddie spawned at mission start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquaddiePlacement {
    pub battle_squaddie_id: BattleSquaddieId,
    pub squaddie_template_id: SquaddieTemplateId,
    pub coordinate: HexCoordinate,
}

/// Mission file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionDefinition {
    pub name: String,
    pub map: MissionMapSpec,
    pub squaddies: Vec<SquaddiePlacement>,
    #[serde(default)]
    pub objectives: Vec<MissionObjective>,
    #[serde(default)]
    pub cutscenes: Vec<Cutscene>,
    #[serde(default)]
    pub cutscene_triggers: Vec<CutsceneTrigger>,
}

/// Loader for mission definitions from RON files.
pub struct MissionLoader;

impl MissionLoader {
    pub fn load(path: &Path) -> LoadResult<MissionDefinition> {
        let content = read_file(path)?;
        let mission: MissionDefinition = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse mission RON: {}", e))?;

        Ok(mission)
    }
}
