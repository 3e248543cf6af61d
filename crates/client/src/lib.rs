//! Headless battle simulation.
//!
//! # Architecture
//!
//! ```text
//! SimulationConfig (environment)
//!   ├─→ ContentFactory (mission data)
//!   ├─→ BattleOrchestrator (autoplayed, instant frames)
//!   └─→ TextMapDisplay (map snapshots at debug level)
//! ```
//!
//! The binary in `main.rs` only sets up logging and calls
//! [`run_simulation`].

mod display;

pub use display::TextMapDisplay;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use battle_content::ContentFactory;
use battle_core::{BattleCompletionStatus, SquaddieAffiliation};
use battle_runtime::{BattleOrchestrator, BattleState, OrchestratorConfig};

/// Settings for one simulated battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Data directory. `None` uses the content bundled with `battle-content`.
    pub content_dir: Option<PathBuf>,
    pub mission: String,
    /// Give up after this many orchestrator ticks.
    pub max_ticks: usize,
    pub orchestrator: OrchestratorConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            mission: "bandit_ambush".to_string(),
            max_ticks: 50_000,
            orchestrator: OrchestratorConfig {
                autoplay_player: true,
                ..OrchestratorConfig::instant()
            },
        }
    }
}

impl SimulationConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SQUADDIE_CONTENT_DIR` - Data directory (default: bundled content)
    /// - `SQUADDIE_MISSION` - Mission file name (default: bandit_ambush)
    /// - `SQUADDIE_MAX_TICKS` - Tick limit (default: 50000)
    ///
    /// Orchestrator settings come from [`OrchestratorConfig::from_env`], with
    /// the player team always autoplayed.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            content_dir: env::var_os("SQUADDIE_CONTENT_DIR").map(PathBuf::from),
            mission: env::var("SQUADDIE_MISSION").unwrap_or(defaults.mission),
            max_ticks: env::var("SQUADDIE_MAX_TICKS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.max_ticks),
            orchestrator: OrchestratorConfig {
                autoplay_player: true,
                ..OrchestratorConfig::from_env()
            },
        }
    }
}

/// How a simulated battle ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationReport {
    pub mission_name: String,
    pub completion: BattleCompletionStatus,
    pub ticks: usize,
    pub turns: u32,
    pub battle_actions: usize,
    pub survivors: Vec<(String, SquaddieAffiliation, u32)>,
}

/// Loads the mission and ticks the orchestrator until the battle completes.
///
/// # Errors
///
/// Fails when the content cannot be loaded, when the orchestrator reports an
/// invariant violation, or when the tick limit is reached first.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport> {
    let factory = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir.clone()),
        None => ContentFactory::bundled(),
    };
    let mission = factory
        .load_mission(&config.mission)
        .with_context(|| format!("loading mission {}", config.mission))?;
    let mut state = BattleState::from(mission);
    let mut orchestrator = BattleOrchestrator::builder()
        .config(config.orchestrator.clone())
        .map_display(TextMapDisplay::default())
        .build();

    tracing::info!(mission = %state.mission_name, max_ticks = config.max_ticks, "simulation started");

    let mut ticks = 0;
    while !state.has_battle_ended() {
        if ticks == config.max_ticks {
            bail!(
                "battle {} still running after {} ticks (turn {})",
                state.mission_name,
                ticks,
                state.phase.turn_count
            );
        }
        orchestrator
            .update(&mut state)
            .with_context(|| format!("tick {ticks} in mode {}", orchestrator.mode()))?;
        ticks += 1;
    }

    Ok(report(&state, ticks))
}

fn report(state: &BattleState, ticks: usize) -> SimulationReport {
    let survivors = state
        .repository
        .battle_squaddie_ids()
        .filter_map(|id| {
            let (template, squaddie) = state.repository.get_squaddie_by_battle_id(id).ok()?;
            squaddie
                .is_alive()
                .then(|| (id.to_string(), template.affiliation, squaddie.hit_points()))
        })
        .collect();

    SimulationReport {
        mission_name: state.mission_name.clone(),
        completion: state.mission.completion,
        ticks,
        turns: state.phase.turn_count,
        battle_actions: state.recorder.already_animated().len(),
        survivors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.orchestrator.dice_seed = Some(seed);
        config
    }

    #[test]
    fn same_seed_same_battle() {
        let first = run_simulation(&config(3));
        let second = run_simulation(&config(3));
        match (first, second) {
            (Ok(first), Ok(second)) => {
                assert_eq!(first, second);
                assert_ne!(first.completion, BattleCompletionStatus::InProgress);
                assert!(first.survivors.iter().all(|(_, _, hit_points)| *hit_points > 0));
            }
            (Err(first), Err(second)) => assert_eq!(first.to_string(), second.to_string()),
            (first, second) => panic!("runs diverged: {first:?} vs {second:?}"),
        }
    }

    #[test]
    fn unknown_mission_names_the_mission() {
        let config = SimulationConfig {
            mission: "no_such_mission".to_string(),
            ..SimulationConfig::default()
        };
        let err = run_simulation(&config).unwrap_err();
        assert!(format!("{err:#}").contains("no_such_mission"));
    }

    #[test]
    fn tick_limit_is_reported() {
        let config = SimulationConfig {
            max_ticks: 3,
            ..config(5)
        };
        let err = run_simulation(&config).unwrap_err();
        assert!(err.to_string().contains("after 3 ticks"));
    }
}
