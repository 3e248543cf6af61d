//! Orchestrator timing and automation settings.

use std::env;

/// Frame budgets and automation switches for the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Ticks spent animating one squaddie-targeting effect.
    pub action_animation_frames: u32,
    /// Ticks spent per tile of movement.
    pub move_frames_per_tile: u32,
    /// Ticks the phase banner stays up.
    pub phase_banner_frames: u32,
    /// Ticks spent on an end-turn action.
    pub end_turn_frames: u32,
    /// Let the computer play the player team (headless runs).
    pub autoplay_player: bool,
    /// Seed for the dice. `None` seeds from entropy.
    pub dice_seed: Option<u64>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            action_animation_frames: 30,
            move_frames_per_tile: 8,
            phase_banner_frames: 60,
            end_turn_frames: 10,
            autoplay_player: false,
            dice_seed: None,
        }
    }
}

impl OrchestratorConfig {
    /// No animation delays. Every timed component finishes on its first tick.
    pub fn instant() -> Self {
        Self {
            action_animation_frames: 0,
            move_frames_per_tile: 0,
            phase_banner_frames: 0,
            end_turn_frames: 0,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SQUADDIE_ACTION_ANIMATION_FRAMES` - Effect animation length (default: 30)
    /// - `SQUADDIE_MOVE_FRAMES_PER_TILE` - Movement speed (default: 8)
    /// - `SQUADDIE_PHASE_BANNER_FRAMES` - Phase banner length (default: 60)
    /// - `SQUADDIE_END_TURN_FRAMES` - End turn pause (default: 10)
    /// - `SQUADDIE_AUTOPLAY_PLAYER` - Computer controls the player team (default: false)
    /// - `SQUADDIE_DICE_SEED` - Fixed dice seed (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(frames) = read_env::<u32>("SQUADDIE_ACTION_ANIMATION_FRAMES") {
            config.action_animation_frames = frames;
        }
        if let Some(frames) = read_env::<u32>("SQUADDIE_MOVE_FRAMES_PER_TILE") {
            config.move_frames_per_tile = frames;
        }
        if let Some(frames) = read_env::<u32>("SQUADDIE_PHASE_BANNER_FRAMES") {
            config.phase_banner_frames = frames;
        }
        if let Some(frames) = read_env::<u32>("SQUADDIE_END_TURN_FRAMES") {
            config.end_turn_frames = frames;
        }
        if let Some(autoplay) = read_env_bool("SQUADDIE_AUTOPLAY_PLAYER") {
            config.autoplay_player = autoplay;
        }
        config.dice_seed = read_env::<u64>("SQUADDIE_DICE_SEED");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_config_keeps_automation_defaults() {
        let config = OrchestratorConfig::instant();
        assert_eq!(config.action_animation_frames, 0);
        assert!(!config.autoplay_player);
        assert_eq!(config.dice_seed, None);
    }
}
