use std::rc::Rc;

use battle_core::{DiceRoller, RangeTargeting, TargetingService};

use crate::config::OrchestratorConfig;
use crate::message_board::{
    BattleActionListener, MessageBoard, MessageListener, MessageType, PlayerDecisionListener,
    PopupListener,
};
use crate::rng::RandomRoller;
use crate::strategy::{TargetFoeInRange, TeamStrategy};

use super::components::{
    ActionConfirm, ComputerSquaddieSelector, CutscenePlayer, MissionLoader, PhaseController,
    PlayerHudController, PlayerSquaddieSelector, PlayerSquaddieTarget, SquaddieMover,
    SquaddieUsesActionOnMap, SquaddieUsesActionOnSquaddie,
};
use super::{
    BattleOrchestrator, BattleOrchestratorMode, ComponentTable, MapDisplay, NoMapDisplay,
    OrchestratorComponent, UiControlSettings,
};

/// Builder for [`BattleOrchestrator`].
///
/// Unset collaborators default to [`RangeTargeting`], a [`RandomRoller`]
/// seeded from the config, [`TargetFoeInRange`] and [`NoMapDisplay`].
pub struct BattleOrchestratorBuilder {
    config: OrchestratorConfig,
    dice: Option<Box<dyn DiceRoller>>,
    targeting: Option<Rc<dyn TargetingService>>,
    strategy: Option<Box<dyn TeamStrategy>>,
    map_display: Option<Box<dyn MapDisplay>>,
    default_components: bool,
    components: Vec<(BattleOrchestratorMode, Box<dyn OrchestratorComponent>)>,
    listeners: Vec<(MessageType, Rc<dyn MessageListener>)>,
}

impl BattleOrchestratorBuilder {
    pub(super) fn new() -> Self {
        Self {
            config: OrchestratorConfig::default(),
            dice: None,
            targeting: None,
            strategy: None,
            map_display: None,
            default_components: true,
            components: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Dice used to resolve effects.
    pub fn dice(mut self, dice: impl DiceRoller + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    pub fn targeting(mut self, targeting: Rc<dyn TargetingService>) -> Self {
        self.targeting = Some(targeting);
        self
    }

    /// Strategy for every computer-controlled team.
    pub fn strategy(mut self, strategy: impl TeamStrategy + 'static) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    pub fn map_display(mut self, map_display: impl MapDisplay + 'static) -> Self {
        self.map_display = Some(Box::new(map_display));
        self
    }

    /// Leave every mode on the default component unless registered here.
    pub fn without_default_components(mut self) -> Self {
        self.default_components = false;
        self
    }

    /// Registers `component` for `mode`, replacing any default.
    pub fn component(
        mut self,
        mode: BattleOrchestratorMode,
        component: Box<dyn OrchestratorComponent>,
    ) -> Self {
        self.components.push((mode, component));
        self
    }

    /// Adds a listener after the built-in ones.
    pub fn listener(mut self, listener: Rc<dyn MessageListener>, message_type: MessageType) -> Self {
        self.listeners.push((message_type, listener));
        self
    }

    pub fn build(self) -> BattleOrchestrator {
        let config = self.config;
        let targeting = self
            .targeting
            .unwrap_or_else(|| Rc::new(RangeTargeting) as Rc<dyn TargetingService>);
        let dice = self
            .dice
            .unwrap_or_else(|| Box::new(RandomRoller::new(config.dice_seed)));
        let strategy = self
            .strategy
            .unwrap_or_else(|| Box::new(TargetFoeInRange));

        let mut message_board = MessageBoard::new();
        message_board.add_listener_for_all(
            Rc::new(PlayerDecisionListener::new(Rc::clone(&targeting))),
            &PlayerDecisionListener::MESSAGE_TYPES,
        );
        message_board.add_listener(Rc::new(PopupListener), MessageType::PlayerSelectionIsInvalid);
        message_board.add_listener(
            Rc::new(BattleActionListener),
            MessageType::BattleActionFinishesAnimation,
        );
        for (message_type, listener) in self.listeners {
            message_board.add_listener(listener, message_type);
        }

        let mut components = ComponentTable::default();
        if self.default_components {
            let autoplay = config.autoplay_player;
            components.register(BattleOrchestratorMode::LoadingMission, Box::new(MissionLoader::default()));
            components.register(BattleOrchestratorMode::CutscenePlayer, Box::new(CutscenePlayer::default()));
            components.register(
                BattleOrchestratorMode::PhaseController,
                Box::new(PhaseController::new(autoplay)),
            );
            components.register(
                BattleOrchestratorMode::PlayerSquaddieSelector,
                Box::new(PlayerSquaddieSelector),
            );
            components.register(
                BattleOrchestratorMode::PlayerSquaddieTarget,
                Box::new(PlayerSquaddieTarget::new(Rc::clone(&targeting))),
            );
            components.register(BattleOrchestratorMode::PlayerActionConfirm, Box::new(ActionConfirm::default()));
            components.register(
                BattleOrchestratorMode::PlayerHudController,
                Box::new(PlayerHudController::new(autoplay)),
            );
            components.register(
                BattleOrchestratorMode::ComputerSquaddieSelector,
                Box::new(ComputerSquaddieSelector::new(strategy, Rc::clone(&targeting))),
            );
            components.register(BattleOrchestratorMode::SquaddieMover, Box::new(SquaddieMover::default()));
            components.register(
                BattleOrchestratorMode::SquaddieUsesActionOnMap,
                Box::new(SquaddieUsesActionOnMap::default()),
            );
            components.register(
                BattleOrchestratorMode::SquaddieUsesActionOnSquaddie,
                Box::new(SquaddieUsesActionOnSquaddie::default()),
            );
        }
        for (mode, component) in self.components {
            components.register(mode, component);
        }

        BattleOrchestrator {
            mode: BattleOrchestratorMode::Unknown,
            components,
            message_board,
            dice,
            map_display: self.map_display.unwrap_or_else(|| Box::new(NoMapDisplay)),
            config,
            ui_control_settings: UiControlSettings::default(),
        }
    }
}
