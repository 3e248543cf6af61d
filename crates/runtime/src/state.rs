//! Mutable battle state shared by the orchestrator, its components and the
//! message listeners.

use battle_content::LoadedMission;
use battle_core::{
    ActionCalculator, ActionEffectTemplate, ActionTemplateId, ActionValidityReason, BattleActionDecisionStep,
    BattleActionRecorder, BattleCompletionStatus, BattleConfig, BattleSquaddieId, Cutscene,
    CutsceneId, CutsceneTrigger, EffectForecast, EffectRequest, MissionMap, MissionObjective,
    ObjectRepository, SquaddieAffiliation, TargetingRequest, TargetingResults, TargetingService,
};

use crate::error::Result;
use crate::orchestrator::BattleOrchestratorMode;

/// Why a popup is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PopupWindowReason {
    BuffHasNoEffect,
    NotEnoughActionPoints,
    NoTargetsInRange,
    TargetOutOfRange,
    NoValidTargetAtLocation,
    CannotControlSquaddie,
    CannotMoveThere,
}

impl From<ActionValidityReason> for PopupWindowReason {
    fn from(reason: ActionValidityReason) -> Self {
        match reason {
            ActionValidityReason::BuffHasNoEffect => Self::BuffHasNoEffect,
            ActionValidityReason::NotEnoughActionPoints => Self::NotEnoughActionPoints,
        }
    }
}

/// Text shown to the player after a rejected selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupWindow {
    pub text: String,
    pub reason: PopupWindowReason,
}

impl PopupWindow {
    pub fn new(reason: PopupWindowReason, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reason,
        }
    }
}

/// Whose phase it is and how many rounds have started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BattlePhaseState {
    /// `None` before the first phase starts.
    pub current_affiliation: Option<SquaddieAffiliation>,
    /// 1-based; `0` before the first player phase.
    pub turn_count: u32,
}

/// Objectives, cutscenes and the completion flag of the running mission.
#[derive(Clone, Debug, Default)]
pub struct MissionProgress {
    pub objectives: Vec<MissionObjective>,
    pub cutscenes: Vec<Cutscene>,
    pub cutscene_triggers: Vec<CutsceneTrigger>,
    pub completion: BattleCompletionStatus,
    /// Set by the orchestrator once a finished battle's last component completes.
    pub battle_complete: bool,
    /// Cutscene the cutscene player should show next.
    pub pending_cutscene: Option<CutsceneId>,
    /// Mode to return to once the pending cutscene ends.
    pub resume_mode: Option<BattleOrchestratorMode>,
}

impl MissionProgress {
    pub fn cutscene(&self, cutscene_id: &CutsceneId) -> Option<&Cutscene> {
        self.cutscenes.iter().find(|cutscene| &cutscene.id == cutscene_id)
    }
}

/// Everything the battle mutates while it runs.
#[derive(Clone, Debug)]
pub struct BattleState {
    pub mission_name: String,
    pub config: BattleConfig,
    pub repository: ObjectRepository,
    pub map: MissionMap,
    pub phase: BattlePhaseState,
    pub mission: MissionProgress,
    pub decision_step: BattleActionDecisionStep,
    pub recorder: BattleActionRecorder,
    /// Last rejected selection, cleared by the next accepted one.
    pub popup: Option<PopupWindow>,
    /// Targets of the action being considered.
    pub targeting: Option<TargetingResults>,
    /// One forecast per effect of the considered action.
    pub forecast: Vec<EffectForecast>,
    /// Squaddie under the cursor, shown in the HUD without locking it.
    pub peeked_squaddie: Option<BattleSquaddieId>,
}

impl BattleState {
    pub fn new(config: BattleConfig, repository: ObjectRepository, map: MissionMap) -> Self {
        Self {
            mission_name: String::new(),
            config,
            repository,
            map,
            phase: BattlePhaseState::default(),
            mission: MissionProgress::default(),
            decision_step: BattleActionDecisionStep::new(),
            recorder: BattleActionRecorder::new(),
            popup: None,
            targeting: None,
            forecast: Vec::new(),
            peeked_squaddie: None,
        }
    }

    pub fn is_battle_complete(&self) -> bool {
        self.mission.battle_complete
    }

    /// Complete, with any closing cutscene already played.
    pub fn has_battle_ended(&self) -> bool {
        self.is_battle_complete() && self.mission.pending_cutscene.is_none()
    }

    /// Forget the action under consideration.
    pub fn clear_considerations(&mut self) {
        self.targeting = None;
        self.forecast.clear();
    }

    /// Living members of `affiliation` that can still spend action points.
    pub fn squaddies_ready_to_act(&self, affiliation: SquaddieAffiliation) -> Vec<BattleSquaddieId> {
        self.repository
            .team(affiliation)
            .into_iter()
            .filter(|id| {
                self.repository
                    .get_squaddie_by_battle_id(id)
                    .is_ok_and(|(_, squaddie)| {
                        squaddie.is_alive() && squaddie.turn.has_action_points_remaining()
                    })
            })
            .collect()
    }

    /// Asks `service` where the actor could aim the given action.
    pub fn find_valid_targets(
        &self,
        service: &dyn TargetingService,
        actor_id: &BattleSquaddieId,
        action_template_id: &ActionTemplateId,
    ) -> Result<TargetingResults> {
        let action_template = self.repository.get_action_template_by_id(action_template_id)?;
        let (acting_squaddie_template, acting_battle_squaddie) =
            self.repository.get_squaddie_by_battle_id(actor_id)?;
        let request = TargetingRequest {
            map: &self.map,
            action_template,
            acting_squaddie_template,
            acting_battle_squaddie,
            repository: &self.repository,
        };
        Ok(service.find_valid_targets(&request)?)
    }

    /// Squaddies one effect lands on when the actor aims at `chosen`.
    ///
    /// Self-only effects land on the actor wherever the action was aimed.
    /// Otherwise the chosen squaddies are kept when the effect may target
    /// them.
    pub fn effect_target_ids(
        &self,
        actor_id: &BattleSquaddieId,
        effect: &ActionEffectTemplate,
        chosen: &[BattleSquaddieId],
    ) -> Result<Vec<BattleSquaddieId>> {
        if effect.targets_only_self() {
            return Ok(vec![actor_id.clone()]);
        }
        let actor_affiliation = self.repository.affiliation_of(actor_id)?;
        let mut target_ids = Vec::with_capacity(chosen.len());
        for target_id in chosen {
            let relation = actor_affiliation
                .relation_to(self.repository.affiliation_of(target_id)?, target_id == actor_id);
            if effect.targets.allows(relation) {
                target_ids.push(target_id.clone());
            }
        }
        Ok(target_ids)
    }

    /// Forecasts every effect of the action against the squaddies it would
    /// land on, using the actor's current multiple attack penalty.
    pub fn forecast_action(
        &self,
        actor_id: &BattleSquaddieId,
        action_template_id: &ActionTemplateId,
        target_ids: &[BattleSquaddieId],
    ) -> Result<Vec<EffectForecast>> {
        let action_template = self.repository.get_action_template_by_id(action_template_id)?;
        let (_, actor) = self.repository.get_squaddie_by_battle_id(actor_id)?;
        let calculator = ActionCalculator::new(&self.repository, &self.config);

        let mut forecasts = Vec::with_capacity(action_template.effects().len());
        for (effect_index, effect) in action_template.effects().iter().enumerate() {
            let effect_target_ids = self.effect_target_ids(actor_id, effect, target_ids)?;
            let request = EffectRequest {
                actor_id,
                action_template,
                effect_index,
                target_ids: &effect_target_ids,
                multiple_attack_penalty: actor.turn.multiple_attack_penalty(),
            };
            forecasts.push(calculator.forecast_results(&request)?);
        }
        Ok(forecasts)
    }

    /// Whether any member of `affiliation` is still standing.
    pub fn team_has_living_squaddies(&self, affiliation: SquaddieAffiliation) -> bool {
        self.repository.team(affiliation).iter().any(|id| {
            self.repository
                .get_squaddie_by_battle_id(id)
                .is_ok_and(|(_, squaddie)| squaddie.is_alive())
        })
    }
}

impl From<LoadedMission> for BattleState {
    fn from(mission: LoadedMission) -> Self {
        let mut state = Self::new(mission.config, mission.repository, mission.map);
        state.mission_name = mission.name;
        state.mission.objectives = mission.objectives;
        state.mission.cutscenes = mission.cutscenes;
        state.mission.cutscene_triggers = mission.cutscene_triggers;
        state
    }
}
