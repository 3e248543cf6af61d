use std::cell::RefCell;
use std::rc::Rc;

use battle_core::{
    ActionEffectTemplate, ActionRange, ActionTemplate, BattleConfig, BattleSquaddie, DamageType,
    HealingType, HexCoordinate, MissionMap, ObjectRepository, SequenceRoller, SquaddieAffiliation,
    SquaddieTemplate, TargetAffiliations,
};
use battle_runtime::{
    BattleMessage, BattleOrchestrator, BattleOrchestratorMode, BattleState, KeyEvent, MessageBoard,
    MessageListener, MessageType, MouseEvent, OrchestratorConfig, PopupWindowReason, Result,
};

const KNIGHT: HexCoordinate = HexCoordinate::new(1, 1);
const BANDIT: HexCoordinate = HexCoordinate::new(2, 1);
const SECOND_BANDIT: HexCoordinate = HexCoordinate::new(1, 2);

const SLASH: usize = 0;
const TWIN_STRIKE: usize = 1;
const FIRST_AID: usize = 2;

/// Knight with a melee attack, a two-effect attack and a self heal, facing
/// one bandit (or two, with `crowded`).
fn battle(crowded: bool) -> BattleState {
    let mut repository = ObjectRepository::new();
    let slash = ActionTemplate::new(
        "slash",
        "Slash",
        vec![ActionEffectTemplate::attack(DamageType::Body, 1)],
    )
    .unwrap();
    let twin_strike = ActionTemplate::new(
        "twin_strike",
        "Twin Strike",
        vec![
            ActionEffectTemplate::attack(DamageType::Body, 1),
            ActionEffectTemplate::attack(DamageType::Body, 2),
        ],
    )
    .unwrap()
    .with_action_points(2);
    let first_aid = ActionTemplate::new(
        "first_aid",
        "First Aid",
        vec![
            ActionEffectTemplate::new()
                .with_healing(HealingType::LostHitPoints, 2)
                .targeting(TargetAffiliations::SELF_ONLY),
        ],
    )
    .unwrap()
    .with_range(ActionRange::SELF)
    .unwrap();
    for template in [slash, twin_strike, first_aid] {
        repository.add_action_template(template).unwrap();
    }

    let knight = SquaddieTemplate::new("knight", "Sir Camil", SquaddieAffiliation::Player, 5)
        .with_action("slash")
        .with_action("twin_strike")
        .with_action("first_aid");
    let bandit = SquaddieTemplate::new("bandit", "Bandit", SquaddieAffiliation::Enemy, 5).with_armor(5);
    repository.add_squaddie_template(knight.clone()).unwrap();
    repository.add_squaddie_template(bandit.clone()).unwrap();

    let mut map = MissionMap::new(6, 6);
    repository.add_battle_squaddie(BattleSquaddie::new("knight_0", &knight)).unwrap();
    map.add_squaddie("knight_0".into(), KNIGHT).unwrap();
    repository.add_battle_squaddie(BattleSquaddie::new("bandit_0", &bandit)).unwrap();
    map.add_squaddie("bandit_0".into(), BANDIT).unwrap();
    if crowded {
        repository.add_battle_squaddie(BattleSquaddie::new("bandit_1", &bandit)).unwrap();
        map.add_squaddie("bandit_1".into(), SECOND_BANDIT).unwrap();
    }

    BattleState::new(BattleConfig::default(), repository, map)
}

#[derive(Default)]
struct Recording(RefCell<Vec<BattleMessage>>);

impl MessageListener for Recording {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn receive_message(
        &self,
        _board: &MessageBoard,
        _state: &mut BattleState,
        message: &BattleMessage,
    ) -> Result<()> {
        self.0.borrow_mut().push(message.clone());
        Ok(())
    }
}

fn orchestrator() -> BattleOrchestrator {
    BattleOrchestrator::builder()
        .config(OrchestratorConfig::instant())
        .dice(SequenceRoller::new([3, 4]))
        .build()
}

/// Ticks until the orchestrator reaches `mode`.
fn tick_until(orchestrator: &mut BattleOrchestrator, state: &mut BattleState, mode: BattleOrchestratorMode) {
    for _ in 0..64 {
        if orchestrator.mode() == mode {
            return;
        }
        orchestrator.update(state).unwrap();
    }
    panic!("never reached {mode}, stuck in {}", orchestrator.mode());
}

fn hit_points(state: &BattleState, battle_squaddie_id: &str) -> u32 {
    let (_, squaddie) = state
        .repository
        .get_squaddie_by_battle_id(&battle_squaddie_id.into())
        .unwrap();
    squaddie.hit_points()
}

/// Runs start-up and the first player phase banner, leaving the knight locked.
fn start_player_phase(orchestrator: &mut BattleOrchestrator, state: &mut BattleState) {
    tick_until(orchestrator, state, BattleOrchestratorMode::PlayerSquaddieSelector);
    assert_eq!(state.phase.turn_count, 1);
    assert_eq!(state.decision_step.actor(), Some(&"knight_0".into()));
}

#[test]
fn battle_starts_unknown_and_loads_into_the_player_phase() {
    let mut orchestrator = orchestrator();
    let mut state = battle(false);
    assert_eq!(orchestrator.mode(), BattleOrchestratorMode::Unknown);

    orchestrator.update(&mut state).unwrap();
    assert_eq!(orchestrator.mode(), BattleOrchestratorMode::Initialized);
    orchestrator.update(&mut state).unwrap();
    assert_eq!(orchestrator.mode(), BattleOrchestratorMode::LoadingMission);

    start_player_phase(&mut orchestrator, &mut state);
    assert_eq!(
        state.phase.current_affiliation,
        Some(SquaddieAffiliation::Player)
    );
}

#[test]
fn single_target_is_selected_automatically() {
    let recording = Rc::new(Recording::default());
    let mut orchestrator = BattleOrchestrator::builder()
        .config(OrchestratorConfig::instant())
        .dice(SequenceRoller::new([3, 4]))
        .listener(recording.clone(), MessageType::PlayerSelectsTargetCoordinate)
        .build();
    let mut state = battle(false);
    start_player_phase(&mut orchestrator, &mut state);

    orchestrator
        .key_event_happened(&mut state, KeyEvent::SelectAction(SLASH))
        .unwrap();
    tick_until(&mut orchestrator, &mut state, BattleOrchestratorMode::PlayerSquaddieTarget);
    orchestrator.update(&mut state).unwrap();

    assert_eq!(orchestrator.mode(), BattleOrchestratorMode::PlayerSquaddieTarget);
    assert_eq!(
        *recording.0.borrow(),
        vec![BattleMessage::PlayerSelectsTargetCoordinate { coordinate: BANDIT }]
    );
    assert!(state.decision_step.is_target_considered());
    assert!(!state.decision_step.is_target_confirmed());
    assert_eq!(state.forecast.len(), 1);
}

#[test]
fn effects_resolve_in_order_against_the_current_hit_points() {
    let mut orchestrator = orchestrator();
    let mut state = battle(false);
    start_player_phase(&mut orchestrator, &mut state);

    orchestrator
        .key_event_happened(&mut state, KeyEvent::SelectAction(TWIN_STRIKE))
        .unwrap();
    tick_until(&mut orchestrator, &mut state, BattleOrchestratorMode::PlayerSquaddieTarget);
    orchestrator.update(&mut state).unwrap();
    orchestrator.key_event_happened(&mut state, KeyEvent::Accept).unwrap();
    tick_until(&mut orchestrator, &mut state, BattleOrchestratorMode::SquaddieUsesActionOnSquaddie);

    assert_eq!(state.recorder.ready_to_animate_len(), 2);
    assert!(state.recorder.peek_at_animation_queue().unwrap().needs_resolution());
    assert_eq!(hit_points(&state, "bandit_0"), 5);

    orchestrator.update(&mut state).unwrap();
    assert_eq!(hit_points(&state, "bandit_0"), 4);
    assert_eq!(state.recorder.already_animated().len(), 1);
    assert!(state.recorder.peek_at_animation_queue().unwrap().needs_resolution());

    tick_until(&mut orchestrator, &mut state, BattleOrchestratorMode::SquaddieUsesActionOnSquaddie);
    orchestrator.update(&mut state).unwrap();
    assert_eq!(hit_points(&state, "bandit_0"), 2);

    let animated = state.recorder.already_animated();
    let first = &animated[0].squaddie_changes().unwrap()[0];
    let second = &animated[1].squaddie_changes().unwrap()[0];
    assert_eq!(first.attributes_before.hit_points, 5);
    assert_eq!(first.attributes_after.hit_points, 4);
    assert_eq!(second.attributes_before.hit_points, 4);
    assert_eq!(second.attributes_after.hit_points, 2);

    tick_until(&mut orchestrator, &mut state, BattleOrchestratorMode::PlayerSquaddieSelector);
    assert_eq!(state.decision_step.actor(), Some(&"knight_0".into()));
    assert!(!state.decision_step.is_action_set());
    let (_, knight) = state
        .repository
        .get_squaddie_by_battle_id(&"knight_0".into())
        .unwrap();
    assert_eq!(knight.turn.remaining_action_points(), 1);
}

#[test]
fn cancelling_an_automatic_target_returns_to_squaddie_selection() {
    let mut orchestrator = orchestrator();
    let mut state = battle(false);
    start_player_phase(&mut orchestrator, &mut state);

    orchestrator
        .key_event_happened(&mut state, KeyEvent::SelectAction(SLASH))
        .unwrap();
    tick_until(&mut orchestrator, &mut state, BattleOrchestratorMode::PlayerSquaddieTarget);
    orchestrator.update(&mut state).unwrap();
    orchestrator.key_event_happened(&mut state, KeyEvent::Cancel).unwrap();
    orchestrator.update(&mut state).unwrap();

    assert_eq!(orchestrator.mode(), BattleOrchestratorMode::PlayerSquaddieSelector);
    assert!(state.decision_step.is_actor_set());
    assert!(!state.decision_step.is_action_set());
    assert!(state.forecast.is_empty());
    assert!(state.recorder.is_animation_queue_empty());
}

#[test]
fn several_targets_fall_back_to_clicking_a_tile() {
    let mut orchestrator = orchestrator();
    let mut state = battle(true);
    start_player_phase(&mut orchestrator, &mut state);

    orchestrator
        .key_event_happened(&mut state, KeyEvent::SelectAction(SLASH))
        .unwrap();
    tick_until(&mut orchestrator, &mut state, BattleOrchestratorMode::PlayerSquaddieTarget);
    orchestrator.update(&mut state).unwrap();
    orchestrator.update(&mut state).unwrap();
    assert_eq!(orchestrator.mode(), BattleOrchestratorMode::PlayerSquaddieTarget);
    assert!(!state.decision_step.is_target_considered());

    orchestrator
        .mouse_event_happened(&mut state, MouseEvent::click_tile(SECOND_BANDIT))
        .unwrap();
    orchestrator.update(&mut state).unwrap();
    assert_eq!(orchestrator.mode(), BattleOrchestratorMode::PlayerActionConfirm);

    orchestrator.key_event_happened(&mut state, KeyEvent::Accept).unwrap();
    tick_until(&mut orchestrator, &mut state, BattleOrchestratorMode::PlayerSquaddieSelector);
    assert!(hit_points(&state, "bandit_1") < 5);
    assert_eq!(hit_points(&state, "bandit_0"), 5);
}

#[test]
fn self_heal_at_full_health_is_refused() {
    let mut orchestrator = orchestrator();
    let mut state = battle(false);
    start_player_phase(&mut orchestrator, &mut state);

    orchestrator
        .key_event_happened(&mut state, KeyEvent::SelectAction(FIRST_AID))
        .unwrap();
    orchestrator.update(&mut state).unwrap();

    assert_eq!(orchestrator.mode(), BattleOrchestratorMode::PlayerSquaddieSelector);
    assert!(!state.decision_step.is_action_set());
    let popup = state.popup.as_ref().unwrap();
    assert_eq!(popup.reason, PopupWindowReason::BuffHasNoEffect);
    assert_eq!(popup.text, "Sir Camil is already at full health");
}

#[test]
fn ending_the_turn_hands_over_to_the_enemy_phase() {
    let mut orchestrator = orchestrator();
    let mut state = battle(false);
    start_player_phase(&mut orchestrator, &mut state);

    orchestrator.key_event_happened(&mut state, KeyEvent::EndTurn).unwrap();
    tick_until(&mut orchestrator, &mut state, BattleOrchestratorMode::ComputerSquaddieSelector);

    assert_eq!(state.phase.current_affiliation, Some(SquaddieAffiliation::Enemy));
    assert!(state.decision_step.actor().is_none());
    let (_, knight) = state
        .repository
        .get_squaddie_by_battle_id(&"knight_0".into())
        .unwrap();
    assert_eq!(knight.turn.remaining_action_points(), 0);
}
