use battle_content::ContentFactory;
use battle_core::{BattleActionAction, BattleCompletionStatus, CutsceneId};
use battle_runtime::{BattleOrchestrator, BattleOrchestratorMode, BattleState, OrchestratorConfig};

const MAX_TICKS: usize = 20_000;

fn bundled_battle() -> BattleState {
    let mission = ContentFactory::bundled()
        .load_mission("bandit_ambush")
        .expect("bundled mission loads");
    BattleState::from(mission)
}

fn autoplay(seed: u64) -> BattleOrchestrator {
    BattleOrchestrator::builder()
        .config(OrchestratorConfig {
            autoplay_player: true,
            dice_seed: Some(seed),
            ..OrchestratorConfig::instant()
        })
        .build()
}

#[test]
fn introduction_plays_before_the_first_player_phase() {
    let mut orchestrator = autoplay(7);
    let mut state = bundled_battle();

    let mut ticks = 0;
    while orchestrator.mode() != BattleOrchestratorMode::CutscenePlayer {
        orchestrator.update(&mut state).unwrap();
        ticks += 1;
        assert!(ticks < 16, "introduction never started");
    }
    assert_eq!(state.mission.pending_cutscene, Some(CutsceneId::from("introduction")));
    assert_eq!(state.phase.turn_count, 1);
    assert_eq!(
        state.mission.resume_mode,
        Some(BattleOrchestratorMode::ComputerSquaddieSelector)
    );

    while orchestrator.mode() == BattleOrchestratorMode::CutscenePlayer {
        orchestrator.update(&mut state).unwrap();
    }
    assert_eq!(orchestrator.mode(), BattleOrchestratorMode::ComputerSquaddieSelector);
    assert!(state.mission.pending_cutscene.is_none());
}

#[test]
fn autoplayed_battle_runs_without_invariant_errors() {
    let mut orchestrator = autoplay(11);
    let mut state = bundled_battle();

    for _ in 0..MAX_TICKS {
        if state.has_battle_ended() {
            break;
        }
        orchestrator.update(&mut state).unwrap();
    }

    assert!(state.phase.turn_count >= 1);
    let animated = state.recorder.already_animated();
    assert!(!animated.is_empty());
    assert!(
        animated
            .iter()
            .filter(|action| matches!(action.action, BattleActionAction::ActionTemplate { .. }))
            .all(|action| action.squaddie_changes().is_some())
    );
    if state.has_battle_ended() {
        let closing = match state.mission.completion {
            BattleCompletionStatus::Victory => "victory",
            BattleCompletionStatus::Defeat => "defeat",
            BattleCompletionStatus::InProgress => panic!("ended battle still in progress"),
        };
        let trigger = state
            .mission
            .cutscene_triggers
            .iter()
            .find(|trigger| trigger.cutscene_id == CutsceneId::from(closing))
            .expect("closing trigger");
        assert!(trigger.already_reacted);
    }
}
