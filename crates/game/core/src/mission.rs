//! Mission objectives and cutscene triggers.

use crate::ids::CutsceneId;
use crate::repository::ObjectRepository;
use crate::squaddie::SquaddieAffiliation;

/// Whether the battle is still being fought.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleCompletionStatus {
    #[default]
    InProgress,
    Victory,
    Defeat,
}

impl BattleCompletionStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// A condition that ends the mission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissionObjective {
    /// Victory once no enemy squaddie is alive.
    DefeatAllEnemies,
    /// Defeat once no player squaddie is alive.
    DefeatAllPlayers,
}

impl MissionObjective {
    /// The status this objective forces, if its condition holds.
    pub fn evaluate(&self, repository: &ObjectRepository) -> Option<BattleCompletionStatus> {
        let (team, status) = match self {
            Self::DefeatAllEnemies => (SquaddieAffiliation::Enemy, BattleCompletionStatus::Victory),
            Self::DefeatAllPlayers => (SquaddieAffiliation::Player, BattleCompletionStatus::Defeat),
        };
        let wiped_out = repository.team(team).iter().all(|id| {
            repository
                .get_squaddie_by_battle_id(id)
                .map_or(true, |(_, squaddie)| squaddie.is_dead())
        });
        wiped_out.then_some(status)
    }
}

/// Evaluates objectives in order; defeat wins over victory.
pub fn evaluate_objectives(
    objectives: &[MissionObjective],
    repository: &ObjectRepository,
) -> BattleCompletionStatus {
    let outcomes: Vec<_> = objectives
        .iter()
        .filter_map(|objective| objective.evaluate(repository))
        .collect();
    if outcomes.contains(&BattleCompletionStatus::Defeat) {
        BattleCompletionStatus::Defeat
    } else if outcomes.contains(&BattleCompletionStatus::Victory) {
        BattleCompletionStatus::Victory
    } else {
        BattleCompletionStatus::InProgress
    }
}

/// One line of cutscene dialogue.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cutscene {
    pub id: CutsceneId,
    pub lines: Vec<DialogueLine>,
}

/// When a cutscene interrupts the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CutsceneTriggerCondition {
    Victory,
    Defeat,
    /// Before the player phase of the given turn (1-based).
    StartOfTurn(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CutsceneTrigger {
    pub cutscene_id: CutsceneId,
    pub condition: CutsceneTriggerCondition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub already_reacted: bool,
}

impl CutsceneTrigger {
    pub fn new(cutscene_id: impl Into<CutsceneId>, condition: CutsceneTriggerCondition) -> Self {
        Self {
            cutscene_id: cutscene_id.into(),
            condition,
            already_reacted: false,
        }
    }

    /// Whether this trigger fires now. Triggers fire at most once.
    pub fn should_fire(&self, completion: BattleCompletionStatus, turn: Option<u32>) -> bool {
        if self.already_reacted {
            return false;
        }
        match self.condition {
            CutsceneTriggerCondition::Victory => completion == BattleCompletionStatus::Victory,
            CutsceneTriggerCondition::Defeat => completion == BattleCompletionStatus::Defeat,
            CutsceneTriggerCondition::StartOfTurn(n) => turn == Some(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::squaddie::{BattleSquaddie, SquaddieTemplate};

    fn repository() -> ObjectRepository {
        let mut repository = ObjectRepository::new();
        let knight = SquaddieTemplate::new("knight", "Knight", SquaddieAffiliation::Player, 5);
        let bandit = SquaddieTemplate::new("bandit", "Bandit", SquaddieAffiliation::Enemy, 2);
        repository.add_squaddie_template(knight.clone()).unwrap();
        repository.add_squaddie_template(bandit.clone()).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("knight_0", &knight)).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("bandit_0", &bandit)).unwrap();
        repository
    }

    #[test]
    fn victory_once_every_enemy_falls() {
        let mut repository = repository();
        let objectives = [MissionObjective::DefeatAllEnemies, MissionObjective::DefeatAllPlayers];
        assert_eq!(evaluate_objectives(&objectives, &repository), BattleCompletionStatus::InProgress);

        repository.battle_squaddie_mut(&"bandit_0".into()).unwrap().take_damage(2);
        assert_eq!(evaluate_objectives(&objectives, &repository), BattleCompletionStatus::Victory);
    }

    #[test]
    fn missions_without_enemies_are_won_immediately() {
        let mut repository = ObjectRepository::new();
        let knight = SquaddieTemplate::new("knight", "Knight", SquaddieAffiliation::Player, 5);
        repository.add_squaddie_template(knight.clone()).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("knight_0", &knight)).unwrap();

        assert_eq!(
            evaluate_objectives(&[MissionObjective::DefeatAllEnemies], &repository),
            BattleCompletionStatus::Victory
        );
        assert_eq!(
            evaluate_objectives(&[MissionObjective::DefeatAllPlayers], &repository),
            BattleCompletionStatus::InProgress
        );
    }

    #[test]
    fn triggers_fire_once() {
        let mut trigger = CutsceneTrigger::new("intro", CutsceneTriggerCondition::StartOfTurn(1));
        assert!(trigger.should_fire(BattleCompletionStatus::InProgress, Some(1)));
        assert!(!trigger.should_fire(BattleCompletionStatus::InProgress, Some(2)));
        trigger.already_reacted = true;
        assert!(!trigger.should_fire(BattleCompletionStatus::InProgress, Some(1)));

        let outro = CutsceneTrigger::new("outro", CutsceneTriggerCondition::Victory);
        assert!(outro.should_fire(BattleCompletionStatus::Victory, None));
    }
}
