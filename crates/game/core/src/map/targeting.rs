use std::collections::BTreeSet;

use crate::action::{ActionTemplate, TargetingShape};
use crate::error::{ErrorSeverity, GameError};
use crate::ids::BattleSquaddieId;
use crate::repository::{ObjectRepository, RepositoryError};
use crate::squaddie::{BattleSquaddie, SquaddieTemplate};

use super::{HexCoordinate, MissionMap};

/// Errors raised while enumerating targets.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetingError {
    #[error("acting squaddie {0} is not on the map")]
    ActorNotOnMap(BattleSquaddieId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl GameError for TargetingError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotOnMap(_) => "TARGETING_ACTOR_NOT_ON_MAP",
            Self::Repository(err) => err.error_code(),
        }
    }
}

/// Everything a targeting service needs to know about the acting squaddie.
#[derive(Clone, Copy, Debug)]
pub struct TargetingRequest<'a> {
    pub map: &'a MissionMap,
    pub action_template: &'a ActionTemplate,
    pub acting_squaddie_template: &'a SquaddieTemplate,
    pub acting_battle_squaddie: &'a BattleSquaddie,
    pub repository: &'a ObjectRepository,
}

/// Squaddies an action may be aimed at and the tiles it reaches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetingResults {
    pub battle_squaddie_ids_in_range: Vec<BattleSquaddieId>,
    pub coordinates_in_range: BTreeSet<HexCoordinate>,
}

impl TargetingResults {
    pub fn has_targets(&self) -> bool {
        !self.battle_squaddie_ids_in_range.is_empty()
    }
}

/// Finds legal targets for an action.
pub trait TargetingService {
    fn find_valid_targets(
        &self,
        request: &TargetingRequest<'_>,
    ) -> Result<TargetingResults, TargetingError>;
}

/// Range-band targeting without line of sight.
///
/// A tile is in range when its hex distance from the actor lies within the
/// template's range (and, for [`TargetingShape::Line`], on one of the six hex
/// axes). A squaddie standing there is a valid target when it is alive and
/// its relation to the actor is allowed by any of the template's effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeTargeting;

impl RangeTargeting {
    fn on_axis(origin: &HexCoordinate, coordinate: &HexCoordinate) -> bool {
        let dq = coordinate.q - origin.q;
        let dr = coordinate.r - origin.r;
        dq == 0 || dr == 0 || dq + dr == 0
    }
}

impl TargetingService for RangeTargeting {
    fn find_valid_targets(
        &self,
        request: &TargetingRequest<'_>,
    ) -> Result<TargetingResults, TargetingError> {
        let actor_id = &request.acting_battle_squaddie.battle_squaddie_id;
        let origin = request
            .map
            .location_of(actor_id)
            .ok_or_else(|| TargetingError::ActorNotOnMap(actor_id.clone()))?;

        let range = request.action_template.range();
        let shape = request.action_template.shape();
        let coordinates_in_range: BTreeSet<HexCoordinate> = request
            .map
            .coordinates()
            .filter(|coordinate| range.contains(origin.distance_to(coordinate)))
            .filter(|coordinate| shape != TargetingShape::Line || Self::on_axis(&origin, coordinate))
            .collect();

        let allowed = request.action_template.target_affiliations();
        let actor_affiliation = request.acting_squaddie_template.affiliation;
        let mut battle_squaddie_ids_in_range = Vec::new();
        for coordinate in &coordinates_in_range {
            let Some(candidate_id) = request.map.squaddie_at(coordinate) else {
                continue;
            };
            let (candidate_template, candidate) =
                request.repository.get_squaddie_by_battle_id(candidate_id)?;
            if candidate.is_dead() {
                continue;
            }
            let relation =
                actor_affiliation.relation_to(candidate_template.affiliation, candidate_id == actor_id);
            if allowed.allows(relation) {
                battle_squaddie_ids_in_range.push(candidate_id.clone());
            }
        }

        Ok(TargetingResults {
            battle_squaddie_ids_in_range,
            coordinates_in_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionEffectTemplate, ActionRange, DamageType, HealingType};
    use crate::squaddie::SquaddieAffiliation;

    struct Fixture {
        repository: ObjectRepository,
        map: MissionMap,
    }

    fn fixture() -> Fixture {
        let mut repository = ObjectRepository::new();
        let player = SquaddieTemplate::new("knight", "Knight", SquaddieAffiliation::Player, 5);
        let enemy = SquaddieTemplate::new("bandit", "Bandit", SquaddieAffiliation::Enemy, 3);
        repository.add_squaddie_template(player.clone()).unwrap();
        repository.add_squaddie_template(enemy.clone()).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("knight_0", &player)).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("bandit_0", &enemy)).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("bandit_1", &enemy)).unwrap();

        let mut map = MissionMap::new(6, 6);
        map.add_squaddie("knight_0".into(), HexCoordinate::new(0, 0)).unwrap();
        map.add_squaddie("bandit_0".into(), HexCoordinate::new(1, 0)).unwrap();
        map.add_squaddie("bandit_1".into(), HexCoordinate::new(3, 0)).unwrap();
        Fixture { repository, map }
    }

    fn find(fixture: &Fixture, template: &ActionTemplate) -> TargetingResults {
        let (actor_template, actor) = fixture
            .repository
            .get_squaddie_by_battle_id(&"knight_0".into())
            .unwrap();
        RangeTargeting
            .find_valid_targets(&TargetingRequest {
                map: &fixture.map,
                action_template: template,
                acting_squaddie_template: actor_template,
                acting_battle_squaddie: actor,
                repository: &fixture.repository,
            })
            .unwrap()
    }

    #[test]
    fn melee_attack_only_reaches_adjacent_foes() {
        let fixture = fixture();
        let sword = ActionTemplate::new(
            "sword",
            "Sword",
            vec![ActionEffectTemplate::attack(DamageType::Body, 2)],
        )
        .unwrap();

        let results = find(&fixture, &sword);
        assert_eq!(results.battle_squaddie_ids_in_range, vec![BattleSquaddieId::from("bandit_0")]);
        assert!(results.coordinates_in_range.contains(&HexCoordinate::new(0, 1)));
        assert!(!results.coordinates_in_range.contains(&HexCoordinate::new(0, 0)));
    }

    #[test]
    fn ranged_attack_sees_every_foe_in_the_band() {
        let fixture = fixture();
        let bow = ActionTemplate::new(
            "bow",
            "Bow",
            vec![ActionEffectTemplate::attack(DamageType::Body, 1)],
        )
        .unwrap()
        .with_range(ActionRange::new(1, 3))
        .unwrap();

        assert_eq!(find(&fixture, &bow).battle_squaddie_ids_in_range.len(), 2);
    }

    #[test]
    fn self_heal_targets_only_the_actor() {
        let fixture = fixture();
        let bandage = ActionTemplate::new(
            "bandage",
            "Bandage",
            vec![ActionEffectTemplate::new().with_healing(HealingType::LostHitPoints, 2)],
        )
        .unwrap()
        .with_range(ActionRange::SELF)
        .unwrap();

        let results = find(&fixture, &bandage);
        assert_eq!(results.battle_squaddie_ids_in_range, vec![BattleSquaddieId::from("knight_0")]);
        assert_eq!(results.coordinates_in_range.len(), 1);
    }
}
