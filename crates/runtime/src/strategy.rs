//! Decision making for computer-controlled teams.

use battle_core::{
    ActionTemplateId, AttributeType, BattleSquaddieId, HexCoordinate, TargetRelation,
    TargetingService,
};

use crate::error::Result;
use crate::state::BattleState;

/// What a computer-controlled squaddie does with its next decision step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComputerDecision {
    UseAction {
        action_template_id: ActionTemplateId,
        target_coordinate: HexCoordinate,
    },
    Move {
        destination: HexCoordinate,
    },
    EndTurn,
}

/// Picks actions for every squaddie of a computer-controlled team.
pub trait TeamStrategy {
    fn name(&self) -> &'static str;

    fn decide(
        &self,
        state: &BattleState,
        actor: &BattleSquaddieId,
        targeting: &dyn TargetingService,
    ) -> Result<ComputerDecision>;
}

/// Attacks the weakest foe in range, otherwise closes in on the nearest foe.
///
/// Attacks are tried in the order the squaddie knows them. Ties between
/// foes break on the lower battle id; ties between tiles on the lower
/// coordinate.
#[derive(Clone, Copy, Debug, Default)]
pub struct TargetFoeInRange;

impl TargetFoeInRange {
    fn attack(
        &self,
        state: &BattleState,
        actor: &BattleSquaddieId,
        targeting: &dyn TargetingService,
    ) -> Result<Option<ComputerDecision>> {
        let (template, squaddie) = state.repository.get_squaddie_by_battle_id(actor)?;
        for action_template_id in &template.action_template_ids {
            let action_template = state.repository.get_action_template_by_id(action_template_id)?;
            if !action_template.is_attack() || !squaddie.turn.can_afford(action_template.action_points()) {
                continue;
            }
            let results = state.find_valid_targets(targeting, actor, action_template_id)?;
            let weakest = results
                .battle_squaddie_ids_in_range
                .iter()
                .filter_map(|target_id| {
                    let (target_template, target) = state.repository.get_squaddie_by_battle_id(target_id).ok()?;
                    let relation = template
                        .affiliation
                        .relation_to(target_template.affiliation, target_id == actor);
                    if target.is_dead() || relation != TargetRelation::Foe {
                        return None;
                    }
                    let coordinate = state.map.location_of(target_id)?;
                    Some((target.hit_points(), target_id, coordinate))
                })
                .min();
            if let Some((_, _, target_coordinate)) = weakest {
                return Ok(Some(ComputerDecision::UseAction {
                    action_template_id: action_template_id.clone(),
                    target_coordinate,
                }));
            }
        }
        Ok(None)
    }

    fn approach(&self, state: &BattleState, actor: &BattleSquaddieId) -> Result<Option<ComputerDecision>> {
        let (template, squaddie) = state.repository.get_squaddie_by_battle_id(actor)?;
        let Some(start) = state.map.location_of(actor) else {
            return Ok(None);
        };
        if !squaddie.turn.can_afford(1) {
            return Ok(None);
        }

        let foe_locations: Vec<HexCoordinate> = state
            .map
            .squaddies()
            .filter(|(other_id, _)| {
                state
                    .repository
                    .get_squaddie_by_battle_id(other_id)
                    .is_ok_and(|(other_template, other)| {
                        other.is_alive()
                            && template.affiliation.relation_to(other_template.affiliation, *other_id == actor)
                                == TargetRelation::Foe
                    })
            })
            .map(|(_, coordinate)| *coordinate)
            .collect();
        let distance_to_foes = |from: &HexCoordinate| {
            foe_locations
                .iter()
                .map(|foe| from.distance_to(foe))
                .min()
        };
        let Some(current) = distance_to_foes(&start) else {
            return Ok(None);
        };

        let movement = template.movement_per_action as i32 + squaddie.attribute_amount(AttributeType::Movement);
        let movement = movement.max(1) as u32;
        let best = state
            .map
            .coordinates()
            .filter(|tile| {
                *tile != start
                    && start.distance_to(tile) <= movement
                    && state.map.is_passable(tile)
                    && state.map.squaddie_at(tile).is_none()
            })
            .filter_map(|tile| distance_to_foes(&tile).map(|distance| (distance, tile)))
            .min();

        Ok(best
            .filter(|(distance, _)| *distance < current)
            .map(|(_, destination)| ComputerDecision::Move { destination }))
    }
}

impl TeamStrategy for TargetFoeInRange {
    fn name(&self) -> &'static str {
        "target_foe_in_range"
    }

    fn decide(
        &self,
        state: &BattleState,
        actor: &BattleSquaddieId,
        targeting: &dyn TargetingService,
    ) -> Result<ComputerDecision> {
        if let Some(decision) = self.attack(state, actor, targeting)? {
            return Ok(decision);
        }
        Ok(self.approach(state, actor)?.unwrap_or(ComputerDecision::EndTurn))
    }
}

/// Ends the turn of every squaddie it controls.
#[derive(Clone, Copy, Debug, Default)]
pub struct EndTurnStrategy;

impl TeamStrategy for EndTurnStrategy {
    fn name(&self) -> &'static str {
        "end_turn"
    }

    fn decide(
        &self,
        _state: &BattleState,
        _actor: &BattleSquaddieId,
        _targeting: &dyn TargetingService,
    ) -> Result<ComputerDecision> {
        Ok(ComputerDecision::EndTurn)
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{
        ActionEffectTemplate, ActionRange, ActionTemplate, BattleConfig, BattleSquaddie, DamageType,
        MissionMap, ObjectRepository, RangeTargeting, SquaddieAffiliation, SquaddieTemplate,
    };

    use super::*;

    fn state(bandits: &[(&str, u32, HexCoordinate)]) -> BattleState {
        let mut repository = ObjectRepository::new();
        let slash = ActionTemplate::new(
            "slash",
            "Slash",
            vec![ActionEffectTemplate::attack(DamageType::Body, 2)],
        )
        .unwrap()
        .with_range(ActionRange::MELEE)
        .unwrap();
        repository.add_action_template(slash).unwrap();

        let knight = SquaddieTemplate::new("knight", "Knight", SquaddieAffiliation::Player, 5).with_action("slash");
        let bandit = SquaddieTemplate::new("bandit", "Bandit", SquaddieAffiliation::Enemy, 5);
        repository.add_squaddie_template(knight.clone()).unwrap();
        repository.add_squaddie_template(bandit.clone()).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("knight_0", &knight)).unwrap();

        let mut map = MissionMap::new(8, 8);
        map.add_squaddie("knight_0".into(), HexCoordinate::new(1, 1)).unwrap();
        for (id, hit_points, coordinate) in bandits {
            let mut squaddie = BattleSquaddie::new(*id, &bandit);
            squaddie.take_damage(5 - hit_points);
            repository.add_battle_squaddie(squaddie).unwrap();
            map.add_squaddie((*id).into(), *coordinate).unwrap();
        }

        for squaddie in repository.battle_squaddies_mut() {
            squaddie.begin_new_turn(BattleConfig::DEFAULT_ACTION_POINTS);
        }
        BattleState::new(BattleConfig::default(), repository, map)
    }

    fn knight() -> BattleSquaddieId {
        BattleSquaddieId::from("knight_0")
    }

    #[test]
    fn attacks_the_weakest_foe_in_range() {
        let state = state(&[
            ("bandit_0", 5, HexCoordinate::new(1, 2)),
            ("bandit_1", 2, HexCoordinate::new(2, 1)),
        ]);

        let decision = TargetFoeInRange.decide(&state, &knight(), &RangeTargeting).unwrap();

        assert_eq!(
            decision,
            ComputerDecision::UseAction {
                action_template_id: ActionTemplateId::from("slash"),
                target_coordinate: HexCoordinate::new(2, 1),
            }
        );
    }

    #[test]
    fn closes_in_when_nothing_is_in_range() {
        let state = state(&[("bandit_0", 5, HexCoordinate::new(5, 1))]);

        let decision = TargetFoeInRange.decide(&state, &knight(), &RangeTargeting).unwrap();

        assert_eq!(
            decision,
            ComputerDecision::Move {
                destination: HexCoordinate::new(3, 1)
            }
        );
    }

    #[test]
    fn ends_the_turn_without_action_points() {
        let mut state = state(&[("bandit_0", 5, HexCoordinate::new(5, 1))]);
        state.repository.battle_squaddie_mut(&knight()).unwrap().turn.end_turn();

        let decision = TargetFoeInRange.decide(&state, &knight(), &RangeTargeting).unwrap();

        assert_eq!(decision, ComputerDecision::EndTurn);
        assert_eq!(
            EndTurnStrategy.decide(&state, &knight(), &RangeTargeting).unwrap(),
            ComputerDecision::EndTurn
        );
    }
}
