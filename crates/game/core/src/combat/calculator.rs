//! Action calculator: forecasts and resolves one effect against its targets.

use crate::action::{ActionEffectTemplate, ActionTemplate, TraitStatusStorage, VersusSquaddieResistance};
use crate::attribute::AttributeType;
use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::ids::{ActionTemplateId, BattleSquaddieId};
use crate::repository::{ObjectRepository, RepositoryError};
use crate::squaddie::{BattleSquaddie, SquaddieTemplate};

use super::damage::{damage_for_degree, explain_damage, healing_received};
use super::{
    BattleActionActorContext, BattleActionSquaddieChange, DegreeOfSuccess, DegreeOfSuccessChances,
    DiceRoller, RollResult, SquaddieSnapshot, degree_of_success, roll_modifiers_for,
};

/// Errors raised by the action calculator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CalculatorError {
    #[error("action template {action_template_id} has no effect #{effect_index}")]
    EffectNotFound {
        action_template_id: ActionTemplateId,
        effect_index: usize,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl GameError for CalculatorError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EffectNotFound { .. } => "CALCULATOR_EFFECT_NOT_FOUND",
            Self::Repository(err) => err.error_code(),
        }
    }
}

/// One effect of an action aimed at a set of squaddies.
#[derive(Clone, Copy, Debug)]
pub struct EffectRequest<'a> {
    pub actor_id: &'a BattleSquaddieId,
    pub action_template: &'a ActionTemplate,
    pub effect_index: usize,
    pub target_ids: &'a [BattleSquaddieId],
    /// Accumulated penalty from attacks the actor already made this turn.
    pub multiple_attack_penalty: i32,
}

/// Possible outcomes for one target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquaddieForecast {
    pub battle_squaddie_id: BattleSquaddieId,
    /// One entry per reachable degree, best first.
    pub outcomes: Vec<BattleActionSquaddieChange>,
}

impl SquaddieForecast {
    pub fn outcome(&self, degree: DegreeOfSuccess) -> Option<&BattleActionSquaddieChange> {
        self.outcomes
            .iter()
            .find(|change| change.degree_of_success == degree)
    }
}

/// Preview of an effect before anything is rolled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectForecast {
    pub actor_context: BattleActionActorContext,
    pub targets: Vec<SquaddieForecast>,
}

/// An effect after its roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectResolution {
    pub actor_context: BattleActionActorContext,
    pub changes: Vec<BattleActionSquaddieChange>,
}

/// Pure resolver over a read-only repository.
///
/// Nothing is mutated; call [`apply_results`] to commit a resolution.
pub struct ActionCalculator<'a> {
    repository: &'a ObjectRepository,
    config: &'a BattleConfig,
}

impl<'a> ActionCalculator<'a> {
    pub fn new(repository: &'a ObjectRepository, config: &'a BattleConfig) -> Self {
        Self { repository, config }
    }

    /// Lists every degree of success each target could suffer, with its chance.
    pub fn forecast_results(&self, request: &EffectRequest<'_>) -> Result<EffectForecast, CalculatorError> {
        let effect = Self::effect(request)?;
        let actor_context = self.actor_context(request, effect, RollResult::not_rolled())?;

        let mut targets = Vec::with_capacity(request.target_ids.len());
        for target_id in request.target_ids {
            let (template, target) = self.repository.get_squaddie_by_battle_id(target_id)?;
            let chances = self.chances(effect, &actor_context, template, target);
            let outcomes = [
                DegreeOfSuccess::CriticalSuccess,
                DegreeOfSuccess::Success,
                DegreeOfSuccess::Failure,
                DegreeOfSuccess::CriticalFailure,
            ]
            .into_iter()
            .filter(|degree| chances.count(*degree) > 0)
            .map(|degree| Self::change(effect, target, degree, chances.percent(degree)))
            .collect();
            targets.push(SquaddieForecast {
                battle_squaddie_id: target_id.clone(),
                outcomes,
            });
        }

        Ok(EffectForecast {
            actor_context,
            targets,
        })
    }

    /// Rolls once for the effect and resolves it against every target.
    pub fn calculate_results(
        &self,
        request: &EffectRequest<'_>,
        roller: &mut dyn DiceRoller,
    ) -> Result<EffectResolution, CalculatorError> {
        let effect = Self::effect(request)?;
        let roll = if Self::rolls(effect) {
            let penalty = if effect.suffers_multiple_attack_penalty() {
                request.multiple_attack_penalty
            } else {
                0
            };
            RollResult::roll(roller, roll_modifiers_for(penalty))
        } else {
            RollResult::not_rolled()
        };
        let actor_context = self.actor_context(request, effect, roll)?;

        let mut changes = Vec::with_capacity(request.target_ids.len());
        for target_id in request.target_ids {
            let (template, target) = self.repository.get_squaddie_by_battle_id(target_id)?;
            let chances = self.chances(effect, &actor_context, template, target);
            let degree = match self.defense(effect, template, target) {
                Some(defense) if actor_context.actor_roll.occurred => degree_of_success(
                    actor_context.actor_roll.natural_total(),
                    actor_context.actor_roll.modifier_total(),
                    defense,
                    Self::traits_against(effect, target),
                    self.config.critical_margin,
                ),
                _ => DegreeOfSuccess::Success,
            };
            changes.push(Self::change(effect, target, degree, chances.percent(degree)));
        }

        Ok(EffectResolution {
            actor_context,
            changes,
        })
    }

    fn effect<'r>(request: &EffectRequest<'r>) -> Result<&'r ActionEffectTemplate, CalculatorError> {
        request
            .action_template
            .effect(request.effect_index)
            .ok_or_else(|| CalculatorError::EffectNotFound {
                action_template_id: request.action_template.id().clone(),
                effect_index: request.effect_index,
            })
    }

    fn actor_context(
        &self,
        request: &EffectRequest<'_>,
        effect: &ActionEffectTemplate,
        actor_roll: RollResult,
    ) -> Result<BattleActionActorContext, CalculatorError> {
        let (_, actor) = self.repository.get_squaddie_by_battle_id(request.actor_id)?;
        let multiple_attack_penalty = if effect.suffers_multiple_attack_penalty() {
            request.multiple_attack_penalty
        } else {
            0
        };
        Ok(BattleActionActorContext {
            actor_roll,
            multiple_attack_penalty,
            actor_attribute_modifiers: actor.current_attribute_modifiers(),
        })
    }

    /// Whether the effect rolls against a defense at all.
    fn rolls(effect: &ActionEffectTemplate) -> bool {
        effect.is_attack()
            && !effect.traits.contains(TraitStatusStorage::ALWAYS_SUCCEEDS)
            && effect.versus_squaddie_resistance != VersusSquaddieResistance::Other
    }

    /// Defense the effect rolls against, `None` when it never rolls.
    fn defense(
        &self,
        effect: &ActionEffectTemplate,
        template: &SquaddieTemplate,
        target: &BattleSquaddie,
    ) -> Option<i32> {
        if !Self::rolls(effect) {
            return None;
        }
        let base = template.defenses.against(effect.versus_squaddie_resistance)?;
        Some(match effect.versus_squaddie_resistance {
            VersusSquaddieResistance::Armor => base + target.attribute_amount(AttributeType::Armor),
            _ => base,
        })
    }

    /// Effect traits as seen by one target. Elusive targets cannot be
    /// critically hit.
    fn traits_against(effect: &ActionEffectTemplate, target: &BattleSquaddie) -> TraitStatusStorage {
        let mut traits = effect.traits;
        if target.attribute_amount(AttributeType::Elusive) > 0 {
            traits |= TraitStatusStorage::CANNOT_CRITICALLY_SUCCEED;
        }
        traits
    }

    fn chances(
        &self,
        effect: &ActionEffectTemplate,
        actor_context: &BattleActionActorContext,
        template: &SquaddieTemplate,
        target: &BattleSquaddie,
    ) -> DegreeOfSuccessChances {
        match self.defense(effect, template, target) {
            Some(defense) => DegreeOfSuccessChances::for_roll(
                actor_context.multiple_attack_penalty,
                defense,
                Self::traits_against(effect, target),
                self.config.critical_margin,
            ),
            None => DegreeOfSuccessChances::certain_success(),
        }
    }

    fn change(
        effect: &ActionEffectTemplate,
        target: &BattleSquaddie,
        degree: DegreeOfSuccess,
        chance: u32,
    ) -> BattleActionSquaddieChange {
        let raw = damage_for_degree(effect.total_damage(), degree);
        let damage = explain_damage(raw, target.absorbable(raw), target.hit_points());
        let healing = healing_received(effect.total_healing(), degree, target.damage_taken());
        let granted = if degree.is_success() {
            effect.attribute_modifiers.clone()
        } else {
            Vec::new()
        };

        let mut change = BattleActionSquaddieChange {
            battle_squaddie_id: target.battle_squaddie_id.clone(),
            degree_of_success: degree,
            chance_of_degree_of_success: chance,
            damage,
            healing_received: healing,
            attribute_modifiers_granted: granted,
            attributes_before: SquaddieSnapshot::of(target),
            attributes_after: SquaddieSnapshot::default(),
        };
        let mut after = target.clone();
        change.apply_to(&mut after);
        change.attributes_after = SquaddieSnapshot::of(&after);
        change
    }
}

/// Commits resolved changes to the repository.
pub fn apply_results(
    repository: &mut ObjectRepository,
    changes: &[BattleActionSquaddieChange],
) -> Result<(), RepositoryError> {
    for change in changes {
        let squaddie = repository.battle_squaddie_mut(&change.battle_squaddie_id)?;
        change.apply_to(squaddie);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{DamageType, HealingType};
    use crate::attribute::{AttributeModifier, AttributeSource};
    use crate::combat::SequenceRoller;
    use crate::squaddie::SquaddieAffiliation;

    fn repository() -> ObjectRepository {
        let mut repository = ObjectRepository::new();
        let knight = SquaddieTemplate::new("knight", "Knight", SquaddieAffiliation::Player, 5);
        let bandit = SquaddieTemplate::new("bandit", "Bandit", SquaddieAffiliation::Enemy, 5).with_armor(7);
        repository.add_squaddie_template(knight.clone()).unwrap();
        repository.add_squaddie_template(bandit.clone()).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("knight_0", &knight)).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("bandit_0", &bandit)).unwrap();
        repository
    }

    fn sword() -> ActionTemplate {
        ActionTemplate::new("sword", "Sword", vec![ActionEffectTemplate::attack(DamageType::Body, 2)]).unwrap()
    }

    fn request<'a>(
        template: &'a ActionTemplate,
        actor: &'a BattleSquaddieId,
        targets: &'a [BattleSquaddieId],
        penalty: i32,
    ) -> EffectRequest<'a> {
        EffectRequest {
            actor_id: actor,
            action_template: template,
            effect_index: 0,
            target_ids: targets,
            multiple_attack_penalty: penalty,
        }
    }

    #[test]
    fn hit_deals_damage_and_miss_does_not() {
        let repository = repository();
        let config = BattleConfig::default();
        let calculator = ActionCalculator::new(&repository, &config);
        let template = sword();
        let actor = BattleSquaddieId::from("knight_0");
        let targets = [BattleSquaddieId::from("bandit_0")];

        let hit = calculator
            .calculate_results(&request(&template, &actor, &targets, 0), &mut SequenceRoller::new([3, 4]))
            .unwrap();
        assert_eq!(hit.changes[0].degree_of_success, DegreeOfSuccess::Success);
        assert_eq!(hit.changes[0].damage.net, 2);
        assert_eq!(hit.changes[0].attributes_after.hit_points, 3);

        let miss = calculator
            .calculate_results(&request(&template, &actor, &targets, -1), &mut SequenceRoller::new([3, 4]))
            .unwrap();
        assert_eq!(miss.changes[0].degree_of_success, DegreeOfSuccess::Failure);
        assert_eq!(miss.changes[0].damage.net, 0);
        assert_eq!(miss.actor_context.actor_roll.total(), 6);
    }

    #[test]
    fn critical_hits_double_damage_up_to_remaining_hit_points() {
        let repository = repository();
        let config = BattleConfig::default();
        let calculator = ActionCalculator::new(&repository, &config);
        let template = sword();
        let actor = BattleSquaddieId::from("knight_0");
        let targets = [BattleSquaddieId::from("bandit_0")];

        let crit = calculator
            .calculate_results(&request(&template, &actor, &targets, 0), &mut SequenceRoller::new([6, 6]))
            .unwrap();
        let change = &crit.changes[0];
        assert_eq!(change.degree_of_success, DegreeOfSuccess::CriticalSuccess);
        assert_eq!(change.damage.raw, 4);
        assert_eq!(change.damage.net, 4);
    }

    #[test]
    fn elusive_targets_cannot_be_critically_hit() {
        let mut repository = repository();
        let config = BattleConfig::default();
        let bandit_id = BattleSquaddieId::from("bandit_0");
        repository
            .battle_squaddie_mut(&bandit_id)
            .unwrap()
            .add_attribute_modifier(AttributeModifier::new(
                AttributeType::Elusive,
                AttributeSource::Status,
                1,
            ));
        let calculator = ActionCalculator::new(&repository, &config);
        let template = sword();
        let actor = BattleSquaddieId::from("knight_0");
        let targets = [bandit_id];
        let request = request(&template, &actor, &targets, 0);

        let resolved = calculator
            .calculate_results(&request, &mut SequenceRoller::new([6, 6]))
            .unwrap();
        assert_eq!(resolved.changes[0].degree_of_success, DegreeOfSuccess::Success);
        assert_eq!(resolved.changes[0].damage.raw, 2);

        let forecast = calculator.forecast_results(&request).unwrap();
        assert!(forecast.targets[0].outcome(DegreeOfSuccess::CriticalSuccess).is_none());
        let success = forecast.targets[0].outcome(DegreeOfSuccess::Success).unwrap();
        // 7 or better on 2d6, natural 12 included
        assert_eq!(success.chance_of_degree_of_success, 21 * 100 / 36);
    }

    #[test]
    fn forecast_matches_resolution_for_the_rolled_degree() {
        let repository = repository();
        let config = BattleConfig::default();
        let calculator = ActionCalculator::new(&repository, &config);
        let template = sword();
        let actor = BattleSquaddieId::from("knight_0");
        let targets = [BattleSquaddieId::from("bandit_0")];
        let request = request(&template, &actor, &targets, 0);

        let forecast = calculator.forecast_results(&request).unwrap();
        let resolved = calculator
            .calculate_results(&request, &mut SequenceRoller::new([4, 4]))
            .unwrap();
        let change = &resolved.changes[0];
        assert_eq!(forecast.targets[0].outcome(change.degree_of_success), Some(change));
        assert!(!forecast.actor_context.actor_roll.occurred);
        assert_eq!(forecast.targets[0].outcomes.len(), 4);
    }

    #[test]
    fn self_buff_always_succeeds_and_grants_modifiers() {
        let mut repository = repository();
        let config = BattleConfig::default();
        let guard = ActionTemplate::new(
            "guard",
            "Guard",
            vec![ActionEffectTemplate::new().with_attribute_modifier(
                AttributeModifier::new(AttributeType::Armor, AttributeSource::Circumstance, 1)
                    .with_duration(1),
            )],
        )
        .unwrap();
        let actor = BattleSquaddieId::from("knight_0");
        let targets = [actor.clone()];

        let resolution = ActionCalculator::new(&repository, &config)
            .calculate_results(&request(&guard, &actor, &targets, -2), &mut SequenceRoller::new([1]))
            .unwrap();
        assert!(!resolution.actor_context.actor_roll.occurred);
        assert_eq!(resolution.changes[0].attribute_modifiers_granted.len(), 1);

        apply_results(&mut repository, &resolution.changes).unwrap();
        let (_, knight) = repository.get_squaddie_by_battle_id(&actor).unwrap();
        assert_eq!(knight.attribute_amount(AttributeType::Armor), 1);
    }

    #[test]
    fn absorb_and_healing_are_explained() {
        let mut repository = repository();
        let config = BattleConfig::default();
        let bandit_id = BattleSquaddieId::from("bandit_0");
        {
            let bandit = repository.battle_squaddie_mut(&bandit_id).unwrap();
            bandit.add_attribute_modifier(AttributeModifier::new(
                AttributeType::Absorb,
                AttributeSource::Item,
                1,
            ));
        }
        let template = sword();
        let actor = BattleSquaddieId::from("knight_0");
        let targets = [bandit_id.clone()];
        let resolution = ActionCalculator::new(&repository, &config)
            .calculate_results(&request(&template, &actor, &targets, 0), &mut SequenceRoller::new([5, 5]))
            .unwrap();
        assert_eq!(resolution.changes[0].damage.absorbed, 1);
        assert_eq!(resolution.changes[0].damage.net, 1);
        apply_results(&mut repository, &resolution.changes).unwrap();

        let mend = ActionTemplate::new(
            "mend",
            "Mend",
            vec![
                ActionEffectTemplate::new()
                    .with_healing(HealingType::LostHitPoints, 3)
                    .targeting(crate::action::TargetAffiliations::FRIENDLY),
            ],
        )
        .unwrap();
        let heal = ActionCalculator::new(&repository, &config)
            .calculate_results(&request(&mend, &bandit_id, &targets, 0), &mut SequenceRoller::new([1]))
            .unwrap();
        assert_eq!(heal.changes[0].healing_received, 1);
        assert_eq!(heal.changes[0].attributes_after.hit_points, 5);
    }
}
