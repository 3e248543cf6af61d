use crate::action::ActionTemplate;
use crate::ids::BattleSquaddieId;
use crate::repository::{ObjectRepository, RepositoryError};

use super::{ActionValidity, ActionValidityCheck, ActionValidityReason};

/// Rejects actions costing more action points than the actor has left.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionPointCheck;

impl ActionValidityCheck for ActionPointCheck {
    fn can_perform(
        &self,
        repository: &ObjectRepository,
        actor_id: &BattleSquaddieId,
        action_template: &ActionTemplate,
    ) -> Result<ActionValidity, RepositoryError> {
        let (_, actor) = repository.get_squaddie_by_battle_id(actor_id)?;
        let cost = action_template.action_points();
        if actor.turn.can_afford(cost) {
            Ok(ActionValidity::valid())
        } else {
            Ok(ActionValidity::invalid(
                ActionValidityReason::NotEnoughActionPoints,
                format!("Need {cost} action points"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionEffectTemplate, DamageType};
    use crate::squaddie::{BattleSquaddie, SquaddieAffiliation, SquaddieTemplate};

    #[test]
    fn rejects_unaffordable_actions() {
        let mut repository = ObjectRepository::new();
        let template = SquaddieTemplate::new("knight", "Knight", SquaddieAffiliation::Player, 5);
        repository.add_squaddie_template(template.clone()).unwrap();
        repository.add_battle_squaddie(BattleSquaddie::new("knight_0", &template)).unwrap();
        let actor = BattleSquaddieId::from("knight_0");
        let heavy = ActionTemplate::new(
            "heavy",
            "Heavy Swing",
            vec![ActionEffectTemplate::attack(DamageType::Body, 3)],
        )
        .unwrap()
        .with_action_points(2);

        assert!(ActionPointCheck.can_perform(&repository, &actor, &heavy).unwrap().is_valid);

        repository.battle_squaddie_mut(&actor).unwrap().turn.spend_action_points(2).unwrap();
        let validity = ActionPointCheck.can_perform(&repository, &actor, &heavy).unwrap();
        assert_eq!(
            validity,
            ActionValidity::invalid(ActionValidityReason::NotEnoughActionPoints, "Need 2 action points")
        );
    }
}
