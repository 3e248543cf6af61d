//! Object repository: id-keyed storage for templates and battle squaddies.

use std::collections::BTreeMap;

use crate::action::ActionTemplate;
use crate::error::{ErrorSeverity, GameError};
use crate::ids::{ActionTemplateId, BattleSquaddieId, SquaddieTemplateId};
use crate::squaddie::{BattleSquaddie, SquaddieAffiliation, SquaddieTemplate};

/// Errors raised by repository lookups and inserts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("battle squaddie {0} not found")]
    BattleSquaddieNotFound(BattleSquaddieId),

    #[error("squaddie template {0} not found")]
    SquaddieTemplateNotFound(SquaddieTemplateId),

    #[error("action template {0} not found")]
    ActionTemplateNotFound(ActionTemplateId),

    #[error("battle squaddie {0} already exists")]
    DuplicateBattleSquaddie(BattleSquaddieId),

    #[error("squaddie template {0} already exists")]
    DuplicateSquaddieTemplate(SquaddieTemplateId),

    #[error("action template {0} already exists")]
    DuplicateActionTemplate(ActionTemplateId),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::BattleSquaddieNotFound(_)
            | Self::SquaddieTemplateNotFound(_)
            | Self::ActionTemplateNotFound(_) => ErrorSeverity::Internal,
            Self::DuplicateBattleSquaddie(_)
            | Self::DuplicateSquaddieTemplate(_)
            | Self::DuplicateActionTemplate(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleSquaddieNotFound(_) => "REPOSITORY_BATTLE_SQUADDIE_NOT_FOUND",
            Self::SquaddieTemplateNotFound(_) => "REPOSITORY_SQUADDIE_TEMPLATE_NOT_FOUND",
            Self::ActionTemplateNotFound(_) => "REPOSITORY_ACTION_TEMPLATE_NOT_FOUND",
            Self::DuplicateBattleSquaddie(_) => "REPOSITORY_DUPLICATE_BATTLE_SQUADDIE",
            Self::DuplicateSquaddieTemplate(_) => "REPOSITORY_DUPLICATE_SQUADDIE_TEMPLATE",
            Self::DuplicateActionTemplate(_) => "REPOSITORY_DUPLICATE_ACTION_TEMPLATE",
        }
    }
}

/// Holds every template and battle squaddie of a mission.
///
/// Action templates are referenced by id and never copied out.
#[derive(Clone, Debug, Default)]
pub struct ObjectRepository {
    squaddie_templates: BTreeMap<SquaddieTemplateId, SquaddieTemplate>,
    battle_squaddies: BTreeMap<BattleSquaddieId, BattleSquaddie>,
    action_templates: BTreeMap<ActionTemplateId, ActionTemplate>,
}

impl ObjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_squaddie_template(&mut self, template: SquaddieTemplate) -> Result<(), RepositoryError> {
        if self.squaddie_templates.contains_key(&template.id) {
            return Err(RepositoryError::DuplicateSquaddieTemplate(template.id));
        }
        self.squaddie_templates.insert(template.id.clone(), template);
        Ok(())
    }

    /// Adds a battle squaddie whose template is already registered.
    pub fn add_battle_squaddie(&mut self, squaddie: BattleSquaddie) -> Result<(), RepositoryError> {
        if !self
            .squaddie_templates
            .contains_key(&squaddie.squaddie_template_id)
        {
            return Err(RepositoryError::SquaddieTemplateNotFound(
                squaddie.squaddie_template_id,
            ));
        }
        if self.battle_squaddies.contains_key(&squaddie.battle_squaddie_id) {
            return Err(RepositoryError::DuplicateBattleSquaddie(
                squaddie.battle_squaddie_id,
            ));
        }
        self.battle_squaddies
            .insert(squaddie.battle_squaddie_id.clone(), squaddie);
        Ok(())
    }

    pub fn add_action_template(&mut self, template: ActionTemplate) -> Result<(), RepositoryError> {
        if self.action_templates.contains_key(template.id()) {
            return Err(RepositoryError::DuplicateActionTemplate(template.id().clone()));
        }
        self.action_templates.insert(template.id().clone(), template);
        Ok(())
    }

    pub fn get_squaddie_template(
        &self,
        id: &SquaddieTemplateId,
    ) -> Result<&SquaddieTemplate, RepositoryError> {
        self.squaddie_templates
            .get(id)
            .ok_or_else(|| RepositoryError::SquaddieTemplateNotFound(id.clone()))
    }

    /// Looks up a battle squaddie together with its template.
    pub fn get_squaddie_by_battle_id(
        &self,
        id: &BattleSquaddieId,
    ) -> Result<(&SquaddieTemplate, &BattleSquaddie), RepositoryError> {
        let squaddie = self
            .battle_squaddies
            .get(id)
            .ok_or_else(|| RepositoryError::BattleSquaddieNotFound(id.clone()))?;
        let template = self.get_squaddie_template(&squaddie.squaddie_template_id)?;
        Ok((template, squaddie))
    }

    pub fn battle_squaddie_mut(
        &mut self,
        id: &BattleSquaddieId,
    ) -> Result<&mut BattleSquaddie, RepositoryError> {
        self.battle_squaddies
            .get_mut(id)
            .ok_or_else(|| RepositoryError::BattleSquaddieNotFound(id.clone()))
    }

    pub fn get_action_template_by_id(
        &self,
        id: &ActionTemplateId,
    ) -> Result<&ActionTemplate, RepositoryError> {
        self.action_templates
            .get(id)
            .ok_or_else(|| RepositoryError::ActionTemplateNotFound(id.clone()))
    }

    pub fn affiliation_of(&self, id: &BattleSquaddieId) -> Result<SquaddieAffiliation, RepositoryError> {
        self.get_squaddie_by_battle_id(id)
            .map(|(template, _)| template.affiliation)
    }

    pub fn battle_squaddie_ids(&self) -> impl Iterator<Item = &BattleSquaddieId> {
        self.battle_squaddies.keys()
    }

    pub fn battle_squaddies(&self) -> impl Iterator<Item = &BattleSquaddie> {
        self.battle_squaddies.values()
    }

    pub fn battle_squaddies_mut(&mut self) -> impl Iterator<Item = &mut BattleSquaddie> {
        self.battle_squaddies.values_mut()
    }

    /// Battle squaddies fighting for `affiliation`, in id order.
    pub fn team(&self, affiliation: SquaddieAffiliation) -> Vec<BattleSquaddieId> {
        self.battle_squaddies
            .values()
            .filter(|squaddie| {
                self.squaddie_templates
                    .get(&squaddie.squaddie_template_id)
                    .is_some_and(|template| template.affiliation == affiliation)
            })
            .map(|squaddie| squaddie.battle_squaddie_id.clone())
            .collect()
    }

    pub fn action_templates(&self) -> impl Iterator<Item = &ActionTemplate> {
        self.action_templates.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> ObjectRepository {
        let mut repository = ObjectRepository::new();
        let template = SquaddieTemplate::new("knight", "Knight", SquaddieAffiliation::Player, 5);
        repository
            .add_battle_squaddie(BattleSquaddie::new("knight_0", &template))
            .unwrap_err();
        repository.add_squaddie_template(template.clone()).unwrap();
        repository
            .add_battle_squaddie(BattleSquaddie::new("knight_0", &template))
            .unwrap();
        repository
    }

    #[test]
    fn battle_squaddies_need_a_registered_template() {
        let repository = repository();
        let (template, squaddie) = repository
            .get_squaddie_by_battle_id(&"knight_0".into())
            .unwrap();
        assert_eq!(template.name, "Knight");
        assert_eq!(squaddie.hit_points(), 5);
    }

    #[test]
    fn duplicates_and_missing_ids_are_reported() {
        let mut repository = repository();
        let template = SquaddieTemplate::new("knight", "Knight", SquaddieAffiliation::Player, 5);
        assert_eq!(
            repository.add_squaddie_template(template.clone()),
            Err(RepositoryError::DuplicateSquaddieTemplate("knight".into()))
        );
        assert_eq!(
            repository.add_battle_squaddie(BattleSquaddie::new("knight_0", &template)),
            Err(RepositoryError::DuplicateBattleSquaddie("knight_0".into()))
        );
        assert!(matches!(
            repository.get_action_template_by_id(&"sword".into()),
            Err(RepositoryError::ActionTemplateNotFound(_))
        ));
    }

    #[test]
    fn teams_group_by_affiliation() {
        let repository = repository();
        assert_eq!(repository.team(SquaddieAffiliation::Player), vec![BattleSquaddieId::from("knight_0")]);
        assert!(repository.team(SquaddieAffiliation::Enemy).is_empty());
    }
}
