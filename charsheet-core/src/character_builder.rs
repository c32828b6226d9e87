//! Builder for new characters.
//!
//! Unlike the mutators, which silently ignore over-budget changes, the
//! builder reports exactly which rule a requested character breaks.

use crate::catalog::{Attribute, RulesCatalog};
use crate::character::{AttributeSet, Character, SkillSet, MAX_ATTRIBUTE_TOTAL};
use thiserror::Error;

/// Error from character building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("Character name is required")]
    MissingName,

    #[error("Attribute total {total} exceeds the cap of {cap}")]
    AttributeTotalExceeded { total: u64, cap: u32 },

    #[error("Skill {0} is not in the catalog")]
    UnknownSkill(String),

    #[error("Skill points used ({used}) exceed the {available} available")]
    SkillBudgetExceeded { used: u64, available: i64 },
}

/// Builder for creating characters that satisfy both budgets.
#[derive(Debug, Clone, Default)]
pub struct CharacterBuilder {
    name: Option<String>,
    attributes: AttributeSet,
    skills: Vec<(String, u32)>,
}

impl CharacterBuilder {
    /// Start from every attribute at 10 and no skills.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn attribute(mut self, attribute: Attribute, score: u32) -> Self {
        self.attributes.set(attribute, score);
        self
    }

    pub fn attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }

    /// Allocate points to a skill. Later calls for the same skill win.
    pub fn skill(mut self, name: impl Into<String>, points: u32) -> Self {
        self.skills.push((name.into(), points));
        self
    }

    /// Validate and build the character.
    pub fn build(self, catalog: &RulesCatalog) -> Result<Character, BuilderError> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(BuilderError::MissingName)?;

        let total = self.attributes.total();
        if total > u64::from(MAX_ATTRIBUTE_TOTAL) {
            return Err(BuilderError::AttributeTotalExceeded {
                total,
                cap: MAX_ATTRIBUTE_TOTAL,
            });
        }

        let mut skills = SkillSet::for_catalog(catalog);
        for (skill, points) in self.skills {
            if catalog.skill(&skill).is_none() {
                return Err(BuilderError::UnknownSkill(skill));
            }
            skills.set(skill, points);
        }

        let character = Character {
            name,
            attributes: self.attributes,
            skills,
        };

        let used = character.skill_points_used();
        let available = character.skill_points_available();
        if (used as i64) > available {
            return Err(BuilderError::SkillBudgetExceeded { used, available });
        }

        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_character() {
        let catalog = RulesCatalog::standard();
        let character = CharacterBuilder::new()
            .name("Keyleth")
            .attribute(Attribute::Wisdom, 16)
            .attribute(Attribute::Intelligence, 12)
            .skill("Nature", 6)
            .skill("Survival", 4)
            .build(&catalog)
            .unwrap();

        assert_eq!(character.attributes.wisdom, 16);
        assert_eq!(character.skills.points("Nature"), 6);
        assert_eq!(character.skills.len(), 18);
        assert_eq!(character.skill_points_used(), 10);
    }

    #[test]
    fn test_missing_name_error() {
        let catalog = RulesCatalog::standard();
        let result = CharacterBuilder::new().build(&catalog);
        assert_eq!(result.unwrap_err(), BuilderError::MissingName);

        let result = CharacterBuilder::new().name("   ").build(&catalog);
        assert_eq!(result.unwrap_err(), BuilderError::MissingName);
    }

    #[test]
    fn test_attribute_cap() {
        let catalog = RulesCatalog::standard();
        let result = CharacterBuilder::new()
            .name("Too Strong")
            .attribute(Attribute::Strength, 21)
            .build(&catalog);
        assert_eq!(
            result.unwrap_err(),
            BuilderError::AttributeTotalExceeded { total: 71, cap: 70 }
        );
    }

    #[test]
    fn test_skill_errors() {
        let catalog = RulesCatalog::standard();
        let result = CharacterBuilder::new()
            .name("Odd")
            .skill("Juggling", 1)
            .build(&catalog);
        assert_eq!(result.unwrap_err(), BuilderError::UnknownSkill("Juggling".to_string()));

        let result = CharacterBuilder::new()
            .name("Dabbler")
            .attribute(Attribute::Intelligence, 8)
            .skill("Arcana", 4)
            .skill("History", 3)
            .build(&catalog);
        assert_eq!(
            result.unwrap_err(),
            BuilderError::SkillBudgetExceeded {
                used: 7,
                available: 6
            }
        );
    }
}
