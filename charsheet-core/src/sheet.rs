//! Read-only character sheet view.
//!
//! Everything here is derived from a character and the catalog at build time,
//! so a sheet is only as current as the character it was built from.

use crate::catalog::{Attribute, RulesCatalog};
use crate::character::{Character, MAX_ATTRIBUTE_TOTAL};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeLine {
    pub attribute: Attribute,
    pub score: u32,
    pub modifier: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillLine {
    pub name: String,
    pub attribute: Attribute,
    pub points: u32,
    pub modifier: i32,
    /// Points plus the governing attribute's modifier.
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassLine {
    pub name: String,
    pub eligible: bool,
}

/// Everything an editor displays for one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterSheet {
    pub name: String,
    pub attributes: Vec<AttributeLine>,
    pub attribute_total: u64,
    pub attribute_cap: u32,
    pub skills: Vec<SkillLine>,
    pub skill_points_used: u64,
    pub skill_points_available: i64,
    pub classes: Vec<ClassLine>,
}

impl CharacterSheet {
    /// Derive the sheet for `character`, listing skills and classes in catalog order.
    pub fn build(character: &Character, catalog: &RulesCatalog) -> Self {
        let attributes = character
            .attributes
            .iter()
            .map(|(attribute, score)| AttributeLine {
                attribute,
                score,
                modifier: character.attributes.modifier(attribute),
            })
            .collect();

        let skills = catalog
            .skills()
            .iter()
            .map(|skill| {
                let points = character.skills.points(&skill.name);
                let modifier = character.attributes.modifier(skill.attribute_modifier);
                SkillLine {
                    name: skill.name.clone(),
                    attribute: skill.attribute_modifier,
                    points,
                    modifier,
                    total: i64::from(points) + i64::from(modifier),
                }
            })
            .collect();

        let classes = catalog
            .classes()
            .iter()
            .map(|class| ClassLine {
                name: class.name.clone(),
                eligible: class.is_eligible(&character.attributes),
            })
            .collect();

        Self {
            name: character.name.clone(),
            attributes,
            attribute_total: character.attributes.total(),
            attribute_cap: MAX_ATTRIBUTE_TOTAL,
            skills,
            skill_points_used: character.skill_points_used(),
            skill_points_available: character.skill_points_available(),
            classes,
        }
    }

    pub fn skill(&self, name: &str) -> Option<&SkillLine> {
        self.skills.iter().find(|s| s.name == name)
    }

    pub fn is_eligible(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c.name == class && c.eligible)
    }
}
