//! Rules catalog: attributes, skills, and classes.
//!
//! The catalog is static configuration. It is either the built-in
//! [`RulesCatalog::standard`] set or loaded once from JSON at startup, and is
//! never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Attributes
// ============================================================================

/// The six attributes every character carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Attribute {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Attribute::Strength => "STR",
            Attribute::Dexterity => "DEX",
            Attribute::Constitution => "CON",
            Attribute::Intelligence => "INT",
            Attribute::Wisdom => "WIS",
            Attribute::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Strength => "Strength",
            Attribute::Dexterity => "Dexterity",
            Attribute::Constitution => "Constitution",
            Attribute::Intelligence => "Intelligence",
            Attribute::Wisdom => "Wisdom",
            Attribute::Charisma => "Charisma",
        }
    }

    /// All attributes in sheet order.
    pub fn all() -> [Attribute; 6] {
        [
            Attribute::Strength,
            Attribute::Dexterity,
            Attribute::Constitution,
            Attribute::Intelligence,
            Attribute::Wisdom,
            Attribute::Charisma,
        ]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a string names no attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown attribute: {0}")]
pub struct ParseAttributeError(pub String);

impl FromStr for Attribute {
    type Err = ParseAttributeError;

    /// Accepts full names in any case ("strength") and abbreviations ("STR").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Attribute::all()
            .into_iter()
            .find(|a| {
                a.name().eq_ignore_ascii_case(wanted) || a.abbreviation().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ParseAttributeError(s.to_string()))
    }
}

// ============================================================================
// Skills and classes
// ============================================================================

/// A skill and the attribute whose modifier it adds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDefinition {
    pub name: String,
    pub attribute_modifier: Attribute,
}

impl SkillDefinition {
    pub fn new(name: impl Into<String>, attribute_modifier: Attribute) -> Self {
        Self {
            name: name.into(),
            attribute_modifier,
        }
    }
}

/// A class and the minimum attribute scores it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    #[serde(default)]
    pub requirements: BTreeMap<Attribute, u32>,
}

impl ClassDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirements: BTreeMap::new(),
        }
    }

    /// Add a minimum score requirement.
    pub fn requires(mut self, attribute: Attribute, minimum: u32) -> Self {
        self.requirements.insert(attribute, minimum);
        self
    }

    /// Class details line, e.g. "Wizard: Strength 9, ..., Intelligence 14".
    pub fn details(&self) -> String {
        if self.requirements.is_empty() {
            return format!("{}: no requirements", self.name);
        }
        let parts: Vec<String> = self
            .requirements
            .iter()
            .map(|(attribute, minimum)| format!("{} {}", attribute.name(), minimum))
            .collect();
        format!("{}: {}", self.name, parts.join(", "))
    }
}

/// Errors from building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate skill in catalog: {0}")]
    DuplicateSkill(String),

    #[error("Duplicate class in catalog: {0}")]
    DuplicateClass(String),
}

/// The full set of rules a sheet is edited against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesCatalog {
    skills: Vec<SkillDefinition>,
    classes: Vec<ClassDefinition>,
}

impl RulesCatalog {
    /// Build a catalog, rejecting duplicate skill or class names.
    pub fn new(
        skills: Vec<SkillDefinition>,
        classes: Vec<ClassDefinition>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self { skills, classes };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in catalog: 18 skills and the Barbarian, Wizard and Bard classes.
    pub fn standard() -> Self {
        use Attribute::*;

        let skills = [
            ("Acrobatics", Dexterity),
            ("Animal Handling", Wisdom),
            ("Arcana", Intelligence),
            ("Athletics", Strength),
            ("Deception", Charisma),
            ("History", Intelligence),
            ("Insight", Wisdom),
            ("Intimidation", Charisma),
            ("Investigation", Intelligence),
            ("Medicine", Wisdom),
            ("Nature", Intelligence),
            ("Perception", Wisdom),
            ("Performance", Charisma),
            ("Persuasion", Charisma),
            ("Religion", Intelligence),
            ("Sleight of Hand", Dexterity),
            ("Stealth", Dexterity),
            ("Survival", Wisdom),
        ]
        .into_iter()
        .map(|(name, attribute)| SkillDefinition::new(name, attribute))
        .collect();

        let classes = [("Barbarian", Strength), ("Wizard", Intelligence), ("Bard", Charisma)]
            .into_iter()
            .map(|(name, primary)| {
                Attribute::all()
                    .into_iter()
                    .fold(ClassDefinition::new(name), |class, attribute| {
                        let minimum = if attribute == primary { 14 } else { 9 };
                        class.requires(attribute, minimum)
                    })
            })
            .collect();

        Self { skills, classes }
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for skill in &self.skills {
            if !seen.insert(skill.name.as_str()) {
                return Err(CatalogError::DuplicateSkill(skill.name.clone()));
            }
        }
        let mut seen = HashSet::new();
        for class in &self.classes {
            if !seen.insert(class.name.as_str()) {
                return Err(CatalogError::DuplicateClass(class.name.clone()));
            }
        }
        Ok(())
    }

    pub fn skills(&self) -> &[SkillDefinition] {
        &self.skills
    }

    pub fn classes(&self) -> &[ClassDefinition] {
        &self.classes
    }

    pub fn skill(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|s| s.name == name)
    }

    pub fn class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.name == name)
    }
}

impl Default for RulesCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_from_str() {
        assert_eq!("Strength".parse::<Attribute>(), Ok(Attribute::Strength));
        assert_eq!("wisdom".parse::<Attribute>(), Ok(Attribute::Wisdom));
        assert_eq!("cha".parse::<Attribute>(), Ok(Attribute::Charisma));
        assert!("Luck".parse::<Attribute>().is_err());
    }

    #[test]
    fn test_attribute_serializes_by_name() {
        let json = serde_json::to_string(&Attribute::Intelligence).unwrap();
        assert_eq!(json, "\"Intelligence\"");
    }

    #[test]
    fn test_standard_catalog() {
        let catalog = RulesCatalog::standard();
        assert_eq!(catalog.skills().len(), 18);
        assert_eq!(catalog.classes().len(), 3);

        let arcana = catalog.skill("Arcana").unwrap();
        assert_eq!(arcana.attribute_modifier, Attribute::Intelligence);
        assert!(catalog.skill("Basket Weaving").is_none());

        let barbarian = catalog.class("Barbarian").unwrap();
        assert_eq!(barbarian.requirements[&Attribute::Strength], 14);
        assert_eq!(barbarian.requirements[&Attribute::Wisdom], 9);
        assert_eq!(barbarian.requirements.len(), 6);
    }

    #[test]
    fn test_every_skill_governed_by_known_attribute() {
        let catalog = RulesCatalog::standard();
        for skill in catalog.skills() {
            assert!(Attribute::all().contains(&skill.attribute_modifier));
        }
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "skills": [{"name": "Climbing", "attributeModifier": "Strength"}],
            "classes": [
                {"name": "Brute", "requirements": {"Strength": 12}},
                {"name": "Commoner"}
            ]
        }"#;
        let catalog = RulesCatalog::from_json(json).unwrap();
        assert_eq!(catalog.skills().len(), 1);
        assert_eq!(catalog.class("Brute").unwrap().requirements[&Attribute::Strength], 12);
        assert!(catalog.class("Commoner").unwrap().requirements.is_empty());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = RulesCatalog::new(
            vec![
                SkillDefinition::new("Arcana", Attribute::Intelligence),
                SkillDefinition::new("Arcana", Attribute::Wisdom),
            ],
            Vec::new(),
        );
        assert!(matches!(result, Err(CatalogError::DuplicateSkill(name)) if name == "Arcana"));

        let result = RulesCatalog::new(
            Vec::new(),
            vec![ClassDefinition::new("Bard"), ClassDefinition::new("Bard")],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateClass(_))));
    }

    #[test]
    fn test_class_details() {
        let class = ClassDefinition::new("Brute")
            .requires(Attribute::Strength, 12)
            .requires(Attribute::Constitution, 10);
        assert_eq!(class.details(), "Brute: Strength 12, Constitution 10");
        assert_eq!(
            ClassDefinition::new("Commoner").details(),
            "Commoner: no requirements"
        );
    }
}
