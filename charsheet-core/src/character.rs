//! Characters, their point budgets, and the mutations that respect them.
//!
//! Every mutator takes the current character by reference and returns a new
//! value. A mutation that would break a budget is a silent no-op: the returned
//! character equals the input.

use crate::catalog::{Attribute, RulesCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Maximum sum of all attribute scores.
pub const MAX_ATTRIBUTE_TOTAL: u32 = 70;

/// Skill points every character gets before the Intelligence modifier.
pub const BASE_SKILL_POINTS: i32 = 10;

/// Skill points granted (or removed) per point of Intelligence modifier.
pub const SKILL_POINTS_PER_INT_MODIFIER: i32 = 4;

/// Score every attribute starts at.
pub const DEFAULT_ATTRIBUTE_SCORE: u32 = 10;

/// Modifier for an attribute score: `floor((score - 10) / 2)`.
pub fn modifier(score: u32) -> i32 {
    // Floor division so 9 maps to -1, not 0.
    (i64::from(score) - 10).div_euclid(2) as i32
}

// ============================================================================
// Attributes
// ============================================================================

/// Scores for all six attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeSet {
    pub strength: u32,
    pub dexterity: u32,
    pub constitution: u32,
    pub intelligence: u32,
    pub wisdom: u32,
    pub charisma: u32,
}

impl AttributeSet {
    /// Scores in the usual STR, DEX, CON, INT, WIS, CHA order.
    pub fn new(str: u32, dex: u32, con: u32, int: u32, wis: u32, cha: u32) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    /// Score for one attribute.
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    /// Overwrite one attribute's score. No cap is applied.
    pub fn set(&mut self, attribute: Attribute, value: u32) {
        match attribute {
            Attribute::Strength => self.strength = value,
            Attribute::Dexterity => self.dexterity = value,
            Attribute::Constitution => self.constitution = value,
            Attribute::Intelligence => self.intelligence = value,
            Attribute::Wisdom => self.wisdom = value,
            Attribute::Charisma => self.charisma = value,
        }
    }

    /// Modifier for one attribute's current score.
    pub fn modifier(&self, attribute: Attribute) -> i32 {
        modifier(self.get(attribute))
    }

    /// Sum of all scores.
    pub fn total(&self) -> u64 {
        Attribute::all()
            .into_iter()
            .map(|a| u64::from(self.get(a)))
            .sum()
    }

    /// Attributes and scores in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u32)> + '_ {
        Attribute::all().into_iter().map(move |a| (a, self.get(a)))
    }
}

impl Default for AttributeSet {
    fn default() -> Self {
        let s = DEFAULT_ATTRIBUTE_SCORE;
        Self::new(s, s, s, s, s, s)
    }
}

// ============================================================================
// Skills
// ============================================================================

/// Points allocated per skill, keyed by skill name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeMap<String, u32>);

impl SkillSet {
    /// A zeroed entry for every skill in the catalog.
    pub fn for_catalog(catalog: &RulesCatalog) -> Self {
        Self(
            catalog
                .skills()
                .iter()
                .map(|skill| (skill.name.clone(), 0))
                .collect(),
        )
    }

    /// Points in a skill, `None` if the skill is not tracked.
    pub fn get(&self, skill: &str) -> Option<u32> {
        self.0.get(skill).copied()
    }

    /// Points in a skill, treating untracked skills as 0.
    pub fn points(&self, skill: &str) -> u32 {
        self.get(skill).unwrap_or(0)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains_key(skill)
    }

    pub fn set(&mut self, skill: impl Into<String>, points: u32) {
        self.0.insert(skill.into(), points);
    }

    /// Sum of all allocated points.
    pub fn total(&self) -> u64 {
        self.0.values().map(|&p| u64::from(p)).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, &points)| (name.as_str(), points))
    }
}

impl FromIterator<(String, u32)> for SkillSet {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Character
// ============================================================================

/// A character record, in the shape the repository stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub name: String,
    pub attributes: AttributeSet,
    #[serde(default)]
    pub skills: SkillSet,
}

impl Character {
    /// A character with every attribute at 10 and no skill points spent.
    pub fn new(name: impl Into<String>, catalog: &RulesCatalog) -> Self {
        Self {
            name: name.into(),
            attributes: AttributeSet::default(),
            skills: SkillSet::for_catalog(catalog),
        }
    }

    /// Skill points this character may spend, from its current Intelligence.
    ///
    /// Negative when Intelligence is low enough.
    pub fn skill_points_available(&self) -> i64 {
        i64::from(BASE_SKILL_POINTS)
            + i64::from(SKILL_POINTS_PER_INT_MODIFIER)
                * i64::from(self.attributes.modifier(Attribute::Intelligence))
    }

    /// Points currently allocated across all skills.
    pub fn skill_points_used(&self) -> u64 {
        self.skills.total()
    }

    /// Raise an attribute by one if the attribute total stays within the cap.
    #[must_use]
    pub fn increment_attribute(&self, attribute: Attribute) -> Character {
        let total = self.attributes.total();
        if total + 1 > u64::from(MAX_ATTRIBUTE_TOTAL) {
            debug!(character = %self.name, %attribute, total, "attribute increment exceeds cap");
            return self.clone();
        }
        let mut next = self.clone();
        next.attributes
            .set(attribute, self.attributes.get(attribute) + 1);
        next
    }

    /// Lower an attribute by one unless it is already 0.
    #[must_use]
    pub fn decrement_attribute(&self, attribute: Attribute) -> Character {
        let score = self.attributes.get(attribute);
        if score == 0 {
            debug!(character = %self.name, %attribute, "attribute already at zero");
            return self.clone();
        }
        let mut next = self.clone();
        next.attributes.set(attribute, score - 1);
        next
    }

    /// Move `delta` points into (or out of) a skill.
    ///
    /// The result must leave the skill non-negative and the total within
    /// [`Character::skill_points_available`], whatever the sign of `delta`.
    /// A character left over budget by a lowered Intelligence is frozen until
    /// a change brings the total back under. Skills the character does not
    /// track are ignored.
    #[must_use]
    pub fn adjust_skill(&self, skill: &str, delta: i32) -> Character {
        let Some(current) = self.skills.get(skill) else {
            debug!(character = %self.name, skill, "skill not tracked");
            return self.clone();
        };

        let new_value = i64::from(current) + i64::from(delta);
        let Ok(new_value) = u32::try_from(new_value) else {
            debug!(character = %self.name, skill, delta, "skill would leave 0..=u32::MAX");
            return self.clone();
        };

        let used = self.skill_points_used() as i64 + i64::from(delta);
        let available = self.skill_points_available();
        if used > available {
            debug!(
                character = %self.name,
                skill,
                used,
                available,
                "skill points exceed budget"
            );
            return self.clone();
        }

        let mut next = self.clone();
        next.skills.set(skill, new_value);
        next
    }

    /// Points in `skill` plus the governing attribute's modifier.
    ///
    /// Returns `None` if the catalog has no such skill.
    pub fn skill_total(&self, skill: &str, catalog: &RulesCatalog) -> Option<i64> {
        let definition = catalog.skill(skill)?;
        Some(
            i64::from(self.skills.points(skill))
                + i64::from(self.attributes.modifier(definition.attribute_modifier)),
        )
    }

    /// Align the skill set with the catalog.
    ///
    /// Missing skills are added at 0 and uncataloged entries are dropped.
    /// Budgets are left untouched.
    #[must_use]
    pub fn normalized(mut self, catalog: &RulesCatalog) -> Character {
        let dropped: Vec<&str> = self
            .skills
            .iter()
            .filter(|(name, _)| catalog.skill(name).is_none())
            .map(|(name, _)| name)
            .collect();
        if !dropped.is_empty() {
            debug!(character = %self.name, ?dropped, "dropping uncataloged skills");
        }

        self.skills = catalog
            .skills()
            .iter()
            .map(|s| (s.name.clone(), self.skills.points(&s.name)))
            .collect();
        self
    }
}
