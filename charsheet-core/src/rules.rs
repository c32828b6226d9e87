//! Skill check resolution.
//!
//! A check adds one d20 to a character's skill total (points in the skill plus
//! the governing attribute's modifier) and compares it with a DC.

use crate::catalog::RulesCatalog;
use crate::character::Character;
use crate::dice::DiceSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Errors that abort a check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("No characters in the party")]
    EmptyRoster,
}

/// Outcome of a resolved check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub character_name: String,
    pub skill: String,
    pub dc: i64,
    /// The natural d20 result.
    pub roll: u32,
    pub skill_total: i64,
    pub total: i64,
    pub success: bool,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Character: {}", self.character_name)?;
        writeln!(f, "Roll: {}", self.roll)?;
        writeln!(f, "Total: {}", self.total)?;
        write!(f, "{}", if self.success { "Success!" } else { "Failure!" })
    }
}

/// Resolve a check once the character and its skill total are fixed.
fn resolve(
    character: &Character,
    skill: &str,
    skill_total: i64,
    dc: i64,
    dice: &mut impl DiceSource,
) -> CheckResult {
    let roll = dice.roll_d20();
    let total = i64::from(roll) + skill_total;
    let success = total >= dc;

    debug!(
        character = %character.name,
        skill,
        roll,
        skill_total,
        total,
        dc,
        success,
        "resolved skill check"
    );

    CheckResult {
        character_name: character.name.clone(),
        skill: skill.to_string(),
        dc,
        roll,
        skill_total,
        total,
        success,
    }
}

/// Roll `skill` for one character against `dc`.
pub fn resolve_skill_check(
    character: &Character,
    catalog: &RulesCatalog,
    skill: &str,
    dc: i64,
    dice: &mut impl DiceSource,
) -> Result<CheckResult, CheckError> {
    let skill_total = character
        .skill_total(skill, catalog)
        .ok_or_else(|| CheckError::UnknownSkill(skill.to_string()))?;
    Ok(resolve(character, skill, skill_total, dc, dice))
}

/// Roll `skill` for whoever in the party has the best skill total.
///
/// The strictly greatest total wins and ties go to the earliest character, so
/// the roller is chosen before the die is cast.
pub fn resolve_party_check(
    characters: &[Character],
    catalog: &RulesCatalog,
    skill: &str,
    dc: i64,
    dice: &mut impl DiceSource,
) -> Result<CheckResult, CheckError> {
    if catalog.skill(skill).is_none() {
        return Err(CheckError::UnknownSkill(skill.to_string()));
    }

    let mut best: Option<(&Character, i64)> = None;
    for character in characters {
        let Some(total) = character.skill_total(skill, catalog) else {
            continue;
        };
        if best.map_or(true, |(_, best_total)| total > best_total) {
            best = Some((character, total));
        }
    }

    let (character, skill_total) = best.ok_or(CheckError::EmptyRoster)?;
    Ok(resolve(character, skill, skill_total, dc, dice))
}
