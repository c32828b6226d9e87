//! Testing utilities.
//!
//! This module provides tools for deterministic tests:
//! - `FixedRolls` for scripted d20 results
//! - Character constructors with preset attributes
//! - `MemoryRepository` re-export for session tests

use crate::catalog::RulesCatalog;
use crate::character::{AttributeSet, Character};
use crate::dice::{DiceSource, D20_SIDES};

pub use crate::persist::MemoryRepository;

/// A dice source that replays a fixed sequence of rolls, cycling forever.
#[derive(Debug, Clone)]
pub struct FixedRolls {
    rolls: Vec<u32>,
    next: usize,
}

impl FixedRolls {
    /// Replay `rolls` in order.
    ///
    /// # Panics
    ///
    /// Panics if `rolls` is empty or holds a value outside `1..=20`.
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        let rolls: Vec<u32> = rolls.into_iter().collect();
        assert!(!rolls.is_empty(), "FixedRolls needs at least one roll");
        assert!(
            rolls.iter().all(|r| (1..=D20_SIDES).contains(r)),
            "d20 rolls must be in 1..=20: {rolls:?}"
        );
        Self { rolls, next: 0 }
    }

    /// Always roll the same value.
    pub fn always(roll: u32) -> Self {
        Self::new([roll])
    }

    /// Number of rolls made so far.
    pub fn rolls_made(&self) -> usize {
        self.next
    }
}

impl DiceSource for FixedRolls {
    fn roll_d20(&mut self) -> u32 {
        let roll = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        roll
    }
}

/// A character on the standard catalog with the given attributes and no skill points.
pub fn character_with(name: &str, attributes: AttributeSet) -> Character {
    let mut character = Character::new(name, &RulesCatalog::standard());
    character.attributes = attributes;
    character
}

/// A three-member party with distinct strengths.
///
/// - "Grog": Strength 16, Athletics 4 (Athletics total 7)
/// - "Vex": Dexterity 16, Stealth 5 (Stealth total 8)
/// - "Pike": Wisdom 14, Intelligence 12, Medicine 6 (Medicine total 8)
pub fn sample_party() -> Vec<Character> {
    vec![
        character_with("Grog", AttributeSet::new(16, 10, 12, 8, 8, 6)).adjust_skill("Athletics", 4),
        character_with("Vex", AttributeSet::new(8, 16, 10, 10, 12, 10)).adjust_skill("Stealth", 5),
        character_with("Pike", AttributeSet::new(10, 8, 12, 12, 14, 10)).adjust_skill("Medicine", 6),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rolls_cycle() {
        let mut dice = FixedRolls::new([3, 17]);
        assert_eq!(dice.roll_d20(), 3);
        assert_eq!(dice.roll_d20(), 17);
        assert_eq!(dice.roll_d20(), 3);
        assert_eq!(dice.rolls_made(), 3);
    }

    #[test]
    #[should_panic]
    fn test_fixed_rolls_rejects_out_of_range() {
        FixedRolls::new([0]);
    }

    #[test]
    fn test_sample_party_within_budgets() {
        for character in sample_party() {
            assert!(character.attributes.total() <= 70);
            assert!((character.skill_points_used() as i64) <= character.skill_points_available());
            assert!(character.skill_points_used() > 0, "{} has no skills", character.name);
        }
    }
}
