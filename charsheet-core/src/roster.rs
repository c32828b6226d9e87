//! The roster: every character under edit plus the active selection.
//!
//! The roster owns its characters outright. Mutations go through the
//! character mutators and the result replaces the stored value; nothing is
//! patched in place.

use crate::catalog::{Attribute, RulesCatalog};
use crate::character::Character;
use thiserror::Error;
use tracing::{debug, info};

/// Name given to the character a fresh roster starts with.
pub const DEFAULT_CHARACTER_NAME: &str = "Default Character";

/// Errors from addressing a roster slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Character index {index} out of range (roster has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No active character")]
    NoActiveCharacter,
}

/// Ordered characters and the index of the one being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    characters: Vec<Character>,
    active: Option<usize>,
}

impl Roster {
    /// A roster holding one default character, selected.
    pub fn new(catalog: &RulesCatalog) -> Self {
        Self::with_default_name(DEFAULT_CHARACTER_NAME, catalog)
    }

    /// A roster holding one default character with the given name.
    pub fn with_default_name(name: impl Into<String>, catalog: &RulesCatalog) -> Self {
        Self::from_characters(vec![Character::new(name, catalog)])
    }

    /// A roster over existing characters; the first is selected if any.
    pub fn from_characters(characters: Vec<Character>) -> Self {
        let active = if characters.is_empty() { None } else { Some(0) };
        Self { characters, active }
    }

    /// All characters in roster order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Character at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    /// Index of the active character.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The active character, `None` for an empty roster.
    pub fn active(&self) -> Option<&Character> {
        self.active.and_then(|i| self.characters.get(i))
    }

    /// Make the character at `index` active.
    pub fn select(&mut self, index: usize) -> Result<&Character, RosterError> {
        self.check_index(index)?;
        self.active = Some(index);
        Ok(&self.characters[index])
    }

    /// Label for a roster slot, falling back to "Character N" for unnamed characters.
    pub fn display_name(&self, index: usize) -> Option<String> {
        let character = self.characters.get(index)?;
        if character.name.trim().is_empty() {
            Some(format!("Character {}", index + 1))
        } else {
            Some(character.name.clone())
        }
    }

    /// Append a character, selecting it if nothing was active. Returns its index.
    pub fn add(&mut self, character: Character) -> usize {
        self.characters.push(character);
        let index = self.characters.len() - 1;
        if self.active.is_none() {
            self.active = Some(index);
        }
        index
    }

    /// Remove the character at `index`, keeping the selection on a valid slot.
    pub fn remove(&mut self, index: usize) -> Result<Character, RosterError> {
        self.check_index(index)?;
        let removed = self.characters.remove(index);
        self.active = match self.active {
            _ if self.characters.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) if active >= self.characters.len() => Some(self.characters.len() - 1),
            other => other,
        };
        Ok(removed)
    }

    /// Swap in a freshly loaded roster.
    ///
    /// An empty load is ignored. Returns whether the roster was replaced.
    pub fn replace_with_loaded(&mut self, loaded: Vec<Character>) -> bool {
        if loaded.is_empty() {
            debug!("loaded roster is empty; keeping current roster");
            return false;
        }
        info!(count = loaded.len(), "replacing roster with loaded characters");
        *self = Self::from_characters(loaded);
        true
    }

    /// Replace the character at `index` with `f` applied to it.
    pub fn update(
        &mut self,
        index: usize,
        f: impl FnOnce(&Character) -> Character,
    ) -> Result<&Character, RosterError> {
        self.check_index(index)?;
        let next = f(&self.characters[index]);
        self.characters[index] = next;
        Ok(&self.characters[index])
    }

    pub fn increment_attribute(
        &mut self,
        index: usize,
        attribute: Attribute,
    ) -> Result<&Character, RosterError> {
        self.update(index, |c| c.increment_attribute(attribute))
    }

    pub fn decrement_attribute(
        &mut self,
        index: usize,
        attribute: Attribute,
    ) -> Result<&Character, RosterError> {
        self.update(index, |c| c.decrement_attribute(attribute))
    }

    pub fn adjust_skill(
        &mut self,
        index: usize,
        skill: &str,
        delta: i32,
    ) -> Result<&Character, RosterError> {
        self.update(index, |c| c.adjust_skill(skill, delta))
    }

    /// Index of the active character, or an error if none is selected.
    pub fn require_active(&self) -> Result<usize, RosterError> {
        self.active.ok_or(RosterError::NoActiveCharacter)
    }

    fn check_index(&self, index: usize) -> Result<(), RosterError> {
        if index < self.characters.len() {
            Ok(())
        } else {
            Err(RosterError::IndexOutOfRange {
                index,
                len: self.characters.len(),
            })
        }
    }
}
