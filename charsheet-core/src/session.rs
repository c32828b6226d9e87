//! EditorSession - the primary public API for editing a roster.
//!
//! This module wraps the rules catalog, the roster, a repository and a dice
//! source into a single object. The rules themselves stay synchronous; only
//! loading and saving go through the repository asynchronously.

use crate::catalog::{Attribute, CatalogError, ClassDefinition, RulesCatalog};
use crate::character::Character;
use crate::dice::{DiceSource, RngDice};
use crate::eligibility::eligible_classes;
use crate::persist::{CharacterRepository, JsonFileRepository, PersistError};
use crate::roster::{Roster, RosterError, DEFAULT_CHARACTER_NAME};
use crate::rules::{resolve_party_check, resolve_skill_check, CheckError, CheckResult};
use crate::sheet::CharacterSheet;
use rand::rngs::ThreadRng;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from EditorSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("Check error: {0}")]
    Check(#[from] CheckError),

    #[error("Unknown class: {0}")]
    UnknownClass(String),
}

/// Configuration for opening an editor session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name of the character a fresh roster starts with.
    pub default_character_name: String,

    /// Where the JSON file repository keeps characters.
    pub save_path: PathBuf,

    /// Optional JSON catalog to use instead of the standard one.
    pub catalog_path: Option<PathBuf>,
}

impl SessionConfig {
    /// Environment variable overriding the save path.
    pub const SAVE_PATH_VAR: &'static str = "CHARSHEET_SAVE_PATH";
    /// Environment variable naming a catalog file.
    pub const CATALOG_VAR: &'static str = "CHARSHEET_CATALOG";
    /// Environment variable overriding the default character name.
    pub const DEFAULT_NAME_VAR: &'static str = "CHARSHEET_DEFAULT_NAME";

    /// Create a config saving to `save_path` with the standard catalog.
    pub fn new(save_path: impl Into<PathBuf>) -> Self {
        Self {
            default_character_name: DEFAULT_CHARACTER_NAME.to_string(),
            save_path: save_path.into(),
            catalog_path: None,
        }
    }

    /// Build a config from the environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::new(
            std::env::var(Self::SAVE_PATH_VAR).unwrap_or_else(|_| "characters.json".to_string()),
        );
        if let Ok(path) = std::env::var(Self::CATALOG_VAR) {
            config = config.with_catalog_path(path);
        }
        if let Ok(name) = std::env::var(Self::DEFAULT_NAME_VAR) {
            config = config.with_default_character_name(name);
        }
        config
    }

    /// Set the name of the character a fresh roster starts with.
    pub fn with_default_character_name(mut self, name: impl Into<String>) -> Self {
        self.default_character_name = name.into();
        self
    }

    /// Set where characters are saved.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Load the catalog from a JSON file instead of using the standard one.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// The configured catalog, or the standard one if none is set.
    pub async fn load_catalog(&self) -> Result<RulesCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => RulesCatalog::load(path).await,
            None => Ok(RulesCatalog::standard()),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new("characters.json")
    }
}

/// A character editing session.
///
/// The session manages:
/// - The rules catalog
/// - The roster and its active character
/// - Loading from and saving to a repository
/// - The dice used for checks
pub struct EditorSession<R, D = RngDice<ThreadRng>> {
    catalog: RulesCatalog,
    roster: Roster,
    repository: R,
    dice: D,
}

impl EditorSession<JsonFileRepository> {
    /// Open a session on the configured JSON file with thread-RNG dice.
    pub async fn open(config: SessionConfig) -> Result<Self, SessionError> {
        let catalog = config.load_catalog().await?;
        let roster = Roster::with_default_name(config.default_character_name, &catalog);
        let repository = JsonFileRepository::new(config.save_path);
        let mut session = Self::new(catalog, roster, repository, RngDice::thread());
        session.reload().await;
        Ok(session)
    }
}

impl<R: CharacterRepository, D: DiceSource> EditorSession<R, D> {
    /// Assemble a session without touching the repository.
    pub fn new(catalog: RulesCatalog, roster: Roster, repository: R, dice: D) -> Self {
        Self {
            catalog,
            roster,
            repository,
            dice,
        }
    }

    /// Start a session: a default roster, then whatever the repository holds.
    pub async fn start(catalog: RulesCatalog, repository: R, dice: D) -> Self {
        let roster = Roster::new(&catalog);
        let mut session = Self::new(catalog, roster, repository, dice);
        session.reload().await;
        session
    }

    /// Reload from the repository.
    ///
    /// A non-empty load replaces the roster. An empty or failed load leaves it
    /// as it was. Returns whether the roster was replaced.
    pub async fn reload(&mut self) -> bool {
        let loaded = match self.repository.load().await {
            Ok(characters) => characters,
            Err(e) => {
                warn!(error = %e, "failed to load characters; keeping current roster");
                return false;
            }
        };
        let loaded = loaded
            .into_iter()
            .map(|c| c.normalized(&self.catalog))
            .collect();
        self.roster.replace_with_loaded(loaded)
    }

    /// Send the current roster to the repository.
    ///
    /// The session does not retry; the result is returned for the caller to
    /// report if it wishes.
    pub async fn save(&self) -> Result<(), PersistError> {
        match self.repository.save(self.roster.characters()).await {
            Ok(()) => {
                info!(count = self.roster.len(), "saved characters");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to save characters");
                Err(e)
            }
        }
    }

    /// The rules in effect for this session.
    pub fn catalog(&self) -> &RulesCatalog {
        &self.catalog
    }

    /// The current roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The active character, if any.
    pub fn active(&self) -> Option<&Character> {
        self.roster.active()
    }

    /// Make the character at `index` active.
    pub fn select(&mut self, index: usize) -> Result<&Character, SessionError> {
        Ok(self.roster.select(index)?)
    }

    /// Add a character, filling in any cataloged skills it lacks.
    pub fn add_character(&mut self, character: Character) -> usize {
        self.roster.add(character.normalized(&self.catalog))
    }

    /// Add a fresh default character with the given name.
    pub fn new_character(&mut self, name: impl Into<String>) -> usize {
        let character = Character::new(name, &self.catalog);
        self.roster.add(character)
    }

    /// Remove a character, keeping the selection valid.
    pub fn remove_character(&mut self, index: usize) -> Result<Character, SessionError> {
        Ok(self.roster.remove(index)?)
    }

    /// Raise an attribute of the active character, within the cap.
    pub fn increment_attribute(&mut self, attribute: Attribute) -> Result<&Character, SessionError> {
        let index = self.roster.require_active()?;
        Ok(self.roster.increment_attribute(index, attribute)?)
    }

    /// Lower an attribute of the active character.
    pub fn decrement_attribute(&mut self, attribute: Attribute) -> Result<&Character, SessionError> {
        let index = self.roster.require_active()?;
        Ok(self.roster.decrement_attribute(index, attribute)?)
    }

    /// Move points into or out of a skill of the active character.
    pub fn adjust_skill(&mut self, skill: &str, delta: i32) -> Result<&Character, SessionError> {
        let index = self.roster.require_active()?;
        Ok(self.roster.adjust_skill(index, skill, delta)?)
    }

    /// Sheet for the active character.
    pub fn sheet(&self) -> Result<CharacterSheet, SessionError> {
        let index = self.roster.require_active()?;
        Ok(CharacterSheet::build(&self.roster.characters()[index], &self.catalog))
    }

    /// Classes the active character qualifies for.
    pub fn eligible_classes(&self) -> Result<BTreeSet<&str>, SessionError> {
        let character = self.roster.active().ok_or(RosterError::NoActiveCharacter)?;
        Ok(eligible_classes(character, &self.catalog))
    }

    pub fn class_details(&self, class: &str) -> Result<String, SessionError> {
        self.catalog
            .class(class)
            .map(ClassDefinition::details)
            .ok_or_else(|| SessionError::UnknownClass(class.to_string()))
    }

    /// Skill check for the active character.
    pub fn skill_check(&mut self, skill: &str, dc: i64) -> Result<CheckResult, SessionError> {
        let character = self.roster.active().ok_or(RosterError::NoActiveCharacter)?;
        Ok(resolve_skill_check(character, &self.catalog, skill, dc, &mut self.dice)?)
    }

    /// Skill check for whoever in the roster is best at `skill`.
    pub fn party_check(&mut self, skill: &str, dc: i64) -> Result<CheckResult, SessionError> {
        Ok(resolve_party_check(
            self.roster.characters(),
            &self.catalog,
            skill,
            dc,
            &mut self.dice,
        )?)
    }
}
