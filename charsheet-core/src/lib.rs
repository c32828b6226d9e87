//! Rules and state engine for a tabletop character sheet editor.
//!
//! This crate provides:
//! - A rules catalog of attributes, skills and classes
//! - Characters with budget-checked attribute and skill mutations
//! - Class eligibility derived from attribute thresholds
//! - Single-character and party skill checks on an injectable d20
//! - A roster with an active selection, persisted through a repository
//!
//! # Quick Start
//!
//! ```ignore
//! use charsheet_core::{Attribute, EditorSession, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = EditorSession::open(SessionConfig::from_env()).await?;
//!
//!     session.increment_attribute(Attribute::Intelligence)?;
//!     session.adjust_skill("Arcana", 2)?;
//!
//!     let result = session.party_check("Arcana", 15)?;
//!     println!("{result}");
//!
//!     session.save().await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod character;
pub mod character_builder;
pub mod dice;
pub mod eligibility;
pub mod persist;
pub mod roster;
pub mod rules;
pub mod session;
pub mod sheet;
pub mod testing;

// Primary public API
pub use catalog::{Attribute, ClassDefinition, RulesCatalog, SkillDefinition};
pub use character::{modifier, AttributeSet, Character, SkillSet};
pub use character_builder::{BuilderError, CharacterBuilder};
pub use dice::{DiceSource, RngDice};
pub use eligibility::eligible_classes;
pub use persist::{CharacterRepository, JsonFileRepository, MemoryRepository, PersistError};
pub use roster::{Roster, RosterError};
pub use rules::{resolve_party_check, resolve_skill_check, CheckError, CheckResult};
pub use session::{EditorSession, SessionConfig, SessionError};
pub use sheet::CharacterSheet;
