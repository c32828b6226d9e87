//! QA tests for load/save through a repository.
//!
//! These tests verify that the roster is replaced only by a non-empty load and
//! that saves write the plain character records.

use charsheet_core::catalog::{Attribute, RulesCatalog};
use charsheet_core::persist::{CharacterRepository, JsonFileRepository, PersistError};
use charsheet_core::roster::DEFAULT_CHARACTER_NAME;
use charsheet_core::session::{EditorSession, SessionConfig};
use charsheet_core::testing::{sample_party, FixedRolls, MemoryRepository};
use charsheet_core::Character;
use tempfile::TempDir;

/// A repository whose transport always fails.
struct BrokenRepository;

impl CharacterRepository for BrokenRepository {
    async fn load(&self) -> Result<Vec<Character>, PersistError> {
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "offline").into())
    }

    async fn save(&self, _characters: &[Character]) -> Result<(), PersistError> {
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "offline").into())
    }
}

// =============================================================================
// TEST 1: Save and load through a file
// =============================================================================

#[tokio::test]
async fn test_save_and_load_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let save_path = temp_dir.path().join("characters.json");

    let repo = JsonFileRepository::new(&save_path);
    let mut session =
        EditorSession::start(RulesCatalog::standard(), repo, FixedRolls::always(10)).await;
    assert_eq!(session.active().unwrap().name, DEFAULT_CHARACTER_NAME);

    session.increment_attribute(Attribute::Dexterity).unwrap();
    session.adjust_skill("Stealth", 3).unwrap();
    let second = session.new_character("Second");
    session.select(second).unwrap();
    session.increment_attribute(Attribute::Wisdom).unwrap();
    session.save().await.expect("save should succeed");

    assert!(save_path.exists(), "Save file should exist after saving");

    let reopened = EditorSession::start(
        RulesCatalog::standard(),
        JsonFileRepository::new(&save_path),
        FixedRolls::always(10),
    )
    .await;

    assert_eq!(reopened.roster().len(), 2);
    assert_eq!(reopened.roster().active_index(), Some(0));
    let first = reopened.roster().get(0).unwrap();
    assert_eq!(first.attributes.dexterity, 11);
    assert_eq!(first.skills.points("Stealth"), 3);
    assert_eq!(reopened.roster().get(1).unwrap().attributes.wisdom, 11);
}

// =============================================================================
// TEST 2: Failed and empty loads leave the roster alone
// =============================================================================

#[tokio::test]
async fn test_failed_load_keeps_roster() {
    let mut session =
        EditorSession::start(RulesCatalog::standard(), BrokenRepository, FixedRolls::always(10))
            .await;
    assert_eq!(session.roster().len(), 1);
    assert_eq!(session.active().unwrap().name, DEFAULT_CHARACTER_NAME);

    session.increment_attribute(Attribute::Strength).unwrap();
    assert!(!session.reload().await);
    assert_eq!(session.active().unwrap().attributes.strength, 11);

    assert!(session.save().await.is_err());
    assert_eq!(session.roster().len(), 1);
}

#[tokio::test]
async fn test_empty_load_keeps_roster() {
    let repo = MemoryRepository::new();
    let mut session = EditorSession::start(RulesCatalog::standard(), repo, FixedRolls::always(10)).await;
    session.adjust_skill("Insight", 2).unwrap();

    assert!(!session.reload().await);
    assert_eq!(session.active().unwrap().skills.points("Insight"), 2);
}

#[tokio::test]
async fn test_corrupt_file_keeps_roster() {
    let temp_dir = TempDir::new().unwrap();
    let save_path = temp_dir.path().join("characters.json");
    tokio::fs::write(&save_path, "[{\"name\": 3}]").await.unwrap();

    let session = EditorSession::start(
        RulesCatalog::standard(),
        JsonFileRepository::new(&save_path),
        FixedRolls::always(10),
    )
    .await;
    assert_eq!(session.roster().len(), 1);
    assert_eq!(session.active().unwrap().name, DEFAULT_CHARACTER_NAME);
}

// =============================================================================
// TEST 3: Loaded records are aligned with the catalog
// =============================================================================

#[tokio::test]
async fn test_loaded_records_are_normalized() {
    let temp_dir = TempDir::new().unwrap();
    let save_path = temp_dir.path().join("characters.json");
    let json = r#"[
        {
            "name": "",
            "attributes": {"Strength": 12, "Dexterity": 12, "Constitution": 12,
                           "Intelligence": 12, "Wisdom": 12, "Charisma": 12},
            "skills": {"Arcana": 9, "Basket Weaving": 4}
        }
    ]"#;
    tokio::fs::write(&save_path, json).await.unwrap();

    let mut session = EditorSession::start(
        RulesCatalog::standard(),
        JsonFileRepository::new(&save_path),
        FixedRolls::always(10),
    )
    .await;

    assert_eq!(session.roster().display_name(0).as_deref(), Some("Character 1"));
    let loaded = session.active().unwrap();
    assert_eq!(loaded.skills.len(), 18);
    assert_eq!(loaded.skills.points("Arcana"), 9);
    assert!(!loaded.skills.contains("Basket Weaving"));

    // Attribute total 72 is over the cap but loads as-is; only increases are blocked.
    assert_eq!(loaded.attributes.total(), 72);
    session.increment_attribute(Attribute::Strength).unwrap();
    assert_eq!(session.active().unwrap().attributes.strength, 12);
    session.decrement_attribute(Attribute::Strength).unwrap();
    assert_eq!(session.active().unwrap().attributes.strength, 11);
}

// =============================================================================
// TEST 4: Opening from config
// =============================================================================

#[tokio::test]
async fn test_open_with_config_and_custom_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("rules.json");
    let save_path = temp_dir.path().join("nested").join("characters.json");
    let catalog_json = r#"{
        "skills": [
            {"name": "Climbing", "attributeModifier": "Strength"},
            {"name": "Lore", "attributeModifier": "Intelligence"}
        ],
        "classes": [{"name": "Scholar", "requirements": {"Intelligence": 12}}]
    }"#;
    tokio::fs::write(&catalog_path, catalog_json).await.unwrap();

    let config = SessionConfig::new(&save_path)
        .with_catalog_path(&catalog_path)
        .with_default_character_name("Newcomer");
    let mut session = EditorSession::open(config).await.expect("open should succeed");

    let active = session.active().unwrap();
    assert_eq!(active.name, "Newcomer");
    assert_eq!(active.skills.len(), 2);

    session.increment_attribute(Attribute::Intelligence).unwrap();
    session.increment_attribute(Attribute::Intelligence).unwrap();
    assert!(session.eligible_classes().unwrap().contains("Scholar"));
    assert_eq!(
        session.class_details("Scholar").unwrap(),
        "Scholar: Intelligence 12"
    );

    session.save().await.unwrap();
    let stored = JsonFileRepository::new(&save_path).load().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].attributes.intelligence, 12);
}

#[tokio::test]
async fn test_open_with_missing_catalog_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = SessionConfig::new(temp_dir.path().join("characters.json"))
        .with_catalog_path(temp_dir.path().join("missing.json"));
    assert!(EditorSession::open(config).await.is_err());
}

// =============================================================================
// TEST 5: Memory repository sees exactly the roster snapshot
// =============================================================================

#[tokio::test]
async fn test_save_sends_full_snapshot() {
    let repo = MemoryRepository::with_characters(sample_party());
    let mut session = EditorSession::start(RulesCatalog::standard(), repo, FixedRolls::always(10)).await;

    session.select(1).unwrap();
    session.adjust_skill("Stealth", -5).unwrap();
    session.remove_character(0).unwrap();
    session.save().await.unwrap();

    let stored = session.repository().stored().await;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].name, "Vex");
    assert_eq!(stored[0].skills.points("Stealth"), 0);
    assert_eq!(stored[1].name, "Pike");
}
