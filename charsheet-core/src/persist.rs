//! Character persistence.
//!
//! The engine talks to storage through [`CharacterRepository`]: `load`
//! returns every stored character and `save` replaces them. Records are the
//! plain character JSON shape, a list of
//! `{ "name", "attributes": {..}, "skills": {..} }` objects.

use crate::character::Character;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage for the character roster.
#[allow(async_fn_in_trait)]
pub trait CharacterRepository {
    /// Every stored character. No stored data loads as an empty list.
    async fn load(&self) -> Result<Vec<Character>, PersistError>;

    /// Replace the stored characters with `characters`.
    async fn save(&self, characters: &[Character]) -> Result<(), PersistError>;
}

/// Characters stored as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CharacterRepository for JsonFileRepository {
    async fn load(&self) -> Result<Vec<Character>, PersistError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no save file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let characters: Vec<Character> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = characters.len(), "read characters");
        Ok(characters)
    }

    async fn save(&self, characters: &[Character]) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(characters)?;
        fs::write(&self.path, content).await?;
        debug!(path = %self.path.display(), count = characters.len(), "wrote characters");
        Ok(())
    }
}

/// In-process storage, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    characters: Mutex<Vec<Character>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository that already holds `characters`.
    pub fn with_characters(characters: Vec<Character>) -> Self {
        Self {
            characters: Mutex::new(characters),
        }
    }

    /// Snapshot of what is currently stored.
    pub async fn stored(&self) -> Vec<Character> {
        self.characters.lock().await.clone()
    }
}

impl CharacterRepository for MemoryRepository {
    async fn load(&self) -> Result<Vec<Character>, PersistError> {
        Ok(self.characters.lock().await.clone())
    }

    async fn save(&self, characters: &[Character]) -> Result<(), PersistError> {
        *self.characters.lock().await = characters.to_vec();
        Ok(())
    }
}
