//! TOML-based ResearchSessionRepository implementation

use crate::atomic_toml::AtomicTomlFile;
use async_trait::async_trait;
use atrium_core::error::{AtriumError, Result};
use atrium_core::research::{ResearchSession, ResearchSessionRepository};
use std::fs;
use std::path::{Path, PathBuf};

/// A repository implementation for storing research sessions in TOML files.
///
/// Stores one file per session:
/// ```text
/// base_dir/
/// └── research/
///     ├── session-id-1.toml
///     └── session-id-2.toml
/// ```
///
/// Sessions are retained indefinitely; `list_for_owner` scans the
/// directory, filters by owner, and sorts by `created_at` descending.
pub struct TomlResearchSessionRepository {
    base_dir: PathBuf,
}

impl TomlResearchSessionRepository {
    /// Creates a new repository rooted at the specified base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory structure cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let sessions_dir = base_dir.join("research");
        fs::create_dir_all(&sessions_dir).map_err(|e| {
            AtriumError::io(format!(
                "Failed to create research sessions directory: {}",
                e
            ))
        })?;

        Ok(Self { base_dir })
    }

    /// Creates a repository at the default location (~/.atrium).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or if
    /// the directory structure cannot be created.
    pub fn default_location() -> Result<Self> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| AtriumError::io("Failed to get home directory"))?;
        Self::new(home_dir.join(".atrium"))
    }

    /// Returns the file path for a given session ID.
    fn session_file_path(&self, session_id: &str) -> PathBuf {
        self.base_dir
            .join("research")
            .join(format!("{}.toml", session_id))
    }

    fn load_session_from_path(&self, path: &Path) -> Result<ResearchSession> {
        let content = fs::read_to_string(path)
            .map_err(|e| AtriumError::io(format!("Failed to read session file {:?}: {}", path, e)))?;
        let session: ResearchSession = toml::from_str(&content)?;
        Ok(session)
    }
}

#[async_trait]
impl ResearchSessionRepository for TomlResearchSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<ResearchSession>> {
        let file_path = self.session_file_path(session_id);

        if !file_path.exists() {
            return Ok(None);
        }

        self.load_session_from_path(&file_path).map(Some)
    }

    async fn save(&self, session: &ResearchSession) -> Result<()> {
        let file = AtomicTomlFile::new(self.session_file_path(&session.id));
        file.save(session)
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        let file_path = self.session_file_path(session_id);

        if file_path.exists() {
            fs::remove_file(&file_path).map_err(|e| {
                AtriumError::io(format!(
                    "Failed to delete session file {:?}: {}",
                    file_path, e
                ))
            })?;
        }

        Ok(())
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ResearchSession>> {
        let sessions_dir = self.base_dir.join("research");
        let mut sessions = Vec::new();

        for entry in fs::read_dir(&sessions_dir)
            .map_err(|e| AtriumError::io(format!("Failed to read research directory: {}", e)))?
        {
            let entry =
                entry.map_err(|e| AtriumError::io(format!("Failed to read directory entry: {}", e)))?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }

            match self.load_session_from_path(&path) {
                Ok(session) => {
                    if session.owner_id == owner_id {
                        sessions.push(session);
                    }
                }
                Err(e) => {
                    // A single unreadable file should not hide the rest of
                    // the history.
                    tracing::warn!(
                        target: "research_store",
                        "Skipping unreadable session file {:?}: {}",
                        path,
                        e
                    );
                }
            }
        }

        // Sort by created_at descending (most recent first)
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(sessions)
    }
}
