use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use sf_core::ports::{PersistenceError, SessionPersistencePort};
use sf_core::session::Session;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SavedSession {
    version: u32,
    saved_at: DateTime<Utc>,
    session: Session,
}

/// Stores the session as a small JSON document.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// crash mid-write leaves either the old or the new document.
pub struct JsonSessionFile {
    path: PathBuf,
}

impl JsonSessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn atomic_write(&self, content: &str) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl SessionPersistencePort for JsonSessionFile {
    fn load(&self) -> Result<Option<Session>, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let saved: SavedSession = serde_json::from_str(&content)
            .map_err(|e| PersistenceError::Corrupt(format!("{}: {e}", self.path.display())))?;
        if saved.version != FORMAT_VERSION {
            return Err(PersistenceError::Corrupt(format!(
                "unsupported session format version {}",
                saved.version
            )));
        }

        debug!(path = %self.path.display(), saved_at = %saved.saved_at, "session restored");
        Ok(Some(saved.session))
    }

    fn save(&self, session: &Session) -> Result<(), PersistenceError> {
        let saved = SavedSession {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            session: session.clone(),
        };
        let content = serde_json::to_string_pretty(&saved)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
        self.atomic_write(&content)
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
