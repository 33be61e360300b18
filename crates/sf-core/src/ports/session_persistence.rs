use super::errors::PersistenceError;
use crate::session::Session;

/// Keeps the session across reloads.
pub trait SessionPersistencePort: Send + Sync {
    /// Load the stored session, if any.
    fn load(&self) -> Result<Option<Session>, PersistenceError>;

    /// Store the session. Must be idempotent (overwrite if exists).
    fn save(&self, session: &Session) -> Result<(), PersistenceError>;

    fn clear(&self) -> Result<(), PersistenceError>;
}
