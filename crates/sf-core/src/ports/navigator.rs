use tokio::sync::watch;

use super::errors::NavigationError;

/// Router as seen by the gate and the redirector.
pub trait NavigatorPort: Send + Sync {
    fn current(&self) -> String;

    fn push(&self, path: &str) -> Result<(), NavigationError>;

    /// Overwrite the current history entry instead of adding one.
    fn replace(&self, path: &str) -> Result<(), NavigationError>;

    fn back(&self) -> Result<(), NavigationError>;

    /// Receiver of the current location.
    fn subscribe(&self) -> watch::Receiver<String>;
}
