use tokio::sync::watch;

use crate::session::{Credential, Session, User};

/// Reactive session slice of the store.
///
/// The gate only reads through `current` and `subscribe`; the mutators are
/// for the login and logout flows.
pub trait SessionPort: Send + Sync {
    fn current(&self) -> Session;

    /// Receiver that is notified whenever identity or credential changes.
    fn subscribe(&self) -> watch::Receiver<Session>;

    fn sign_in(&self, identity: User, credential: Credential);

    fn logout(&self);
}
