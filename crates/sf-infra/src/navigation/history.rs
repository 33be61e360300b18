use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::debug;

use sf_core::ports::{NavigationError, NavigatorPort};
use sf_core::routing::is_local_path;

/// Browser-style history stack.
///
/// `push` adds an entry, `replace` overwrites the top one, `back` pops.
/// The top entry is always the current location and is broadcast on every
/// change.
pub struct HistoryRouter {
    entries: Mutex<Vec<String>>,
    location: watch::Sender<String>,
}

impl HistoryRouter {
    pub fn new(start: &str) -> Result<Self, NavigationError> {
        let start = validate(start)?;
        let (location, _rx) = watch::channel(start.clone());
        Ok(Self {
            entries: Mutex::new(vec![start]),
            location,
        })
    }

    /// Number of entries on the stack, the current one included.
    pub fn depth(&self) -> usize {
        self.lock().len()
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, path: &str) {
        self.location.send_if_modified(|current| {
            if current == path {
                return false;
            }
            *current = path.to_string();
            true
        });
    }
}

fn validate(path: &str) -> Result<String, NavigationError> {
    if is_local_path(path) {
        Ok(path.to_string())
    } else {
        Err(NavigationError::InvalidPath(path.to_string()))
    }
}

impl NavigatorPort for HistoryRouter {
    fn current(&self) -> String {
        self.location.borrow().clone()
    }

    fn push(&self, path: &str) -> Result<(), NavigationError> {
        let path = validate(path)?;
        debug!(%path, "history push");
        let mut entries = self.lock();
        entries.push(path.clone());
        self.publish(&path);
        Ok(())
    }

    fn replace(&self, path: &str) -> Result<(), NavigationError> {
        let path = validate(path)?;
        debug!(%path, "history replace");
        let mut entries = self.lock();
        match entries.last_mut() {
            Some(top) => *top = path.clone(),
            None => entries.push(path.clone()),
        }
        self.publish(&path);
        Ok(())
    }

    fn back(&self) -> Result<(), NavigationError> {
        let mut entries = self.lock();
        if entries.len() < 2 {
            return Err(NavigationError::NoHistory);
        }
        entries.pop();
        if let Some(top) = entries.last() {
            debug!(path = %top, "history back");
            self.publish(top);
        }
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<String> {
        self.location.subscribe()
    }
}
