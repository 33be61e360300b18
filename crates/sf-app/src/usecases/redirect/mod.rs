//! Countdown redirector.
//!
//! Shows a short visible grace period before forcing navigation away from
//! a page the user may not see. The final navigation replaces the current
//! history entry so "back" does not return to the denied page.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, Interval};
use tracing::{info, warn};

use sf_core::config::RedirectSettings;
use sf_core::ports::NavigatorPort;

use super::internal::Liveness;

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct CountdownRedirector {
    navigator: Arc<dyn NavigatorPort>,
    settings: RedirectSettings,
}

impl CountdownRedirector {
    pub fn new(navigator: Arc<dyn NavigatorPort>, settings: RedirectSettings) -> Self {
        Self {
            navigator,
            settings,
        }
    }

    pub fn settings(&self) -> &RedirectSettings {
        &self.settings
    }

    /// Start counting down from the configured number of seconds.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(&self) -> CountdownHandle {
        let (remaining_tx, remaining_rx) = watch::channel(self.settings.seconds);
        let liveness = Liveness::new();
        let ticker = time::interval_at(Instant::now() + TICK, TICK);

        let task = tokio::spawn(run_countdown(
            Arc::clone(&self.navigator),
            self.settings.clone(),
            ticker,
            remaining_tx,
            liveness.clone(),
        ));

        CountdownHandle {
            remaining: remaining_rx,
            liveness,
            task,
        }
    }
}

async fn run_countdown(
    navigator: Arc<dyn NavigatorPort>,
    settings: RedirectSettings,
    mut ticker: Interval,
    remaining_tx: watch::Sender<u32>,
    liveness: Liveness,
) {
    let mut remaining = settings.seconds;
    while remaining > 0 {
        ticker.tick().await;
        remaining -= 1;
        if !liveness.is_alive() {
            return;
        }
        remaining_tx.send_replace(remaining);
    }

    if !liveness.is_alive() {
        return;
    }
    info!(target_path = %settings.target, "countdown finished, redirecting");
    if let Err(err) = navigator.replace(&settings.target) {
        warn!(target_path = %settings.target, error = %err, "redirect failed");
    }
}

/// A running countdown. Dropping it cancels the timer.
pub struct CountdownHandle {
    remaining: watch::Receiver<u32>,
    liveness: Liveness,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    /// Seconds left as currently displayed.
    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.liveness.revoke();
        self.task.abort();
    }
}
