//! Route authorization gate.
//!
//! Wraps a protected subtree and decides, per mount, whether to show it.
//! Locally cached identity and credential are necessary but never
//! sufficient: a credential is only trusted after a live server check for
//! the current inputs.

mod view;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use sf_core::authorization::{
    AccessRole, AuthorizationDecision, GateAction, GateEvent, GateState, GateStateMachine,
};
use sf_core::ports::{IdentityVerifierPort, ProtectedOutlet, SessionPort, VerificationError};
use sf_core::session::{Credential, Session};

use super::redirect::CountdownRedirector;
use view::MountedView;

pub struct RouteAuthorizationGate {
    role: AccessRole,
    session: Arc<dyn SessionPort>,
    verifier: Arc<dyn IdentityVerifierPort>,
    redirector: CountdownRedirector,
}

impl RouteAuthorizationGate {
    pub fn new(
        role: AccessRole,
        session: Arc<dyn SessionPort>,
        verifier: Arc<dyn IdentityVerifierPort>,
        redirector: CountdownRedirector,
    ) -> Self {
        Self {
            role,
            session,
            verifier,
            redirector,
        }
    }

    pub fn role(&self) -> AccessRole {
        self.role
    }

    /// Mount the gate around `outlet`.
    ///
    /// The decision starts as `Pending` on every mount. The outlet is only
    /// mounted once verification for the current session succeeds; on
    /// denial a countdown redirector takes over. Dropping the handle
    /// unmounts everything and discards any in-flight verification.
    pub fn mount(&self, outlet: Arc<dyn ProtectedOutlet>) -> GateHandle {
        let mount_id = Uuid::new_v4();
        let (decision_tx, decision_rx) = watch::channel(AuthorizationDecision::Pending);
        let view = Arc::new(MountedView::new(outlet, self.redirector.clone()));

        let span = info_span!("usecase.authorization_gate", %mount_id, role = %self.role);
        let task = tokio::spawn(
            run_gate(
                self.role,
                Arc::clone(&self.verifier),
                self.session.subscribe(),
                decision_tx,
                Arc::clone(&view),
            )
            .instrument(span),
        );

        GateHandle {
            decision: decision_rx,
            view,
            task,
        }
    }
}

enum Verdict {
    Verified,
    Rejected(VerificationError),
    /// Session changed before the call resolved; its result is stale.
    Superseded,
}

async fn run_gate(
    role: AccessRole,
    verifier: Arc<dyn IdentityVerifierPort>,
    mut session_rx: watch::Receiver<Session>,
    decision_tx: watch::Sender<AuthorizationDecision>,
    view: Arc<MountedView>,
) {
    let mut state = GateState::initial();
    let mut event = GateEvent::Mounted {
        session: latest_session(&mut session_rx),
    };

    loop {
        let (next, actions) = GateStateMachine::transition(state, event);
        state = next;
        if !view.is_alive() {
            return;
        }

        let mut verification = None;
        for action in actions {
            match action {
                GateAction::Verify {
                    credential,
                    generation,
                } => verification = Some((credential, generation)),
                GateAction::MountOutlet => view.mount_outlet(),
                GateAction::UnmountOutlet => view.unmount_outlet(),
                GateAction::StartCountdown => view.start_countdown(),
                GateAction::StopCountdown => view.stop_countdown(),
            }
        }

        let decision = state.decision;
        let changed = decision_tx.send_if_modified(|current| {
            let changed = *current != decision;
            *current = decision;
            changed
        });
        if changed {
            info!(?decision, generation = state.generation, "authorization decision");
        }

        event = match verification {
            Some((credential, generation)) => {
                let verdict =
                    verify_or_supersede(role, verifier.as_ref(), &credential, &mut session_rx)
                        .await;
                match verdict {
                    Verdict::Verified => GateEvent::VerificationSucceeded { generation },
                    Verdict::Rejected(err) => {
                        warn!(generation, error = %err, "credential verification failed");
                        GateEvent::VerificationFailed { generation }
                    }
                    Verdict::Superseded => {
                        let session = latest_session(&mut session_rx);
                        GateEvent::SessionChanged { session }
                    }
                }
            }
            None => {
                if session_rx.changed().await.is_err() {
                    debug!("session source closed, holding decision until unmount");
                    std::future::pending::<()>().await;
                }
                let session = latest_session(&mut session_rx);
                GateEvent::SessionChanged { session }
            }
        };
    }
}

fn latest_session(session_rx: &mut watch::Receiver<Session>) -> Session {
    session_rx.borrow_and_update().clone()
}

async fn verify_or_supersede(
    role: AccessRole,
    verifier: &dyn IdentityVerifierPort,
    credential: &Credential,
    session_rx: &mut watch::Receiver<Session>,
) -> Verdict {
    let mut verification = verifier.verify(role, credential);
    let mut session_open = true;

    loop {
        tokio::select! {
            result = &mut verification => {
                return match result {
                    Ok(()) => Verdict::Verified,
                    Err(err) => Verdict::Rejected(err),
                };
            }
            changed = session_rx.changed(), if session_open => match changed {
                Ok(()) => return Verdict::Superseded,
                Err(_) => session_open = false,
            },
        }
    }
}

/// One mount of a gate.
pub struct GateHandle {
    decision: watch::Receiver<AuthorizationDecision>,
    view: Arc<MountedView>,
    task: JoinHandle<()>,
}

impl GateHandle {
    pub fn decision(&self) -> AuthorizationDecision {
        *self.decision.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthorizationDecision> {
        self.decision.clone()
    }

    /// Wait until the decision leaves `Pending`.
    pub async fn settled(&mut self) -> AuthorizationDecision {
        let settled = self
            .decision
            .wait_for(|decision| *decision != AuthorizationDecision::Pending)
            .await
            .map(|decision| *decision);
        settled.unwrap_or_else(|_| *self.decision.borrow())
    }

    /// Seconds left before the redirect while denied.
    pub fn countdown_remaining(&self) -> Option<u32> {
        self.view.countdown_remaining()
    }

    pub fn subscribe_countdown(&self) -> Option<watch::Receiver<u32>> {
        self.view.subscribe_countdown()
    }

    pub fn is_outlet_mounted(&self) -> bool {
        self.view.is_outlet_mounted()
    }

    pub fn unmount(self) {}
}

impl Drop for GateHandle {
    fn drop(&mut self) {
        self.view.teardown();
        self.task.abort();
    }
}
