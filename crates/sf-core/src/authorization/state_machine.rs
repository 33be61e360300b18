use tracing::debug;

use super::action::GateAction;
use super::event::GateEvent;
use super::state::{AuthorizationDecision, GateState};
use crate::session::Session;

/// Pure gate state machine: no side effects, only the next state and the
/// actions the runtime must perform.
pub struct GateStateMachine;

impl GateStateMachine {
    pub fn transition(state: GateState, event: GateEvent) -> (GateState, Vec<GateAction>) {
        match event {
            GateEvent::Mounted { session } | GateEvent::SessionChanged { session } => {
                Self::evaluate(state, &session)
            }
            GateEvent::VerificationSucceeded { generation } => {
                if Self::is_current(&state, generation) {
                    (
                        GateState {
                            decision: AuthorizationDecision::Granted,
                            generation,
                        },
                        vec![GateAction::MountOutlet],
                    )
                } else {
                    debug!(
                        generation,
                        current = state.generation,
                        "ignoring stale verification success"
                    );
                    (state, Vec::new())
                }
            }
            GateEvent::VerificationFailed { generation } => {
                if Self::is_current(&state, generation) {
                    (
                        GateState {
                            decision: AuthorizationDecision::Denied,
                            generation,
                        },
                        vec![GateAction::StartCountdown],
                    )
                } else {
                    debug!(
                        generation,
                        current = state.generation,
                        "ignoring stale verification failure"
                    );
                    (state, Vec::new())
                }
            }
        }
    }

    /// Re-run the whole decision procedure for a new set of inputs.
    fn evaluate(state: GateState, session: &Session) -> (GateState, Vec<GateAction>) {
        let generation = state.generation + 1;

        match session.verifiable_credential() {
            // Nothing to verify: straight to denied, no network call.
            None => {
                let actions = match state.decision {
                    AuthorizationDecision::Granted => {
                        vec![GateAction::UnmountOutlet, GateAction::StartCountdown]
                    }
                    AuthorizationDecision::Pending => vec![GateAction::StartCountdown],
                    // Countdown already running; keep it.
                    AuthorizationDecision::Denied => Vec::new(),
                };
                (
                    GateState {
                        decision: AuthorizationDecision::Denied,
                        generation,
                    },
                    actions,
                )
            }
            Some(credential) => {
                let mut actions = Vec::with_capacity(2);
                match state.decision {
                    AuthorizationDecision::Granted => actions.push(GateAction::UnmountOutlet),
                    AuthorizationDecision::Denied => actions.push(GateAction::StopCountdown),
                    AuthorizationDecision::Pending => {}
                }
                actions.push(GateAction::Verify {
                    credential: credential.clone(),
                    generation,
                });
                (
                    GateState {
                        decision: AuthorizationDecision::Pending,
                        generation,
                    },
                    actions,
                )
            }
        }
    }

    fn is_current(state: &GateState, generation: u64) -> bool {
        state.decision == AuthorizationDecision::Pending && state.generation == generation
    }
}
