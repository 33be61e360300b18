//! Route authorization decision model.
//!
//! The gate runtime lives in `sf-app`; this module holds the pure parts:
//! decision states, events, actions and the transition function.

pub mod action;
pub mod event;
pub mod state;
pub mod state_machine;

pub use action::GateAction;
pub use event::GateEvent;
pub use state::{AccessRole, AuthorizationDecision, GateState};
pub use state_machine::GateStateMachine;
