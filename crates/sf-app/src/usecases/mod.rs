//! Business logic use cases
//!
//! [app mount]
//!       ↓
//! BootstrapSequencer       → booted flag gates first paint
//!       ↓
//! [navigation into a protected route]
//!       ↓
//! RouteAuthorizationGate   → pending / granted / denied per mount
//!       ↓ denied
//! CountdownRedirector      → visible countdown, then history replace

pub mod authorization;
pub mod bootstrap;
pub mod internal;
pub mod redirect;

pub use authorization::{GateHandle, RouteAuthorizationGate};
pub use bootstrap::{BootstrapHost, BootstrapSequencer};
pub use internal::{settle_all, Liveness, Settled};
pub use redirect::{CountdownHandle, CountdownRedirector};
