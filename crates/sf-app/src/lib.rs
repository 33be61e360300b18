//! Pet Storefront Application Orchestration Layer
//!
//! This crate contains the client-side use cases layered over the core
//! ports: the bootstrap sequencer, the route authorization gate and the
//! countdown redirector.

pub mod usecases;

pub use usecases::{
    BootstrapHost, BootstrapSequencer, CountdownHandle, CountdownRedirector, GateHandle,
    RouteAuthorizationGate,
};
