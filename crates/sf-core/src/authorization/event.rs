use crate::session::Session;

/// Inputs that drive the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    /// Fresh mount of the gate with the session observed at that moment.
    Mounted { session: Session },
    /// Identity or credential changed while mounted.
    SessionChanged { session: Session },
    /// Verification call for `generation` resolved successfully.
    VerificationSucceeded { generation: u64 },
    /// Verification call for `generation` failed for any reason.
    VerificationFailed { generation: u64 },
}
