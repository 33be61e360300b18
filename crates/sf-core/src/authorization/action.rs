use crate::session::Credential;

/// Side-effects requested by a gate transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    /// Ask the server whether the credential is still valid for the gate's role.
    Verify {
        credential: Credential,
        generation: u64,
    },
    /// Mount the protected subtree.
    MountOutlet,
    /// Unmount the protected subtree.
    UnmountOutlet,
    /// Show the access denied countdown.
    StartCountdown,
    /// Tear the countdown down.
    StopCountdown,
}
