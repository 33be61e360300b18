use std::fmt;

use serde::{Deserialize, Serialize};

/// Role a gated subtree requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRole {
    /// Any authenticated user.
    User,
    Admin,
}

impl fmt::Display for AccessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessRole::User => f.write_str("user"),
            AccessRole::Admin => f.write_str("admin"),
        }
    }
}

/// Tri-state decision rendered by the gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationDecision {
    #[default]
    Pending,
    Granted,
    Denied,
}

/// Decision plus the generation of the inputs it was computed from.
///
/// Every mount or session change bumps the generation; verification results
/// tagged with an older generation are stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateState {
    pub decision: AuthorizationDecision,
    pub generation: u64,
}

impl GateState {
    pub fn initial() -> Self {
        Self::default()
    }
}
