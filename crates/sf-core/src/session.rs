//! Session domain model.
//!
//! A session is the locally cached identity plus the bearer credential that
//! proves it to the server. Either half may be missing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimal locally cached user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }
}

/// Opaque bearer token.
///
/// `Debug` and `Display` never print the token itself.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identity and credential as held by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub identity: Option<User>,
    #[serde(default)]
    pub credential: Option<Credential>,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn signed_in(identity: User, credential: Credential) -> Self {
        Self {
            identity: Some(identity),
            credential: Some(credential),
        }
    }

    /// Both halves present, i.e. there is something to verify. A blank
    /// token counts as absent.
    pub fn verifiable_credential(&self) -> Option<&Credential> {
        match (&self.identity, &self.credential) {
            (Some(_), Some(credential)) if !credential.as_str().trim().is_empty() => {
                Some(credential)
            }
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.identity.is_none() && self.credential.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("secret-token");
        assert_eq!(format!("{:?}", credential), "Credential(***)");
        assert_eq!(credential.to_string(), "***");
        assert_eq!(credential.bearer(), "Bearer secret-token");
    }

    #[test]
    fn verifiable_credential_requires_both_halves() {
        let only_token = Session {
            identity: None,
            credential: Some(Credential::new("t")),
        };
        assert!(only_token.verifiable_credential().is_none());

        let only_identity = Session {
            identity: Some(User::new("a@b.c")),
            credential: None,
        };
        assert!(only_identity.verifiable_credential().is_none());

        let full = Session::signed_in(User::new("a@b.c"), Credential::new("t"));
        assert_eq!(full.verifiable_credential().map(|c| c.as_str()), Some("t"));

        let blank = Session::signed_in(User::new("a@b.c"), Credential::new("  "));
        assert!(blank.verifiable_credential().is_none());
    }

    #[test]
    fn session_round_trips_token_as_plain_string() {
        let session = Session::signed_in(User::new("cat@pets.io"), Credential::new("abc"));
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["credential"], "abc");
        assert_eq!(json["identity"]["email"], "cat@pets.io");
    }
}
