//!
//! Identity verification port.
//!
//! Two logically distinct server checks, "verify current user" and
//! "verify current admin", both answering valid or invalid for a bearer
//! credential.

use async_trait::async_trait;

use super::errors::VerificationError;
use crate::authorization::AccessRole;
use crate::session::Credential;

#[async_trait]
pub trait IdentityVerifierPort: Send + Sync {
    /// `Ok(())` means the credential is currently valid for `role`.
    async fn verify(&self, role: AccessRole, credential: &Credential)
        -> Result<(), VerificationError>;
}
