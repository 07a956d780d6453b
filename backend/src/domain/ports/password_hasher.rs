//! Port wrapping the one-way password hashing primitive.
//!
//! Hashing is CPU bound; callers move invocations onto blocking threads.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hasher adapters.
    pub enum PasswordHasherError {
        /// The primitive failed to derive or parse a credential.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a one-way credential from a plaintext password.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Check a plaintext password against a stored credential.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;

    /// Credential that matches no real password.
    ///
    /// Login verifies against it when the username is unknown so both failure
    /// paths spend comparable time.
    fn decoy(&self) -> PasswordHash;
}
