//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange credentials for a session token without knowing (or importing)
//! the backing infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SessionToken};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a signed session token.
    ///
    /// Unknown usernames and wrong passwords fail with the same
    /// `Unauthorized` error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionToken, Error>;
}
