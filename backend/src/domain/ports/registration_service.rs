//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, NewAccount};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account, failing with `Conflict` when the username or email
    /// is already taken.
    async fn register(&self, account: &NewAccount) -> Result<(), Error>;
}
