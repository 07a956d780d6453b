//! Port abstraction for the identity store and its errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique username or email is already taken.
        Duplicate { field: String } => "user {field} already exists",
    }
}

/// Identity store holding registered accounts.
///
/// Adapters must enforce username and email uniqueness themselves so two
/// racing registrations cannot both succeed; the losing insert reports
/// [`UserPersistenceError::Duplicate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user record.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user whose username or email matches, in one lookup.
    async fn find_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError>;
}
