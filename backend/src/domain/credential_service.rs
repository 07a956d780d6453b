//! Credential verifier: registration and login.
//!
//! Implements the [`RegistrationService`] and [`LoginService`] driving ports
//! over the identity store, the password hashing primitive and the session
//! token codec. Hashing runs on blocking threads.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::Clock;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, RegistrationService, SessionTokenCodec,
    SessionTokenError, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, NewAccount, SessionToken, User, UserId};

/// Lifetime of issued session tokens.
pub const SESSION_TTL_HOURS: i64 = 72;

const INVALID_CREDENTIALS: &str = "invalid credentials";
const DUPLICATE_ACCOUNT: &str = "username or email already exists";

/// Registration and login over injected ports.
#[derive(Clone)]
pub struct CredentialService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, H, T> CredentialService<U, H, T> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unreachable");
            Error::service_unavailable("user repository unavailable")
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { .. } => Error::conflict(DUPLICATE_ACCOUNT),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: SessionTokenError) -> Error {
    Error::internal(format!("failed to issue session token: {error}"))
}

impl<U, H, T> CredentialService<U, H, T>
where
    H: PasswordHasher + 'static,
{
    async fn with_hasher<R, F>(&self, op: F) -> Result<R, Error>
    where
        F: FnOnce(&H) -> Result<R, PasswordHasherError> + Send + 'static,
        R: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || op(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hasher_error)
    }
}

#[async_trait]
impl<U, H, T> RegistrationService for CredentialService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: SessionTokenCodec,
{
    async fn register(&self, account: &NewAccount) -> Result<(), Error> {
        let existing = self
            .users
            .find_by_username_or_email(account.username(), account.email())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(Error::conflict(DUPLICATE_ACCOUNT));
        }

        let password = Zeroizing::new(account.password().to_owned());
        let password_hash = self.with_hasher(move |hasher| hasher.hash(&password)).await?;

        let user = User {
            id: UserId::random(),
            username: account.username().clone(),
            email: account.email().clone(),
            password_hash,
            created_at: self.clock.utc(),
        };
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id, username = %user.username, "registered user");
        Ok(())
    }
}

#[async_trait]
impl<U, H, T> LoginService for CredentialService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: SessionTokenCodec,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionToken, Error> {
        let user = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?;

        // Unknown usernames still pay for one verification.
        let stored = user.as_ref().map(|user| user.password_hash.clone());
        let password = Zeroizing::new(credentials.password().to_owned());
        let verified = self
            .with_hasher(move |hasher| {
                let hash = stored.unwrap_or_else(|| hasher.decoy());
                hasher.verify(&password, &hash)
            })
            .await?;

        let user = match user {
            Some(user) if verified => user,
            _ => {
                warn!(username = credentials.username(), "login rejected");
                return Err(Error::unauthorized(INVALID_CREDENTIALS));
            }
        };

        let expires_at = self.clock.utc() + TimeDelta::hours(SESSION_TTL_HOURS);
        let token = self
            .tokens
            .issue(&user.id, expires_at)
            .map_err(map_token_error)?;
        info!(user_id = %user.id, %expires_at, "issued session token");
        Ok(token)
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
