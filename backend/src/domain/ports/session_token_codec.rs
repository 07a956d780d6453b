//! Port for issuing and verifying signed session tokens.

use chrono::{DateTime, Utc};

use crate::domain::{SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session token codecs.
    pub enum SessionTokenError {
        /// Token could not be decoded or its signature did not verify.
        Malformed { message: String } => "session token is malformed: {message}",
        /// Signature verified but the expiry is not in the future.
        Expired => "session token has expired",
        /// Token could not be signed.
        Signing { message: String } => "session token signing failed: {message}",
    }
}

/// Signs `{user_id, exp}` claims and verifies them later.
///
/// Verification takes the current instant explicitly so expiry is checked
/// against the caller's clock with zero leeway.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokenCodec: Send + Sync {
    fn issue(
        &self,
        user_id: &UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<SessionToken, SessionTokenError>;

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, SessionTokenError>;
}
