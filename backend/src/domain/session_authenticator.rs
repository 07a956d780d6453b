//! Bearer credential validation.
//!
//! The authenticator is pure: it decodes and checks the presented token
//! against the codec and the clock, and never touches the store.

use std::sync::Arc;

use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{SessionTokenCodec, SessionTokenError};
use crate::domain::{AuthenticatedUser, Error, SessionRejection};

const BEARER_PREFIX: &str = "Bearer ";

impl From<SessionRejection> for Error {
    fn from(rejection: SessionRejection) -> Self {
        Self::unauthorized(rejection.to_string())
    }
}

/// Resolves an `Authorization` header value to the caller identity.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::domain::{SessionAuthenticator, SessionRejection};
/// use backend::outbound::token::JwtSessionTokens;
///
/// let tokens = Arc::new(JwtSessionTokens::new(b"0123456789abcdef0123456789abcdef"));
/// let authenticator = SessionAuthenticator::new(tokens, Arc::new(mockable::DefaultClock));
/// assert_eq!(authenticator.authenticate(None), Err(SessionRejection::Missing));
/// ```
#[derive(Clone)]
pub struct SessionAuthenticator {
    tokens: Arc<dyn SessionTokenCodec>,
    clock: Arc<dyn Clock>,
}

impl SessionAuthenticator {
    pub fn new(tokens: Arc<dyn SessionTokenCodec>, clock: Arc<dyn Clock>) -> Self {
        Self { tokens, clock }
    }

    /// Classify the header as missing, malformed, expired or valid.
    pub fn authenticate(&self, header: Option<&str>) -> Result<AuthenticatedUser, SessionRejection> {
        let Some(header) = header else {
            return Err(SessionRejection::Missing);
        };
        if header.len() <= BEARER_PREFIX.len() {
            return Err(SessionRejection::Missing);
        }

        let scheme_matches = header
            .get(..BEARER_PREFIX.len())
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX));
        let token = match header.get(BEARER_PREFIX.len()..) {
            Some(token) if scheme_matches => token.trim(),
            _ => return Err(SessionRejection::Malformed),
        };
        if token.is_empty() {
            return Err(SessionRejection::Missing);
        }

        match self.tokens.verify(token, self.clock.utc()) {
            Ok(user_id) => Ok(AuthenticatedUser::new(user_id)),
            Err(SessionTokenError::Expired) => Err(SessionRejection::Expired),
            Err(error) => {
                debug!(%error, "rejected bearer token");
                Err(SessionRejection::Malformed)
            }
        }
    }
}
