//! HS256 JSON Web Token codec for session credentials.
//!
//! Tokens carry `{user_id, exp}`. Expiry is checked against the caller's
//! clock with zero leeway rather than the library's wall clock, so tests can
//! move time explicitly.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{SessionTokenCodec, SessionTokenError};
use crate::domain::{SessionToken, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: String,
    exp: i64,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct JwtSessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtSessionTokens {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl fmt::Debug for JwtSessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSessionTokens").finish_non_exhaustive()
    }
}

impl SessionTokenCodec for JwtSessionTokens {
    fn issue(
        &self,
        user_id: &UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<SessionToken, SessionTokenError> {
        let claims = Claims {
            user_id: user_id.to_string(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(SessionToken::new)
            .map_err(|err| SessionTokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, SessionTokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| SessionTokenError::malformed(err.to_string()))?;
        if data.claims.exp <= now.timestamp() {
            return Err(SessionTokenError::expired());
        }
        UserId::new(&data.claims.user_id)
            .map_err(|err| SessionTokenError::malformed(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for token issue and verification.
    use super::*;
    use chrono::TimeDelta;
    use rstest::{fixture, rstest};

    use crate::test_support::{TEST_TOKEN_SECRET, fixture_timestamp};

    #[fixture]
    fn codec() -> JwtSessionTokens {
        JwtSessionTokens::new(TEST_TOKEN_SECRET)
    }

    fn issue_for(codec: &JwtSessionTokens, user: &UserId, ttl: TimeDelta) -> SessionToken {
        codec
            .issue(user, fixture_timestamp() + ttl)
            .expect("token issues")
    }

    #[rstest]
    fn issued_tokens_resolve_to_their_user(codec: JwtSessionTokens) {
        let user = UserId::random();
        let token = issue_for(&codec, &user, TimeDelta::hours(72));
        let resolved = codec
            .verify(token.as_str(), fixture_timestamp())
            .expect("token verifies");
        assert_eq!(resolved, user);
    }

    #[rstest]
    #[case(TimeDelta::seconds(0))]
    #[case(TimeDelta::seconds(1))]
    fn tokens_expire_without_leeway(codec: JwtSessionTokens, #[case] past_expiry: TimeDelta) {
        let token = issue_for(&codec, &UserId::random(), TimeDelta::hours(1));
        let now = fixture_timestamp() + TimeDelta::hours(1) + past_expiry;
        assert_eq!(
            codec.verify(token.as_str(), now),
            Err(SessionTokenError::expired())
        );
    }

    #[rstest]
    fn tokens_from_another_secret_are_malformed(codec: JwtSessionTokens) {
        let other = JwtSessionTokens::new(b"another-secret-of-at-least-32-bytes!!");
        let token = issue_for(&other, &UserId::random(), TimeDelta::hours(1));
        let err = codec
            .verify(token.as_str(), fixture_timestamp())
            .expect_err("wrong key");
        assert!(matches!(err, SessionTokenError::Malformed { .. }));
    }

    #[rstest]
    fn tampered_payloads_are_malformed(codec: JwtSessionTokens) {
        let token = issue_for(&codec, &UserId::random(), TimeDelta::hours(1));
        let mut parts: Vec<String> = token.as_str().split('.').map(str::to_owned).collect();
        parts[1] = format!("{}A", parts[1]);
        let err = codec
            .verify(&parts.join("."), fixture_timestamp())
            .expect_err("tampered");
        assert!(matches!(err, SessionTokenError::Malformed { .. }));
    }

    #[rstest]
    #[case("not-a-token")]
    #[case("")]
    fn garbage_is_malformed(codec: JwtSessionTokens, #[case] token: &str) {
        let err = codec
            .verify(token, fixture_timestamp())
            .expect_err("garbage");
        assert!(matches!(err, SessionTokenError::Malformed { .. }));
    }

    #[rstest]
    fn non_uuid_subjects_are_malformed(codec: JwtSessionTokens) {
        let claims = Claims {
            user_id: "alice".to_owned(),
            exp: (fixture_timestamp() + TimeDelta::hours(1)).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &codec.encoding)
            .expect("encode");
        let err = codec
            .verify(&token, fixture_timestamp())
            .expect_err("bad subject");
        assert!(matches!(err, SessionTokenError::Malformed { .. }));
    }
}
