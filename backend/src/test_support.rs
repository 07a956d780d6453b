//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests or
//! with the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test::TestRequest;
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;

use crate::Trace;
use crate::domain::ports::{LoginService, RegistrationService};
use crate::domain::{
    ContentGraphService, CredentialService, Error, LoginCredentials, NewAccount,
    SessionAuthenticator, VoteLedgerService,
};
use crate::inbound::http::configure;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::crypto::{BCRYPT_MIN_COST, BcryptPasswordHasher};
use crate::outbound::memory::InMemoryForumStore;
use crate::outbound::token::JwtSessionTokens;

/// Manually advanced clock.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    pub fn advance_hours(&self, hours: i64) {
        *self.lock_clock() += TimeDelta::hours(hours);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed instant used by deterministic tests.
pub fn fixture_timestamp() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 2, 24, 10, 30, 0).single() {
        Some(timestamp) => timestamp,
        None => panic!("valid fixture timestamp"),
    }
}

/// Clock pinned to [`fixture_timestamp`].
pub fn fixture_clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(fixture_timestamp()))
}

/// Secret long enough for release-mode validation.
pub const TEST_TOKEN_SECRET: &[u8] = b"forum-test-secret-forum-test-secret-0123";

/// Bcrypt hasher at the minimum work factor so tests stay fast.
pub fn fast_password_hasher() -> BcryptPasswordHasher {
    match BcryptPasswordHasher::new(BCRYPT_MIN_COST) {
        Ok(hasher) => hasher,
        Err(error) => panic!("bcrypt hasher at minimum cost: {error}"),
    }
}

/// In-process forum wired exactly like the server, for handler and
/// behaviour tests.
///
/// Services run over an [`InMemoryForumStore`] and a [`MutableClock`] so
/// tests can inspect state and move time.
pub struct TestForum {
    pub store: Arc<InMemoryForumStore>,
    pub clock: Arc<MutableClock>,
    credentials: Arc<
        CredentialService<InMemoryForumStore, BcryptPasswordHasher, JwtSessionTokens>,
    >,
    state: web::Data<HttpState>,
    authenticator: web::Data<SessionAuthenticator>,
    health: web::Data<HealthState>,
}

impl Default for TestForum {
    fn default() -> Self {
        Self::new()
    }
}

impl TestForum {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryForumStore::new());
        let clock = fixture_clock();
        let tokens = Arc::new(JwtSessionTokens::new(TEST_TOKEN_SECRET));
        let credentials = Arc::new(CredentialService::new(
            store.clone(),
            Arc::new(fast_password_hasher()),
            tokens.clone(),
            clock.clone(),
        ));
        let content = Arc::new(ContentGraphService::new(store.clone(), clock.clone()));
        let state = HttpState::new(HttpStatePorts {
            registration: credentials.clone(),
            login: credentials.clone(),
            content: content.clone(),
            content_query: content,
            votes: Arc::new(VoteLedgerService::new(store.clone())),
        });
        let health = HealthState::new();
        health.mark_ready();
        Self {
            authenticator: web::Data::new(SessionAuthenticator::new(tokens, clock.clone())),
            store,
            clock,
            credentials,
            state: web::Data::new(state),
            health: web::Data::new(health),
        }
    }

    /// Application with the production routes and middleware.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .wrap(Trace)
            .app_data(self.state.clone())
            .app_data(self.authenticator.clone())
            .app_data(self.health.clone())
            .configure(configure)
    }

    /// Register `username` with email `<username>@example.com` and password
    /// [`TEST_PASSWORD`].
    pub async fn register(&self, username: &str) -> Result<(), Error> {
        let account = NewAccount::try_from_parts(
            username,
            &format!("{username}@example.com"),
            TEST_PASSWORD,
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.credentials.register(&account).await
    }

    /// Log `username` in with [`TEST_PASSWORD`] and return the bearer token.
    pub async fn token_for(&self, username: &str) -> Result<String, Error> {
        let credentials = LoginCredentials::try_from_parts(username, TEST_PASSWORD)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let token = self.credentials.login(&credentials).await?;
        Ok(token.into_inner())
    }
}

/// Password used by [`TestForum::register`].
pub const TEST_PASSWORD: &str = "hunter2";

/// `Authorization` header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// JSON request with an optional bearer token.
pub fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> TestRequest {
    let mut req = TestRequest::default()
        .method(method)
        .uri(uri)
        .set_json(body);
    if let Some(token) = token {
        req = req.insert_header((AUTHORIZATION, bearer(token)));
    }
    req
}
