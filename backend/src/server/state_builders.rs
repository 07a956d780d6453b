//! Wires domain services over the configured store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use backend::domain::ports::{
    ContentRepository, PasswordHasherError, UserRepository, VoteRepository,
};
use backend::domain::{
    ContentGraphService, CredentialService, SessionAuthenticator, VoteLedgerService,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::crypto::BcryptPasswordHasher;
use backend::outbound::memory::InMemoryForumStore;
use backend::outbound::persistence::{
    DieselContentRepository, DieselUserRepository, DieselVoteRepository,
};
use backend::outbound::token::JwtSessionTokens;

use super::ServerConfig;

/// Shared app data built once per process.
#[derive(Clone)]
pub(crate) struct ForumState {
    pub(crate) http: web::Data<HttpState>,
    pub(crate) authenticator: web::Data<SessionAuthenticator>,
}

fn assemble<U, C, V>(
    users: Arc<U>,
    content: Arc<C>,
    votes: Arc<V>,
    hasher: BcryptPasswordHasher,
    tokens: Arc<JwtSessionTokens>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    C: ContentRepository + 'static,
    V: VoteRepository + 'static,
{
    let credentials = Arc::new(CredentialService::new(
        users,
        Arc::new(hasher),
        tokens,
        clock.clone(),
    ));
    let content = Arc::new(ContentGraphService::new(content, clock));
    HttpState::new(HttpStatePorts {
        registration: credentials.clone(),
        login: credentials,
        content: content.clone(),
        content_query: content,
        votes: Arc::new(VoteLedgerService::new(votes)),
    })
}

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-process store.
pub(crate) fn build_forum_state(
    config: &ServerConfig,
) -> Result<ForumState, PasswordHasherError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = Arc::new(JwtSessionTokens::new(config.token_secret.as_bytes()));
    let hasher = BcryptPasswordHasher::new(config.bcrypt_cost)?;

    let http = match &config.db_pool {
        Some(pool) => assemble(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselContentRepository::new(pool.clone())),
            Arc::new(DieselVoteRepository::new(pool.clone())),
            hasher,
            tokens.clone(),
            clock.clone(),
        ),
        None => {
            warn!("no database configured; forum data lives in memory and is lost on restart");
            let store = Arc::new(InMemoryForumStore::new());
            assemble(
                store.clone(),
                store.clone(),
                store,
                hasher,
                tokens.clone(),
                clock.clone(),
            )
        }
    };

    Ok(ForumState {
        http: web::Data::new(http),
        authenticator: web::Data::new(SessionAuthenticator::new(tokens, clock)),
    })
}
