//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O. The
//! [`crate::domain::SessionAuthenticator`] is registered separately so the
//! [`super::auth::SessionUser`] extractor can run without the full bundle.

use std::sync::Arc;

use crate::domain::ports::{
    ContentCommand, ContentQuery, LoginService, RegistrationService, VoteCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub content: Arc<dyn ContentCommand>,
    pub content_query: Arc<dyn ContentQuery>,
    pub votes: Arc<dyn VoteCommand>,
}

/// Parameter object naming every port the handlers need.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub content: Arc<dyn ContentCommand>,
    pub content_query: Arc<dyn ContentQuery>,
    pub votes: Arc<dyn VoteCommand>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{ContentGraphService, CredentialService, VoteLedgerService};
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::outbound::crypto::{BCRYPT_MIN_COST, BcryptPasswordHasher};
    /// use backend::outbound::memory::InMemoryForumStore;
    /// use backend::outbound::token::JwtSessionTokens;
    ///
    /// let store = Arc::new(InMemoryForumStore::new());
    /// let clock = Arc::new(mockable::DefaultClock);
    /// let credentials = Arc::new(CredentialService::new(
    ///     store.clone(),
    ///     Arc::new(BcryptPasswordHasher::new(BCRYPT_MIN_COST).unwrap()),
    ///     Arc::new(JwtSessionTokens::new(b"0123456789abcdef0123456789abcdef")),
    ///     clock.clone(),
    /// ));
    /// let content = Arc::new(ContentGraphService::new(store.clone(), clock));
    /// let state = HttpState::new(HttpStatePorts {
    ///     registration: credentials.clone(),
    ///     login: credentials,
    ///     content: content.clone(),
    ///     content_query: content,
    ///     votes: Arc::new(VoteLedgerService::new(store)),
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            registration,
            login,
            content,
            content_query,
            votes,
        } = ports;
        Self {
            registration,
            login,
            content,
            content_query,
            votes,
        }
    }
}
