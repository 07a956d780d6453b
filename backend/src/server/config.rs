//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::inbound::http::token_config::TokenSecret;
use backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: TokenSecret,
    pub(crate) bcrypt_cost: u32,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: TokenSecret, bcrypt_cost: u32) -> Self {
        Self {
            bind_addr,
            token_secret,
            bcrypt_cost,
            db_pool: None,
        }
    }

    /// Use PostgreSQL instead of the in-process store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
