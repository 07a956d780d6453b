//! Server settings loaded via OrthoConfig.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::outbound::persistence::DEFAULT_CONNECTION_TIMEOUT;

const DEFAULT_PORT: u16 = 8080;

/// Process-level settings, read from `FORUM_*` variables, config files and
/// CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FORUM")]
pub struct ServerSettings {
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL. Without one the in-process store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Bound on waiting for a pooled connection.
    pub connection_timeout_secs: Option<u64>,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout_secs
            .map_or(DEFAULT_CONNECTION_TIMEOUT, Duration::from_secs)
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "FORUM_BIND_ADDR",
        "FORUM_DATABASE_URL",
        "FORUM_POOL_MAX_SIZE",
        "FORUM_CONNECTION_TIMEOUT_SECS",
        "FORUM_BCRYPT_COST",
    ];

    fn load() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("backend")]).expect("settings load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert!(settings.database_url.is_none());
        assert_eq!(settings.pool_max_size, 10);
        assert_eq!(settings.connection_timeout(), Duration::from_secs(10));
        assert_eq!(settings.bcrypt_cost(), bcrypt::DEFAULT_COST);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("FORUM_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "FORUM_DATABASE_URL",
                Some("postgres://forum@localhost/forum".to_owned()),
            ),
            ("FORUM_POOL_MAX_SIZE", Some("4".to_owned())),
            ("FORUM_CONNECTION_TIMEOUT_SECS", Some("3".to_owned())),
            ("FORUM_BCRYPT_COST", Some("6".to_owned())),
        ]);

        let settings = load();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9000".parse().expect("addr"));
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://forum@localhost/forum")
        );
        assert_eq!(settings.pool_max_size, 4);
        assert_eq!(settings.connection_timeout(), Duration::from_secs(3));
        assert_eq!(settings.bcrypt_cost(), 6);
    }
}
