//! Environment-driven server configuration.
//!
//! Three values reach the core from the environment: the listen port, the
//! database connection string, and the admin secret. Release builds refuse
//! to start without a secret; debug builds may generate a throwaway one so
//! local runs need no setup.

use std::env;
use std::net::SocketAddr;

use tracing::warn;

use crate::domain::AdminSecret;

const DEFAULT_PORT: u16 = 8080;

/// Configuration failures that abort startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `DATABASE_URL` is not set.
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    /// `PORT` is set but not a valid port number.
    #[error("PORT is not a valid port number: {value}")]
    InvalidPort {
        /// The rejected value.
        value: String,
    },
    /// `ADMIN_SECRET` is not set in a release build.
    #[error("ADMIN_SECRET must be set (or ADMIN_ALLOW_EPHEMERAL=1 for throwaway secrets)")]
    MissingAdminSecret,
    /// `ADMIN_SECRET` is set but blank.
    #[error("ADMIN_SECRET must not be blank")]
    BlankAdminSecret,
}

/// Typed startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
    database_url: String,
    admin_secret: AdminSecret,
}

impl ServerConfig {
    /// Assemble a configuration from explicit values.
    pub fn new(bind_addr: SocketAddr, database_url: impl Into<String>, admin_secret: AdminSecret) -> Self {
        Self {
            bind_addr,
            database_url: database_url.into(),
            admin_secret,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] naming the offending variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            Err(_) => DEFAULT_PORT,
        };
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
        let admin_secret = admin_secret_from_env()?;
        Ok(Self::new(
            SocketAddr::from(([0, 0, 0, 0], port)),
            database_url,
            admin_secret,
        ))
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// PostgreSQL connection string.
    pub fn database_url(&self) -> &str {
        self.database_url.as_str()
    }

    /// Secret gating the admin endpoints.
    pub fn admin_secret(&self) -> &AdminSecret {
        &self.admin_secret
    }
}

fn admin_secret_from_env() -> Result<AdminSecret, ConfigError> {
    match env::var("ADMIN_SECRET") {
        Ok(raw) => AdminSecret::new(raw).map_err(|_| ConfigError::BlankAdminSecret),
        Err(_) => {
            let allow_dev = env::var("ADMIN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!("ADMIN_SECRET not set; using a throwaway secret (dev only)");
                Ok(AdminSecret::generate())
            } else {
                Err(ConfigError::MissingAdminSecret)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use env_lock::lock_env;
    use rstest::rstest;

    #[rstest]
    fn reads_a_complete_environment() {
        let _guard = lock_env([
            ("PORT", Some("9100")),
            ("DATABASE_URL", Some("postgres://localhost/feedback")),
            ("ADMIN_SECRET", Some("letmein")),
            ("ADMIN_ALLOW_EPHEMERAL", None),
        ]);

        let config = ServerConfig::from_env().expect("config should load");
        assert_eq!(config.bind_addr().port(), 9100);
        assert_eq!(config.database_url(), "postgres://localhost/feedback");
        assert!(config.admin_secret().matches("letmein"));
    }

    #[rstest]
    fn port_defaults_when_unset() {
        let _guard = lock_env([
            ("PORT", None),
            ("DATABASE_URL", Some("postgres://localhost/feedback")),
            ("ADMIN_SECRET", Some("letmein")),
        ]);

        let config = ServerConfig::from_env().expect("config should load");
        assert_eq!(config.bind_addr().port(), DEFAULT_PORT);
    }

    #[rstest]
    fn rejects_a_malformed_port() {
        let _guard = lock_env([
            ("PORT", Some("eighty")),
            ("DATABASE_URL", Some("postgres://localhost/feedback")),
            ("ADMIN_SECRET", Some("letmein")),
        ]);

        assert_eq!(
            ServerConfig::from_env(),
            Err(ConfigError::InvalidPort {
                value: "eighty".to_owned()
            })
        );
    }

    #[rstest]
    fn requires_a_database_url() {
        let _guard = lock_env([
            ("PORT", None),
            ("DATABASE_URL", None),
            ("ADMIN_SECRET", Some("letmein")),
        ]);

        assert_eq!(
            ServerConfig::from_env(),
            Err(ConfigError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn rejects_a_blank_admin_secret() {
        let _guard = lock_env([
            ("PORT", None),
            ("DATABASE_URL", Some("postgres://localhost/feedback")),
            ("ADMIN_SECRET", Some("   ")),
        ]);

        assert_eq!(
            ServerConfig::from_env(),
            Err(ConfigError::BlankAdminSecret)
        );
    }
}
