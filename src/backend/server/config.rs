/**
 * Server Configuration
 *
 * This module loads and validates the server configuration from
 * environment variables (after `.env` has been loaded by the binary).
 *
 * # Variables
 *
 * | Variable | Required | Default |
 * |---|---|---|
 * | `PORT` | no | `8000` |
 * | `DATABASE_URL` | no | in-memory store |
 * | `JWT_SECRET_KEY` | yes | |
 * | `FIREBASE_PROJECT_ID` | yes | |
 * | `FIREBASE_JWKS_URL` | no | Google's secure-token keys |
 * | `PUSHER_APP_ID`, `PUSHER_KEY`, `PUSHER_SECRET` | all or none | in-process sink only |
 * | `PUSHER_CLUSTER` | no | `us2` |
 * | `PUSHER_HOST` | no | derived from the cluster |
 *
 * # Error Handling
 *
 * Unlike optional services, missing required values stop startup: the
 * server can't issue or check sessions without them.
 */

use thiserror::Error;

use crate::backend::realtime::PusherConfig;

/// Port used when `PORT` is unset
pub const DEFAULT_PORT: u16 = 8000;

/// Pusher cluster used when `PUSHER_CLUSTER` is unset
pub const DEFAULT_PUSHER_CLUSTER: &str = "us2";

const PUSHER_CREDENTIALS: [&str; 3] = ["PUSHER_APP_ID", "PUSHER_KEY", "PUSHER_SECRET"];

/// Configuration loading errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("Missing configuration value {0}")]
    MissingValue(&'static str),

    /// A variable is set but can't be used
    #[error("Invalid configuration value {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Fully validated server configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// HS256 secret for session tokens
    pub session_secret: String,
    pub firebase_project_id: String,
    /// Override for the identity provider's JWK endpoint
    pub firebase_jwks_url: Option<String>,
    /// Hosted pub/sub credentials; `None` disables the hosted sink
    pub pusher: Option<PusherConfig>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| ".."))
            .field("firebase_project_id", &self.firebase_project_id)
            .field("firebase_jwks_url", &self.firebase_jwks_url)
            .field("pusher", &self.pusher.as_ref().map(|p| &p.app_id))
            .finish_non_exhaustive()
    }
}

impl ServerConfig {
    /// Start building a configuration by hand
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use chatrelay::backend::server::config::ServerConfig;
    ///
    /// let config = ServerConfig::from_env().expect("configuration");
    /// println!("listening on {}", config.port);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let pusher = {
            let credentials = PUSHER_CREDENTIALS.map(|name| var(name));
            match credentials {
                [Some(app_id), Some(key), Some(secret)] => Some(PusherConfig {
                    app_id,
                    key,
                    secret,
                    cluster: var("PUSHER_CLUSTER")
                        .unwrap_or_else(|| DEFAULT_PUSHER_CLUSTER.to_string()),
                    host: var("PUSHER_HOST"),
                }),
                [None, None, None] => None,
                partial => {
                    let missing = PUSHER_CREDENTIALS
                        .iter()
                        .zip(partial.iter())
                        .find(|(_, value)| value.is_none())
                        .map(|(name, _)| *name)
                        .unwrap_or(PUSHER_CREDENTIALS[0]);
                    return Err(ConfigError::MissingValue(missing));
                }
            }
        };

        let mut builder = Self::builder().port(port);
        if let Some(url) = var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = var("JWT_SECRET_KEY") {
            builder = builder.session_secret(secret);
        }
        if let Some(project_id) = var("FIREBASE_PROJECT_ID") {
            builder = builder.firebase_project_id(project_id);
        }
        if let Some(url) = var("FIREBASE_JWKS_URL") {
            builder = builder.firebase_jwks_url(url);
        }
        if let Some(pusher) = pusher {
            builder = builder.pusher(pusher);
        }

        builder.build()
    }
}

/// Builder for `ServerConfig`
#[derive(Debug, Default, Clone)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    session_secret: Option<String>,
    firebase_project_id: Option<String>,
    firebase_jwks_url: Option<String>,
    pusher: Option<PusherConfig>,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn session_secret(mut self, secret: impl Into<String>) -> Self {
        self.session_secret = Some(secret.into());
        self
    }

    pub fn firebase_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.firebase_project_id = Some(project_id.into());
        self
    }

    pub fn firebase_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.firebase_jwks_url = Some(url.into());
        self
    }

    pub fn pusher(mut self, pusher: PusherConfig) -> Self {
        self.pusher = Some(pusher);
        self
    }

    /// Validate and produce the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        Ok(ServerConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self.database_url,
            session_secret: self
                .session_secret
                .ok_or(ConfigError::MissingValue("JWT_SECRET_KEY"))?,
            firebase_project_id: self
                .firebase_project_id
                .ok_or(ConfigError::MissingValue("FIREBASE_PROJECT_ID"))?,
            firebase_jwks_url: self.firebase_jwks_url,
            pusher: self.pusher,
        })
    }
}
