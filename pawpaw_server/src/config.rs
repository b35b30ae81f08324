use std::env;

use log::*;
use pp_common::{helpers::parse_boolean_flag, Secret};
use rand::{distributions::Alphanumeric, thread_rng, Rng};

const DEFAULT_PAWPAW_HOST: &str = "127.0.0.1";
const DEFAULT_PAWPAW_PORT: u16 = 4400;
const DEFAULT_EVENT_BUFFER_SIZE: usize = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    /// The mpsc buffer size for the match-found event channel.
    pub event_buffer_size: usize,
    /// When true, the match notifier hook is not installed at all. Matches are still created and
    /// remain discoverable via the match list; only the convenience push is dropped.
    pub disable_push_notifications: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PAWPAW_HOST.to_string(),
            port: DEFAULT_PAWPAW_PORT,
            database_url: String::default(),
            auth: AuthConfig::default(),
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            disable_push_notifications: false,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("PAWPAW_HOST").ok().unwrap_or_else(|| DEFAULT_PAWPAW_HOST.into());
        let port = env::var("PAWPAW_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for PAWPAW_PORT. {e} Using the default, {DEFAULT_PAWPAW_PORT}, \
                         instead."
                    );
                    DEFAULT_PAWPAW_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_PAWPAW_PORT);
        let database_url = env::var("PAWPAW_DATABASE_URL").unwrap_or_else(|_| {
            warn!("🪛️ PAWPAW_DATABASE_URL is not set. Using the default, sqlite://data/pawpaw.db");
            "sqlite://data/pawpaw.db".into()
        });
        let event_buffer_size = env::var("PAWPAW_EVENT_BUFFER_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_EVENT_BUFFER_SIZE);
        let disable_push_notifications =
            parse_boolean_flag(env::var("PAWPAW_DISABLE_PUSH").ok(), false);
        let auth = AuthConfig::from_env_or_default();
        Self { host, port, database_url, auth, event_buffer_size, disable_push_notifications }
    }
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HS256 secret shared with the identity provider.
    pub jwt_secret: Secret<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🪛️ No JWT secret was configured. An ephemeral secret is being generated; access tokens will not \
             survive a server restart. Set PAWPAW_JWT_SECRET to fix this."
        );
        let secret: String = thread_rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect();
        Self { jwt_secret: Secret::new(secret) }
    }
}

impl AuthConfig {
    pub fn from_env_or_default() -> Self {
        match env::var("PAWPAW_JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => Self { jwt_secret: Secret::new(secret) },
            _ => AuthConfig::default(),
        }
    }
}
