use std::{env, net::SocketAddr, str::FromStr};

use tracing::{info, warn};

use crate::utils::error::{AppError, AppResult};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

impl FromStr for StoreKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreKind::Mongo),
            "memory" => Ok(StoreKind::Memory),
            other => Err(AppError::ConfigError(format!("unknown POLL_STORE '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Mock,
    Session,
}

impl FromStr for AuthKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(AuthKind::Mock),
            "session" => Ok(AuthKind::Session),
            other => Err(AppError::ConfigError(format!("unknown AUTH_PROVIDER '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushKind {
    Fcm,
    Noop,
}

impl FromStr for PushKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcm" => Ok(PushKind::Fcm),
            "noop" | "none" => Ok(PushKind::Noop),
            other => Err(AppError::ConfigError(format!("unknown PUSH_PROVIDER '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FirebaseSettings {
    /// JSON service-account blob from `FIREBASE_SERVICE_ACCOUNT_KEY`.
    pub service_account_key: Option<String>,
    pub database_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MongoSettings {
    pub uri: String,
    pub db_name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub cors_origin: Option<String>,
    pub store: StoreKind,
    pub mongo: Option<MongoSettings>,
    pub auth: AuthKind,
    pub session_secret: Option<String>,
    pub push: PushKind,
    pub firebase: FirebaseSettings,
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_addr = var("SERVER_ADDR").unwrap_or_else(|| {
            info!("SERVER_ADDR not set, using default {DEFAULT_SERVER_ADDR}");
            DEFAULT_SERVER_ADDR.to_string()
        });
        let server_addr = server_addr
            .parse::<SocketAddr>()
            .map_err(|e| AppError::ConfigError(format!("invalid SERVER_ADDR '{server_addr}': {e}")))?;

        let store = parse_or(var("POLL_STORE"), StoreKind::Mongo)?;
        let mongo = match store {
            StoreKind::Mongo => Some(MongoSettings {
                uri: var("MONGO_URI")
                    .ok_or_else(|| AppError::ConfigError("MONGO_URI must be set".to_string()))?,
                db_name: var("DB_NAME")
                    .ok_or_else(|| AppError::ConfigError("DB_NAME must be set".to_string()))?,
            }),
            StoreKind::Memory => None,
        };

        let auth = parse_or(var("AUTH_PROVIDER"), AuthKind::Mock)?;
        let session_secret = var("SESSION_SECRET");
        if auth == AuthKind::Session && session_secret.is_none() {
            return Err(AppError::ConfigError(
                "SESSION_SECRET must be set when AUTH_PROVIDER=session".to_string(),
            ));
        }
        if auth == AuthKind::Mock {
            warn!("AUTH_PROVIDER=mock, every request is treated as a logged-in user");
        }

        let cors_origin = var("CORS_ORIGIN");
        if cors_origin.is_none() {
            warn!("CORS_ORIGIN not set, cross-origin requests will be rejected");
        }

        Ok(Self {
            server_addr,
            cors_origin,
            store,
            mongo,
            auth,
            session_secret,
            push: parse_or(var("PUSH_PROVIDER"), PushKind::Noop)?,
            firebase: FirebaseSettings {
                service_account_key: var("FIREBASE_SERVICE_ACCOUNT_KEY"),
                database_url: var("NEXT_PUBLIC_FIREBASE_DATABASE_URL"),
            },
        })
    }
}

fn parse_or<T>(value: Option<String>, default: T) -> AppResult<T>
where
    T: FromStr<Err = AppError>,
{
    value.map_or(Ok(default), |v| v.parse())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppResult<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn memory_store_needs_no_mongo_settings() {
        let config = config(&[("POLL_STORE", "memory")]).unwrap();

        assert_eq!(config.store, StoreKind::Memory);
        assert!(config.mongo.is_none());
        assert_eq!(config.auth, AuthKind::Mock);
        assert_eq!(config.push, PushKind::Noop);
        assert_eq!(config.server_addr.port(), 8000);
    }

    #[test]
    fn mongo_store_requires_uri() {
        let err = config(&[("DB_NAME", "polls")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(msg) if msg.contains("MONGO_URI")));
    }

    #[test]
    fn session_auth_requires_secret() {
        let err = config(&[("POLL_STORE", "memory"), ("AUTH_PROVIDER", "session")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(msg) if msg.contains("SESSION_SECRET")));
    }

    #[test]
    fn firebase_settings_are_read_verbatim() {
        let config = config(&[
            ("POLL_STORE", "memory"),
            ("FIREBASE_SERVICE_ACCOUNT_KEY", "{\"project_id\":\"p\"}"),
            ("NEXT_PUBLIC_FIREBASE_DATABASE_URL", "https://p.firebaseio.com"),
        ])
        .unwrap();

        assert_eq!(
            config.firebase.service_account_key.as_deref(),
            Some("{\"project_id\":\"p\"}")
        );
        assert_eq!(
            config.firebase.database_url.as_deref(),
            Some("https://p.firebaseio.com")
        );
    }

    #[test]
    fn unknown_provider_is_an_error() {
        assert!(config(&[("POLL_STORE", "memory"), ("PUSH_PROVIDER", "pigeon")]).is_err());
        assert!(config(&[("POLL_STORE", "memory"), ("SERVER_ADDR", "nowhere")]).is_err());
    }
}
