use crate::db::DbPool;
use crate::notification::{NotificationRepository, NotificationService};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub notification_repository: NotificationRepository,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(db: DbPool, config: Arc<Config>) -> Self {
        let notification_repository = NotificationRepository::new(db.clone());
        let notification_service = NotificationService::new(notification_repository.clone());

        Self {
            db,
            config,
            notification_repository,
            notification_service,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub page_size: u32,
    pub recent_limit: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", std::env::var("PORT").ok(), 3000)?,
            page_size: parse_or(
                "NOTIFICATIONS_PAGE_SIZE",
                std::env::var("NOTIFICATIONS_PAGE_SIZE").ok(),
                10,
            )?,
            recent_limit: parse_or(
                "NOTIFICATIONS_RECENT_LIMIT",
                std::env::var("NOTIFICATIONS_RECENT_LIMIT").ok(),
                5,
            )?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let port: u16 = parse_or("PORT", None, 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_or_parses_value() {
        let size: u32 = parse_or("NOTIFICATIONS_PAGE_SIZE", Some(" 25 ".into()), 10).unwrap();
        assert_eq!(size, 25);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        let err = parse_or::<u16>("PORT", Some("eighty".into()), 3000).unwrap_err();
        assert_eq!(err.to_string(), "PORT has an invalid value: eighty");
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            database_url: "sqlite::memory:".into(),
            jwt_secret: "secret".into(),
            host: "0.0.0.0".into(),
            port: 8080,
            page_size: 10,
            recent_limit: 5,
        };
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }
}
