use std::env;

use crate::error::ConfigError;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Supabase { url: String, key: String },
    Sqlite { database_url: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store: StoreConfig,
    pub telegram_bot_token: Option<String>,
    pub telegram_api_url: String,
}

impl Config {
    /// Reads configuration from the process environment. `main` loads `.env` beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8080,
        };

        // Supabase wins when both backends are configured
        let store = match (non_empty("SUPABASE_URL"), non_empty("SUPABASE_KEY")) {
            (Some(url), Some(key)) => StoreConfig::Supabase {
                url: url.trim_end_matches('/').to_string(),
                key,
            },
            (Some(_), None) => return Err(ConfigError::MissingSupabaseKey),
            (None, Some(_)) => return Err(ConfigError::MissingSupabaseUrl),
            (None, None) => match non_empty("DATABASE_URL") {
                Some(database_url) => StoreConfig::Sqlite { database_url },
                None => return Err(ConfigError::MissingStore),
            },
        };

        Ok(Config {
            port,
            store,
            telegram_bot_token: non_empty("TELEGRAM_BOT_TOKEN"),
            telegram_api_url: non_empty("TELEGRAM_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn supabase_backend_from_url_and_key() {
        let config = config_from(&[
            ("SUPABASE_URL", "https://project.supabase.co/"),
            ("SUPABASE_KEY", "service-key"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.store,
            StoreConfig::Supabase {
                url: "https://project.supabase.co".to_string(),
                key: "service-key".to_string(),
            }
        );
        assert_eq!(config.telegram_bot_token, None);
        assert_eq!(config.telegram_api_url, DEFAULT_TELEGRAM_API_URL);
    }

    #[test]
    fn supabase_takes_precedence_over_sqlite() {
        let config = config_from(&[
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_KEY", "k"),
            ("DATABASE_URL", "sqlite://raffle.db"),
        ])
        .unwrap();

        assert!(matches!(config.store, StoreConfig::Supabase { .. }));
    }

    #[test]
    fn sqlite_backend_when_supabase_absent() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite://raffle.db"),
            ("PORT", "9000"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(
            config.store,
            StoreConfig::Sqlite {
                database_url: "sqlite://raffle.db".to_string()
            }
        );
        assert_eq!(config.telegram_bot_token.as_deref(), Some("123:abc"));
    }

    #[test]
    fn missing_store_is_an_error() {
        assert!(matches!(config_from(&[]), Err(ConfigError::MissingStore)));
        assert!(matches!(
            config_from(&[("SUPABASE_URL", "https://project.supabase.co")]),
            Err(ConfigError::MissingSupabaseKey)
        ));
    }

    #[test]
    fn supabase_key_without_url_is_an_error() {
        assert!(matches!(
            config_from(&[("SUPABASE_KEY", "service-key")]),
            Err(ConfigError::MissingSupabaseUrl)
        ));
        assert!(matches!(
            config_from(&[("SUPABASE_KEY", "service-key"), ("DATABASE_URL", "sqlite://raffle.db")]),
            Err(ConfigError::MissingSupabaseUrl)
        ));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let result = config_from(&[("DATABASE_URL", "sqlite::memory:"), ("PORT", "eighty")]);
        assert!(matches!(result, Err(ConfigError::InvalidPort(p)) if p == "eighty"));
    }
}
