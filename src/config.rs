use std::{env, str::FromStr, time::Duration};

use tracing::Level;

pub static DEFAULT_BASE_URL: &str = "https://fakestoreapi.com/";
pub static DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct FakeStoreInitializationInfo {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingInitializationInfo {
    pub path: Option<String>,
    pub level: Level,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub fake_store: FakeStoreInitializationInfo,
    pub logging: LoggingInitializationInfo,
}

impl AppConfig {
    pub fn from_env() -> Result<AppConfig, String> {
        AppConfig::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<L: Fn(&str) -> Option<String>>(lookup: L) -> Result<AppConfig, String> {
        let base_url = lookup("FAKESTORE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => return Err(String::from("HTTP_TIMEOUT_SECS must be greater than zero")),
                Ok(secs) => secs,
                Err(e) => return Err(format!("Invalid HTTP_TIMEOUT_SECS {}: {}", raw, e)),
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let level = match lookup("LOG_LEVEL") {
            Some(raw) => match Level::from_str(raw.trim()) {
                Ok(level) => level,
                Err(e) => return Err(format!("Invalid LOG_LEVEL {}: {}", raw, e)),
            },
            None => Level::DEBUG,
        };

        Ok(AppConfig {
            fake_store: FakeStoreInitializationInfo {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            logging: LoggingInitializationInfo {
                path: lookup("LOG_PATH").filter(|p| !p.trim().is_empty()),
                level,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.fake_store.base_url, "https://fakestoreapi.com/");
        assert_eq!(config.fake_store.timeout, Duration::from_secs(30));
        assert_eq!(config.logging.path, None);
        assert_eq!(config.logging.level, Level::DEBUG);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("FAKESTORE_BASE_URL", "http://localhost:8080/"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("LOG_PATH", "/tmp/products.log"),
            ("LOG_LEVEL", "warn"),
        ])
        .unwrap();

        assert_eq!(config.fake_store.base_url, "http://localhost:8080/");
        assert_eq!(config.fake_store.timeout, Duration::from_secs(5));
        assert_eq!(config.logging.path.as_deref(), Some("/tmp/products.log"));
        assert_eq!(config.logging.level, Level::WARN);
    }

    #[test]
    fn rejects_bad_timeouts() {
        assert!(config_from(&[("HTTP_TIMEOUT_SECS", "0")]).is_err());

        let err = config_from(&[("HTTP_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.contains("HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let err = config_from(&[("LOG_LEVEL", "loud")]).unwrap_err();
        assert!(err.contains("LOG_LEVEL"));
    }
}
