use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_INACTIVITY_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_INACTIVITY_WARNING_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_file: Option<PathBuf>,
    pub inactivity_timeout: Duration,
    pub inactivity_warning: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            session_file: None,
            inactivity_timeout: Duration::from_secs(DEFAULT_INACTIVITY_TIMEOUT_SECS),
            inactivity_warning: Duration::from_secs(DEFAULT_INACTIVITY_WARNING_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("API_URL not set, using default {}", DEFAULT_API_URL);
                    DEFAULT_API_URL.to_string()
                }),
            session_file: env::var("SESSION_FILE").ok().map(PathBuf::from),
            inactivity_timeout: Duration::from_secs(seconds_from_env(
                "INACTIVITY_TIMEOUT_SECS",
                DEFAULT_INACTIVITY_TIMEOUT_SECS,
            )),
            inactivity_warning: Duration::from_secs(seconds_from_env(
                "INACTIVITY_WARNING_SECS",
                DEFAULT_INACTIVITY_WARNING_SECS,
            )),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - check API_URL and inactivity settings");
        }

        config
    }

    pub fn with_api_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty() && self.inactivity_warning <= self.inactivity_timeout
    }

    pub fn has_persistent_session(&self) -> bool {
        self.session_file.is_some()
    }
}

fn seconds_from_env(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} is not a number of seconds ({:?}), using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
