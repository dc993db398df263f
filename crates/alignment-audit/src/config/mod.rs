use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_STATE_PATH: &str = "alignment-audit-state.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub storage: StorageConfig,
    pub insight: InsightConfig,
    pub archive: ArchiveConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = env::var("AUDIT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let state_path = env::var("AUDIT_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_PATH));

        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let model = env::var("AUDIT_INSIGHT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let request_timeout = match env::var("AUDIT_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout { value: raw })?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let passive_webhook_url = non_blank_env("AUDIT_PASSIVE_WEBHOOK_URL");
        let finalize_webhook_url = non_blank_env("AUDIT_FINALIZE_WEBHOOK_URL");

        Ok(Self {
            telemetry: TelemetryConfig { log_level },
            storage: StorageConfig { state_path },
            insight: InsightConfig {
                api_key,
                model,
                request_timeout,
            },
            archive: ArchiveConfig {
                passive_webhook_url,
                finalize_webhook_url,
            },
        })
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the single persisted session snapshot.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub state_path: PathBuf,
}

/// Credential and model selection for the insight service. The API key is
/// the only credential in the system.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout: Duration,
}

/// Archive webhook endpoints. Either may be unset: an unset passive URL
/// disables the detached dispatch, an unset finalize URL fails the
/// explicit submission.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub passive_webhook_url: Option<String>,
    pub finalize_webhook_url: Option<String>,
}

/// Configuration load failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("AUDIT_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{value}'")]
    InvalidTimeout { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("AUDIT_LOG_LEVEL");
        env::remove_var("AUDIT_STATE_PATH");
        env::remove_var("AUDIT_INSIGHT_MODEL");
        env::remove_var("AUDIT_REQUEST_TIMEOUT_SECS");
        env::remove_var("GEMINI_API_KEY");
        env::remove_var("AUDIT_PASSIVE_WEBHOOK_URL");
        env::remove_var("AUDIT_FINALIZE_WEBHOOK_URL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.storage.state_path, PathBuf::from(DEFAULT_STATE_PATH));
        assert_eq!(config.insight.model, DEFAULT_MODEL);
        assert_eq!(
            config.insight.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert!(config.insight.api_key.is_none());
        assert!(config.archive.passive_webhook_url.is_none());
        assert!(config.archive.finalize_webhook_url.is_none());
    }

    #[test]
    fn blank_credential_counts_as_unset() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("GEMINI_API_KEY", "   ");
        let config = AppConfig::load().expect("config loads");
        assert!(config.insight.api_key.is_none());
    }

    #[test]
    fn malformed_timeout_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AUDIT_REQUEST_TIMEOUT_SECS", "soon");
        match AppConfig::load() {
            Err(ConfigError::InvalidTimeout { value }) => assert_eq!(value, "soon"),
            other => panic!("expected invalid timeout, got {other:?}"),
        }
    }

    #[test]
    fn webhook_urls_are_trimmed() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AUDIT_FINALIZE_WEBHOOK_URL", "  https://hooks.example/final  ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.archive.finalize_webhook_url.as_deref(),
            Some("https://hooks.example/final")
        );
    }
}
