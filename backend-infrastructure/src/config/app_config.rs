use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub public_base_url: String,
    /// Directory for the JSON store files. Empty disables persistence
    /// and keeps all tables in memory.
    pub data_dir: Option<String>,
    pub roster_path: String,
    pub default_match_duration_minutes: u32,
    pub notify_webhook_url: Option<String>,
    pub notify_webhook_template: Option<String>,
    pub notify_webhook_token: Option<String>,
    pub notify_group_id: Option<i64>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            api_token: None,
            public_base_url: "http://127.0.0.1:8080".to_string(),
            data_dir: Some("./data".to_string()),
            roster_path: "./rosters.yaml".to_string(),
            default_match_duration_minutes: 105,
            notify_webhook_url: None,
            notify_webhook_template: None,
            notify_webhook_token: None,
            notify_group_id: None,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("MATCHDAY_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(data_dir) = &self.data_dir {
            if data_dir.trim().is_empty() {
                self.data_dir = None;
            }
        }
        if let Some(url) = &self.notify_webhook_url {
            if url.trim().is_empty() {
                self.notify_webhook_url = None;
            }
        }
        if let Some(template) = &self.notify_webhook_template {
            if template.trim().is_empty() {
                self.notify_webhook_template = None;
            }
        }
        if let Some(token) = &self.notify_webhook_token {
            if token.trim().is_empty() {
                self.notify_webhook_token = None;
            }
        }
        if let Some(group_id) = self.notify_group_id {
            if group_id <= 0 {
                self.notify_group_id = None;
            }
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.roster_path = resolve_path(base, &self.roster_path);
        if let Some(data_dir) = &self.data_dir {
            self.data_dir = Some(resolve_path(base, data_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.public_base_url.trim().is_empty() {
            return Err(anyhow!("public_base_url must not be empty"));
        }
        if self.roster_path.trim().is_empty() {
            return Err(anyhow!("roster_path must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.default_match_duration_minutes == 0 || self.default_match_duration_minutes >= 1440 {
            return Err(anyhow!(
                "default_match_duration_minutes must be between 1 and 1439"
            ));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            public_base_url: self.public_base_url.clone(),
            data_dir: self.data_dir.clone(),
            roster_path: self.roster_path.clone(),
            default_match_duration_minutes: self.default_match_duration_minutes,
            notify_webhook_url: self.notify_webhook_url.clone(),
            notify_webhook_template: self.notify_webhook_template.clone(),
            notify_webhook_token: self.notify_webhook_token.clone(),
            notify_group_id: self.notify_group_id,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("MATCHDAY_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("MATCHDAY_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("MATCHDAY_PUBLIC_BASE_URL") {
            self.public_base_url = value;
        }
        if let Ok(value) = env::var("MATCHDAY_DATA_DIR") {
            self.data_dir = Some(value);
        }
        if let Ok(value) = env::var("MATCHDAY_ROSTER_PATH") {
            self.roster_path = value;
        }
        if let Ok(value) = env::var("MATCHDAY_DEFAULT_MATCH_DURATION_MINUTES") {
            self.default_match_duration_minutes =
                value.parse().unwrap_or(self.default_match_duration_minutes);
        }
        if let Ok(value) = env::var("MATCHDAY_NOTIFY_WEBHOOK_URL") {
            self.notify_webhook_url = Some(value);
        }
        if let Ok(value) = env::var("MATCHDAY_NOTIFY_WEBHOOK_TEMPLATE") {
            self.notify_webhook_template = Some(value);
        }
        if let Ok(value) = env::var("MATCHDAY_NOTIFY_WEBHOOK_TOKEN") {
            self.notify_webhook_token = Some(value);
        }
        if let Ok(value) = env::var("MATCHDAY_NOTIFY_GROUP_ID") {
            self.notify_group_id = value.parse().ok();
        }
        if let Ok(value) = env::var("MATCHDAY_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("MATCHDAY_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = AppConfig::default();
        config.validate().expect("defaults must validate");
    }

    #[test]
    fn blank_optionals_normalize_to_none() {
        let mut config = AppConfig {
            api_token: Some("  ".to_string()),
            data_dir: Some(String::new()),
            notify_webhook_url: Some(String::new()),
            notify_group_id: Some(0),
            ..AppConfig::default()
        };
        config.normalize();
        assert_eq!(config.api_token, None);
        assert_eq!(config.data_dir, None);
        assert_eq!(config.notify_webhook_url, None);
        assert_eq!(config.notify_group_id, None);
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let config = AppConfig {
            bind_addr: "not-an-addr".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_match_duration_is_rejected() {
        let config = AppConfig {
            default_match_duration_minutes: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn day_long_match_duration_is_rejected() {
        let config = AppConfig {
            default_match_duration_minutes: 1440,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
