use crate::constants::{
    API_KEY_ENV, CONFIG_FILE, DEFAULT_BATCH_DELAY_SECS, DEFAULT_BATCH_SIZE,
    DEFAULT_COUNTRY_PREFIX, DEFAULT_MEMBER_COUNT, DEFAULT_PORTAL_URL, DEFAULT_RETRY_ATTEMPTS,
    DEFAULT_SEND_INTERVAL_SECS, DEVICE_ID_ENV, DUMMY_MEMBERS_FILE, PROCESSED_MEMBERS_FILE,
    STUDENTS_FILE, TEXTBEE_BASE_URL,
};
use crate::error::{NotifyError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Settings for every subcommand, read from `config.toml` and the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub processor: ProcessorConfig,
    pub bulk_send: BulkSendConfig,
    pub sms: SmsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub member_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BulkSendConfig {
    pub input_path: PathBuf,
    pub batch_size: usize,
    pub delay_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmsConfig {
    pub api_key: Option<String>,
    pub device_id: Option<String>,
    pub base_url: String,
    pub input_path: PathBuf,
    pub send_interval_seconds: u64,
    pub country_prefix: String,
    pub portal_url: String,
    pub retry_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            member_count: DEFAULT_MEMBER_COUNT,
            output_path: PathBuf::from(DUMMY_MEMBERS_FILE),
        }
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DUMMY_MEMBERS_FILE),
            output_path: PathBuf::from(PROCESSED_MEMBERS_FILE),
        }
    }
}

impl Default for BulkSendConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(PROCESSED_MEMBERS_FILE),
            batch_size: DEFAULT_BATCH_SIZE,
            delay_seconds: DEFAULT_BATCH_DELAY_SECS,
        }
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            device_id: None,
            base_url: TEXTBEE_BASE_URL.to_string(),
            input_path: PathBuf::from(STUDENTS_FILE),
            send_interval_seconds: DEFAULT_SEND_INTERVAL_SECS,
            country_prefix: DEFAULT_COUNTRY_PREFIX.to_string(),
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
        }
    }
}

impl Config {
    /// Loads configuration, then applies environment overrides.
    ///
    /// With no explicit path a missing `config.toml` means all defaults; an
    /// explicit path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No {} found, using defaults", CONFIG_FILE);
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            NotifyError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Overrides gateway credentials from the environment. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(api_key) = non_blank(API_KEY_ENV) {
            self.sms.api_key = Some(api_key);
        }
        if let Some(device_id) = non_blank(DEVICE_ID_ENV) {
            self.sms.device_id = Some(device_id);
        }
    }
}

impl BulkSendConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(NotifyError::Config("bulk_send.batch_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Gateway credentials that passed validation.
#[derive(Debug, Clone)]
pub struct GatewayCredentials {
    pub api_key: String,
    pub device_id: String,
}

impl SmsConfig {
    pub fn send_interval(&self) -> Duration {
        Duration::from_secs(self.send_interval_seconds)
    }

    pub fn credentials(&self) -> Result<GatewayCredentials> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            NotifyError::Config(format!("sms.api_key is not set (or export {})", API_KEY_ENV))
        })?;
        let device_id = self.device_id.clone().ok_or_else(|| {
            NotifyError::Config(format!("sms.device_id is not set (or export {})", DEVICE_ID_ENV))
        })?;
        Ok(GatewayCredentials { api_key, device_id })
    }
}
