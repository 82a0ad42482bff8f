use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    #[validate(nested)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GeminiSettings {
    #[serde(default = "default_endpoint")]
    #[validate(url)]
    pub endpoint: String,
    /// Left unchecked here; the API rejects a missing key
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    #[validate(length(min = 1))]
    pub model: String,
    /// 0 disables the request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
        }
    }
}

impl GeminiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

fn default_endpoint() -> String { "https://generativelanguage.googleapis.com".to_string() }
fn default_model() -> String { "gemini-pro".to_string() }
fn default_timeout_secs() -> u64 { 60 }
fn default_temperature() -> f32 { 0.2 }

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MatchingSettings {
    #[serde(default = "default_max_prompt_bytes")]
    #[validate(range(min = 1))]
    pub max_prompt_bytes: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_prompt_bytes: default_max_prompt_bytes(),
        }
    }
}

fn default_max_prompt_bytes() -> usize { 1_000_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with TIMELINE__)
    /// 4. GEMINI_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TIMELINE__GEMINI__MODEL -> gemini.model
            .add_source(environment())
            .build()?;

        let settings = apply_credential_override(settings)?;

        finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        let settings = apply_credential_override(settings)?;

        finish(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("TIMELINE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// The bare GEMINI_API_KEY variable wins over any configured key
fn apply_credential_override(settings: Config) -> Result<Config, ConfigError> {
    let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty());

    let Some(api_key) = api_key else {
        return Ok(settings);
    };

    Config::builder()
        .add_source(settings)
        .set_override("gemini.api_key", api_key)?
        .build()
}

fn finish(settings: Config) -> Result<Settings, ConfigError> {
    let settings: Settings = settings.try_deserialize()?;
    settings
        .validate()
        .map_err(|e| ConfigError::Message(format!("Invalid configuration: {}", e)))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gemini_settings() {
        let gemini = GeminiSettings::default();
        assert_eq!(gemini.endpoint, "https://generativelanguage.googleapis.com");
        assert_eq!(gemini.model, "gemini-pro");
        assert_eq!(gemini.timeout(), Some(Duration::from_secs(60)));
        assert_eq!(gemini.temperature, 0.2);
        assert!(gemini.api_key.is_empty());
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let gemini = GeminiSettings {
            timeout_secs: 0,
            ..GeminiSettings::default()
        };
        assert_eq!(gemini.timeout(), None);
    }

    #[test]
    fn test_timeout_read_from_config_source() {
        let config = Config::builder()
            .set_override("gemini.timeout_secs", 0)
            .unwrap()
            .build()
            .unwrap();
        let settings = finish(config).unwrap();
        assert_eq!(settings.gemini.timeout(), None);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "pretty");
    }

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_endpoint() {
        let mut settings = Settings::default();
        settings.gemini.endpoint = "not a url".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_prompt_limit() {
        let mut settings = Settings::default();
        settings.matching.max_prompt_bytes = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_sources_fall_back_to_defaults() {
        let config = Config::builder().build().unwrap();
        let settings = finish(config).unwrap();
        assert_eq!(settings.gemini.model, "gemini-pro");
        assert_eq!(settings.matching.max_prompt_bytes, 1_000_000);
    }
}
