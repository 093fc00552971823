use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use folio_notification::{EmailJsConfig, Provider, SmtpConfig};
use serde::Deserialize;
use std::{env, time::Duration};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub emailjs: EmailJsConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    /// Every submission is addressed here.
    #[serde(default = "default_recipient")]
    pub recipient: String,
    #[serde(default)]
    pub provider: Provider,
    #[serde(default = "default_reset_after_secs")]
    pub reset_after_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: default_recipient(),
            provider: Provider::default(),
            reset_after_secs: default_reset_after_secs(),
        }
    }
}

impl ContactConfig {
    pub fn reset_after(&self) -> Duration {
        Duration::from_secs(self.reset_after_secs)
    }
}

fn default_recipient() -> String {
    "hello@folio.localhost".to_string()
}

fn default_reset_after_secs() -> u64 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Unprefixed EmailJS variables (EMAILJS_SERVICE_ID, etc.)
    /// 2. Environment variables (FOLIO__EMAILJS__SERVICE_ID, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        for (var, key) in [
            ("EMAILJS_SERVICE_ID", "emailjs.service_id"),
            ("EMAILJS_TEMPLATE_ID", "emailjs.template_id"),
            ("EMAILJS_PUBLIC_KEY", "emailjs.public_key"),
        ] {
            if let Ok(value) = env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> folio_shared::Result<()> {
        if self.contact.reset_after_secs == 0 {
            folio_shared::bail!("contact.reset_after_secs must be greater than 0");
        }
        if !self.contact.recipient.contains('@') {
            folio_shared::bail!(
                "contact.recipient is not an email address: {}",
                self.contact.recipient
            );
        }
        if self.contact.provider == Provider::EmailJs
            && !self.emailjs.api_url.starts_with("http")
        {
            folio_shared::bail!("emailjs.api_url must be an http(s) URL");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::default();

        assert_eq!(config.contact.reset_after(), Duration::from_secs(5));
        assert_eq!(config.contact.provider, Provider::EmailJs);
        assert_eq!(config.emailjs.service_id, "your_service_id");
        assert_eq!(config.observability.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.child("folio.toml");
        std::fs::write(
            &path,
            r#"
[contact]
recipient = "me@example.com"
provider = "smtp"
reset_after_secs = 3

[smtp]
smtp_host = "mail.example.com"
smtp_port = 2525

[observability]
log_level = "debug"
"#,
        )?;

        let config = Config::load(Some(path.to_string_lossy().into_owned()))?;

        assert_eq!(config.contact.recipient, "me@example.com");
        assert_eq!(config.contact.provider, Provider::Smtp);
        assert_eq!(config.contact.reset_after(), Duration::from_secs(3));
        assert_eq!(config.smtp.smtp_host, "mail.example.com");
        assert_eq!(config.smtp.smtp_port, 2525);
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.emailjs.api_url, "https://api.emailjs.com");

        Ok(())
    }

    #[test]
    fn test_unknown_provider_is_rejected() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.child("folio.toml");
        std::fs::write(&path, "[contact]\nprovider = \"carrier-pigeon\"\n")?;

        assert!(Config::load(Some(path.to_string_lossy().into_owned())).is_err());

        Ok(())
    }

    #[test]
    fn test_validation_zero_reset_delay() {
        let mut config = Config::default();
        config.contact.reset_after_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_recipient() {
        let mut config = Config::default();
        config.contact.recipient = "nobody".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_api_url() {
        let mut config = Config::default();
        config.emailjs.api_url = "api.emailjs.com".to_string();

        assert!(config.validate().is_err());

        config.contact.provider = Provider::Smtp;
        assert!(config.validate().is_ok());
    }
}
