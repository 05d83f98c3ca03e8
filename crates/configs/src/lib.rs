//! # configs
//!
//! Environment-driven configuration for the naedex binaries. Every external
//! credential is optional: a missing or placeholder value is a supported,
//! detected state (the process runs against the in-memory mock store and a
//! log-only mailer), not an error.
//!
//! Variables are read with the `NAEDEX_` prefix, e.g. `NAEDEX_STORE_URL`,
//! `NAEDEX_STORE_KEY`, `NAEDEX_MAIL_API_KEY`, `NAEDEX_PORT`.

use config::{Config, Environment};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Sentinels shipped in example env files; treated the same as absence.
const PLACEHOLDER_STORE_URL: &str = "https://your-project.supabase.co";
const PLACEHOLDER_STORE_KEY: &str = "your-anon-key-here";
const PLACEHOLDER_MAIL_KEY: &str = "your-brevo-api-key-here";

const DEFAULT_MAIL_ENDPOINT: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the hosted store/auth service.
    #[serde(default)]
    pub store_url: Option<String>,
    /// API key for the hosted store/auth service.
    #[serde(default)]
    pub store_key: Option<SecretString>,

    /// Transactional-mail API key. Absent means log-only mail.
    #[serde(default)]
    pub mail_api_key: Option<SecretString>,
    #[serde(default = "default_mail_endpoint")]
    pub mail_endpoint: String,
    #[serde(default = "default_from_email")]
    pub mail_from_email: String,
    #[serde(default = "default_from_name")]
    pub mail_from_name: String,
}

fn default_port() -> u16 {
    8080
}

fn default_mail_endpoint() -> String {
    DEFAULT_MAIL_ENDPOINT.to_string()
}

fn default_from_email() -> String {
    "noreply@naedex.com".to_string()
}

fn default_from_name() -> String {
    "NaedeX Team".to_string()
}

/// Validated remote-store credentials. Only constructed when both halves
/// are present and not placeholders.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub api_key: SecretString,
}

/// Mail settings handed to the mail adapter; `api_key: None` selects the
/// logged no-op path.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: Option<SecretString>,
    pub endpoint: String,
    pub from_email: String,
    pub from_name: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("NAEDEX"))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// The remote store credentials, if usable. `None` means mock mode.
    pub fn store(&self) -> Option<StoreConfig> {
        let url = self.store_url.as_deref()?.trim();
        let key = self.store_key.as_ref()?;
        if url.is_empty() || url == PLACEHOLDER_STORE_URL {
            warn!("store URL missing or placeholder; the mock store will be used");
            return None;
        }
        if key.expose_secret().is_empty() || key.expose_secret() == PLACEHOLDER_STORE_KEY {
            warn!("store key missing or placeholder; the mock store will be used");
            return None;
        }
        Some(StoreConfig {
            base_url: url.trim_end_matches('/').to_string(),
            api_key: key.clone(),
        })
    }

    pub fn mail(&self) -> MailConfig {
        let api_key = self.mail_api_key.as_ref().and_then(|key| {
            if key.expose_secret().is_empty() || key.expose_secret() == PLACEHOLDER_MAIL_KEY {
                None
            } else {
                Some(key.clone())
            }
        });
        MailConfig {
            api_key,
            endpoint: self.mail_endpoint.clone(),
            from_email: self.mail_from_email.clone(),
            from_name: self.mail_from_name.clone(),
        }
    }
}
