use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the service-account JSON file.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "PORT";

pub const DEFAULT_TTS_ENDPOINT: &str = "https://texttospeech.googleapis.com";
pub const DEFAULT_STT_ENDPOINT: &str = "https://speech.googleapis.com";
pub const DEFAULT_LANGUAGE_ENDPOINT: &str = "https://language.googleapis.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub google: GoogleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Flat directory holding every artifact
    pub uploads_path: String,
    /// Maximum artifact age; unset keeps artifacts forever
    #[serde(default)]
    pub retention_secs: Option<u64>,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// Service-account JSON file. Required, no fallback.
    #[serde(default)]
    pub credentials_path: Option<String>,
    pub tts_endpoint: String,
    pub stt_endpoint: String,
    pub language_endpoint: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load from an optional config file, then `SPEECH_GATEWAY__*`,
    /// `GOOGLE_APPLICATION_CREDENTIALS` and `PORT` from the environment.
    pub fn load(path: &str) -> Result<Self> {
        let port = match std::env::var(PORT_ENV) {
            Ok(raw) => Some(
                raw.parse::<u16>()
                    .with_context(|| format!("{} is not a valid port: {}", PORT_ENV, raw))?,
            ),
            Err(_) => None,
        };
        let credentials = std::env::var(CREDENTIALS_ENV).ok().filter(|v| !v.is_empty());

        let settings = config::Config::builder()
            .set_default("service.name", "speech-gateway")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 8080_i64)?
            .set_default("storage.uploads_path", "uploads")?
            .set_default("storage.sweep_interval_secs", 3600_i64)?
            .set_default("google.tts_endpoint", DEFAULT_TTS_ENDPOINT)?
            .set_default("google.stt_endpoint", DEFAULT_STT_ENDPOINT)?
            .set_default("google.language_endpoint", DEFAULT_LANGUAGE_ENDPOINT)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("SPEECH_GATEWAY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("google.credentials_path", credentials)?
            .set_override_option("service.http.port", port.map(i64::from))?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Check everything that must hold before the server starts.
    pub fn validate(&self) -> Result<()> {
        self.credentials_path()?;

        if self.storage.uploads_path.trim().is_empty() {
            bail!("storage.uploads_path must not be empty");
        }
        if self.storage.retention_secs == Some(0) {
            bail!("storage.retention_secs must be greater than zero when set");
        }
        if self.storage.sweep_interval_secs == 0 {
            bail!("storage.sweep_interval_secs must be greater than zero");
        }
        if self.google.timeout_secs == Some(0) {
            bail!("google.timeout_secs must be greater than zero when set");
        }

        Ok(())
    }

    /// Resolved service-account file path. Fails when unset or missing on disk.
    pub fn credentials_path(&self) -> Result<PathBuf> {
        let raw = match self.google.credentials_path.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => bail!(
                "Google credentials are not configured: set {} or google.credentials_path",
                CREDENTIALS_ENV
            ),
        };

        let expanded = shellexpand::full(raw)
            .with_context(|| format!("Failed to expand credentials path: {}", raw))?;
        let path = PathBuf::from(expanded.as_ref());

        if !path.is_file() {
            bail!("Google credentials file not found: {}", path.display());
        }

        Ok(path)
    }

    pub fn retention(&self) -> Option<Duration> {
        self.storage.retention_secs.map(Duration::from_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.storage.sweep_interval_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.google.timeout_secs.map(Duration::from_secs)
    }
}
