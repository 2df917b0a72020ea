//! Configuration management utilities
//!
//! All settings come from environment variables. [`AppConfig::from_lookup`]
//! accepts any key lookup so configuration can be built without touching
//! the process environment.

use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_LANGFUSE_HOST: &str = "https://cloud.langfuse.com";
const DEFAULT_SERVICE_NAME: &str = "quote-agent";
const DEFAULT_SERVICE_VERSION: &str = "1.0.0";

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output
    #[default]
    Pretty,
    /// Single-line human readable output
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::invalid(
                "LOG_FORMAT",
                other,
                "expected one of pretty, compact, json",
            )),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// URL advertised to clients in the agent card
    pub public_url: String,
}

impl ServerConfig {
    /// Socket address string (`host:port`)
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_url: format!("http://localhost:{DEFAULT_PORT}/"),
        }
    }
}

/// Completion service settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAISettings {
    /// API credential; `None` puts the agent in degraded mode
    pub api_key: Option<String>,
    /// Base URL of the chat completions API
    pub api_base: String,
    /// Model identifier
    pub model: String,
    /// Transport timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OpenAISettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAISettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Telemetry backend settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether telemetry was requested
    pub enabled: bool,
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
    /// Backend base URL
    pub host: String,
    pub service_name: String,
    pub service_version: String,
}

impl std::fmt::Debug for TelemetryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryConfig")
            .field("enabled", &self.enabled)
            .field("public_key", &self.public_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("service_name", &self.service_name)
            .field("service_version", &self.service_version)
            .finish()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            public_key: None,
            secret_key: None,
            host: DEFAULT_LANGFUSE_HOST.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_version: DEFAULT_SERVICE_VERSION.to_string(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub openai: OpenAISettings,
    pub telemetry: TelemetryConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let port = match get("QUOTE_AGENT_PORT") {
            Some(raw) => parse_number::<u16>("QUOTE_AGENT_PORT", &raw)?,
            None => defaults.server.port,
        };
        let server = ServerConfig {
            host: get("QUOTE_AGENT_HOST").unwrap_or(defaults.server.host),
            port,
            public_url: get("QUOTE_AGENT_PUBLIC_URL")
                .unwrap_or_else(|| format!("http://localhost:{port}/")),
        };

        let openai = OpenAISettings {
            api_key: get("OPENAI_API_KEY"),
            api_base: get("OPENAI_API_BASE").unwrap_or(defaults.openai.api_base),
            model: get("OPENAI_MODEL").unwrap_or(defaults.openai.model),
            timeout_secs: match get("OPENAI_TIMEOUT_SECS") {
                Some(raw) => parse_number::<u64>("OPENAI_TIMEOUT_SECS", &raw)?,
                None => defaults.openai.timeout_secs,
            },
        };

        let telemetry = TelemetryConfig {
            // Anything other than "true" leaves telemetry off.
            enabled: get("LANGFUSE_ENABLED").is_some_and(|v| v.eq_ignore_ascii_case("true")),
            public_key: get("LANGFUSE_PUBLIC_KEY"),
            secret_key: get("LANGFUSE_SECRET_KEY"),
            host: get("LANGFUSE_HOST").unwrap_or(defaults.telemetry.host),
            service_name: get("OTEL_SERVICE_NAME").unwrap_or(defaults.telemetry.service_name),
            service_version: get("OTEL_SERVICE_VERSION")
                .unwrap_or(defaults.telemetry.service_version),
        };

        let log_format = match get("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            server,
            openai,
            telemetry,
            log_format,
        })
    }
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::invalid(key, raw, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.server.public_url, "http://localhost:8080/");
        assert_eq!(config.openai.api_key, None);
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        assert_eq!(config.openai.api_base, "https://api.openai.com/v1");
        assert_eq!(config.openai.timeout_secs, 120);
        assert!(!config.telemetry.enabled);
        assert_eq!(config.telemetry.host, "https://cloud.langfuse.com");
        assert_eq!(config.telemetry.service_name, "quote-agent");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("QUOTE_AGENT_PORT", "9090"),
            ("LANGFUSE_ENABLED", "TRUE"),
            ("LANGFUSE_PUBLIC_KEY", "pk"),
            ("LANGFUSE_SECRET_KEY", "sk"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.public_url, "http://localhost:9090/");
        assert!(config.telemetry.enabled);
        assert_eq!(config.telemetry.public_key.as_deref(), Some("pk"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = AppConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "   ")])).unwrap();
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_telemetry_flag_requires_true() {
        let config = AppConfig::from_lookup(lookup_from(&[("LANGFUSE_ENABLED", "1")])).unwrap();
        assert!(!config.telemetry.enabled);
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("QUOTE_AGENT_PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "QUOTE_AGENT_PORT"));
    }

    #[test]
    fn test_invalid_log_format() {
        let result = AppConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-very-secret"),
            ("LANGFUSE_SECRET_KEY", "lf-very-secret"),
        ]))
        .unwrap();

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(!rendered.contains("lf-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
