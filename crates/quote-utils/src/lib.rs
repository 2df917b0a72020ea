//! Shared utilities for the quote agent
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup and environment-driven configuration.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AppConfig, LogFormat, OpenAISettings, ServerConfig, TelemetryConfig};
pub use error::{ConfigError, Result};
pub use logging::init_tracing;
