//! Typed configuration for rou services.
//!
//! This crate provides a strongly-typed configuration system with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`RouConfig`] holds three sections:
//!
//! - [`ServerSection`] - HTTP hosting (address, timeouts, keep-alive)
//! - [`LoggingSection`] - Log subscriber (level, format)
//! - [`MetricsSection`] - Prometheus recorder
//!
//! # Example
//!
//! ```no_run
//! use rou_config::ConfigLoader;
//!
//! # fn main() -> Result<(), rou_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_optional_file("rou.toml")?
//!     .with_env_prefix("ROU")
//!     .load()?;
//!
//! println!("Server will listen on: {}", config.server.http_addr);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! http_addr = "0.0.0.0:8080"
//! shutdown_timeout_secs = 30
//! request_timeout_ms = 30000
//! keep_alive = true
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//!
//! [metrics]
//! enabled = false
//! ```

#![doc(html_root_url = "https://docs.rs/rou-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::RouConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LogFormat, LoggingSection, MetricsSection, ServerSection};
