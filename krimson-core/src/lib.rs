//! Krimson Core - Foundation crate for the Krimson project tracker
//!
//! This crate provides functionality shared by the LLM and orchestration crates:
//!
//! # Modules
//!
//! - [`config`]: Strongly-typed configuration with TOML and environment variable support
//! - [`domain`]: Analysis records, normalization of loose LLM payloads, comparison
//! - [`infrastructure`]: In-memory analysis history and activity log stores
//! - [`logging`]: Structured logging with tracing
//!
//! # Architecture
//!
//! ```text
//! krimson-core/
//! ├── domain/
//! │   ├── analysis/     # Record, raw payload, normalization, factory, comparison
//! │   └── activity/     # Operator activity log entries
//! ├── infrastructure/   # Volatile per-process stores
//! └── config/           # Configuration management
//! ```
//!
//! # Configuration
//!
//! ```rust,ignore
//! use krimson_core::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `KRIMSON__` prefix with double underscore separators:
//!
//! ```bash
//! KRIMSON__SERVER__PORT=5000
//! KRIMSON__HISTORY__MAX_RECORDS_PER_PROJECT=8
//! ```

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
