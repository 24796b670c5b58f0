//! Operator activity log domain

pub mod entities;

pub use entities::{ActivityLogEntry, LogLevel};
