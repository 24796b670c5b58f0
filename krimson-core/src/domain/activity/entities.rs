//! Activity log entries and their severity levels

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::LenientEnum;
use crate::domain::analysis::normalization::iso_timestamp;

/// Severity of an operator note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LenientEnum for LogLevel {
    const ALL: &'static [Self] = &[Self::Info, Self::Warn, Self::Error];
    const FALLBACK: Self = Self::Info;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// One entry of the activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogEntry {
    #[schema(example = "1718000000000-3fa2c1")]
    pub id: String,
    pub message: String,
    pub level: LogLevel,
    pub timestamp: String,
}

impl ActivityLogEntry {
    /// Stamp a new entry, restricting `level` to the known set
    pub fn new(message: impl Into<String>, level: Option<&str>) -> Self {
        Self::new_at(message, level, Utc::now())
    }

    pub fn new_at(message: impl Into<String>, level: Option<&str>, now: DateTime<Utc>) -> Self {
        let suffix: u32 = rand::rng().random_range(0..0x100_0000);
        Self {
            id: format!("{}-{suffix:06x}", now.timestamp_millis()),
            message: message.into(),
            level: LogLevel::restrict(level),
            timestamp: iso_timestamp(now),
        }
    }
}
