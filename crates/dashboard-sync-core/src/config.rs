use std::time::Duration;

use serde::Deserialize;

use crate::view_guard::DASHBOARD_PATH_MARKER;

pub const DEFAULT_BALANCE_PATH: &str = "/api/balance";
pub const DEFAULT_TRANSACTIONS_PATH: &str = "/api/transactions";
pub const DEFAULT_BALANCE_TARGET_ID: &str = "balance-display";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const MIN_POLL_INTERVAL_MS: u64 = 1_000;
pub const MAX_POLL_INTERVAL_MS: u64 = u32::MAX as u64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("sync config is not valid JSON: {message}")]
    Parse { message: String },
    #[error("dashboard marker must not be empty")]
    EmptyMarker,
    #[error("{field} must be an absolute path starting with '/' (got {value:?})")]
    InvalidPath { field: &'static str, value: String },
    #[error("balance target id must be non-empty and contain no whitespace (got {value:?})")]
    InvalidTargetId { value: String },
    #[error(
        "poll interval must be between {min} and {max} ms (got {millis})",
        min = MIN_POLL_INTERVAL_MS,
        max = MAX_POLL_INTERVAL_MS
    )]
    IntervalOutOfRange { millis: u64 },
    #[error("log filter must not be empty")]
    EmptyLogFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub dashboard_marker: String,
    pub balance_path: String,
    pub transactions_path: String,
    pub balance_target_id: String,
    pub poll_interval: Duration,
    pub log_filter: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            dashboard_marker: DASHBOARD_PATH_MARKER.to_string(),
            balance_path: DEFAULT_BALANCE_PATH.to_string(),
            transactions_path: DEFAULT_TRANSACTIONS_PATH.to_string(),
            balance_target_id: DEFAULT_BALANCE_TARGET_ID.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Partial config supplied by the host page. Absent fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SyncConfigOverrides {
    #[serde(default, alias = "dashboard_marker")]
    pub dashboard_marker: Option<String>,
    #[serde(default, alias = "balance_path")]
    pub balance_path: Option<String>,
    #[serde(default, alias = "transactions_path")]
    pub transactions_path: Option<String>,
    #[serde(default, alias = "balance_target_id")]
    pub balance_target_id: Option<String>,
    #[serde(default, alias = "poll_interval_ms")]
    pub poll_interval_ms: Option<u64>,
    #[serde(default, alias = "log_filter")]
    pub log_filter: Option<String>,
}

impl SyncConfigOverrides {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|error| ConfigError::Parse {
            message: error.to_string(),
        })
    }
}

impl SyncConfig {
    /// Defaults merged with a host-supplied JSON document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Self::default().with_overrides(SyncConfigOverrides::from_json(raw)?)
    }

    pub fn with_overrides(mut self, overrides: SyncConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(marker) = overrides.dashboard_marker {
            self.dashboard_marker = marker.trim().to_string();
        }
        if let Some(path) = overrides.balance_path {
            self.balance_path = path.trim().to_string();
        }
        if let Some(path) = overrides.transactions_path {
            self.transactions_path = path.trim().to_string();
        }
        if let Some(target_id) = overrides.balance_target_id {
            self.balance_target_id = target_id;
        }
        if let Some(millis) = overrides.poll_interval_ms {
            self.poll_interval = Duration::from_millis(millis);
        }
        if let Some(filter) = overrides.log_filter {
            self.log_filter = filter.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard_marker.trim().is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        validate_path("balance_path", &self.balance_path)?;
        validate_path("transactions_path", &self.transactions_path)?;
        if self.balance_target_id.is_empty()
            || self.balance_target_id.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::InvalidTargetId {
                value: self.balance_target_id.clone(),
            });
        }
        let millis = u64::try_from(self.poll_interval.as_millis()).unwrap_or(u64::MAX);
        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&millis) {
            return Err(ConfigError::IntervalOutOfRange { millis });
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::EmptyLogFilter);
        }
        Ok(())
    }

    #[must_use]
    pub fn poll_interval_ms(&self) -> u64 {
        u64::try_from(self.poll_interval.as_millis()).unwrap_or(u64::MAX)
    }
}

fn validate_path(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with('/') && !value.starts_with("//") {
        Ok(())
    } else {
        Err(ConfigError::InvalidPath {
            field,
            value: value.to_string(),
        })
    }
}
