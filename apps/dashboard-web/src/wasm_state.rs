use dashboard_sync_core::{FailureLog, FailureReport};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SessionPhase {
    Booting,
    Scheduled,
    Idle,
    Stopped,
}

/// What the shell exposes through `sync_diagnostics_json`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SyncDiagnostics {
    pub(crate) phase: SessionPhase,
    pub(crate) route_path: String,
    pub(crate) scheduled: bool,
    pub(crate) poll_interval_ms: u64,
    pub(crate) config_source: String,
    pub(crate) failures: FailureLog,
}

impl Default for SyncDiagnostics {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Booting,
            route_path: "/".to_string(),
            scheduled: false,
            poll_interval_ms: 0,
            config_source: String::new(),
            failures: FailureLog::default(),
        }
    }
}

impl SyncDiagnostics {
    pub(crate) fn session_started(
        &mut self,
        route_path: String,
        scheduled: bool,
        poll_interval_ms: u64,
        config_source: &str,
    ) {
        self.phase = if scheduled {
            SessionPhase::Scheduled
        } else {
            SessionPhase::Idle
        };
        self.route_path = route_path;
        self.scheduled = scheduled;
        self.poll_interval_ms = poll_interval_ms;
        self.config_source = config_source.to_string();
    }

    pub(crate) fn session_stopped(&mut self) {
        self.phase = SessionPhase::Stopped;
        self.scheduled = false;
    }

    pub(crate) fn record_failure(&mut self, report: FailureReport) {
        self.failures.push(report);
    }

    pub(crate) fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
        })
    }
}
