//! View-gated periodic sync of the dashboard balance and transaction history.
//!
//! The crate owns the decision logic only. The host supplies the location,
//! the HTTP transport, the render surface, the diagnostic sink, a local task
//! spawner and an interval timer; `apps/dashboard-web` binds them to the
//! browser.

pub mod config;
pub mod error;
pub mod observability;
pub mod payload;
pub mod refresh;
pub mod render;
pub mod session;
pub mod transport;
pub mod view_guard;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, SyncConfig, SyncConfigOverrides};
pub use error::FetchError;
pub use observability::{FailureLog, FailureReport, ObservabilitySink};
pub use payload::{BalancePayload, BalanceResponse, BalanceSnapshot, TransactionBatch};
pub use refresh::{CycleStart, RefreshCycle, SyncCollaborators};
pub use render::{RenderSurface, TextTarget};
pub use session::{IntervalScheduler, ScheduledHandle, SyncSession};
pub use transport::{DashboardApi, decode_json_body};
pub use view_guard::{DASHBOARD_PATH_MARKER, ViewGuard, ViewLocation, is_dashboard_view};
