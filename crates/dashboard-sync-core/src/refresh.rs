use std::future::Future;
use std::rc::Rc;

use futures::task::{LocalFutureObj, LocalSpawn};

use crate::config::SyncConfig;
use crate::observability::{
    BALANCE_FAILURE_MESSAGE, ObservabilitySink, TRANSACTIONS_ACK_MESSAGE,
    TRANSACTIONS_FAILURE_MESSAGE,
};
use crate::render::RenderSurface;
use crate::transport::DashboardApi;
use crate::view_guard::{ViewGuard, ViewLocation};

/// Host capabilities a refresh cycle runs against.
pub struct SyncCollaborators {
    pub location: Rc<dyn ViewLocation>,
    pub api: Rc<dyn DashboardApi>,
    pub surface: Rc<dyn RenderSurface>,
    pub sink: Rc<dyn ObservabilitySink>,
    pub spawner: Rc<dyn LocalSpawn>,
}

/// Whether a cycle launched its requests. Not a completion signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStart {
    Skipped,
    Launched,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BalanceOutcome {
    Rendered { text: String },
    NoData,
    TargetMissing,
    ViewChanged,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TransactionOutcome {
    Acknowledged { records: usize },
    Failed,
}

pub struct RefreshCycle {
    context: Rc<CycleContext>,
    spawner: Rc<dyn LocalSpawn>,
}

struct CycleContext {
    guard: ViewGuard,
    balance_target_id: String,
    location: Rc<dyn ViewLocation>,
    api: Rc<dyn DashboardApi>,
    surface: Rc<dyn RenderSurface>,
    sink: Rc<dyn ObservabilitySink>,
}

impl RefreshCycle {
    pub fn new(config: &SyncConfig, collaborators: SyncCollaborators) -> Self {
        let SyncCollaborators {
            location,
            api,
            surface,
            sink,
            spawner,
        } = collaborators;
        Self {
            context: Rc::new(CycleContext {
                guard: ViewGuard::new(config.dashboard_marker.clone()),
                balance_target_id: config.balance_target_id.clone(),
                location,
                api,
                surface,
                sink,
            }),
            spawner,
        }
    }

    #[must_use]
    pub fn in_dashboard_view(&self) -> bool {
        self.context.in_dashboard_view()
    }

    /// Runs one cycle: guard check, then the balance and transaction lanes as
    /// two detached local tasks with no join between them.
    pub fn run(&self) -> CycleStart {
        let path = self.context.location.current_path();
        if !self.context.guard.admits(&path) {
            tracing::debug!(path, "dashboard sync skipped outside dashboard view");
            return CycleStart::Skipped;
        }
        tracing::debug!(path, "dashboard sync cycle started");

        let context = Rc::clone(&self.context);
        self.launch("balance", async move {
            let outcome = context.refresh_balance().await;
            tracing::debug!(?outcome, "balance refresh finished");
        });

        let context = Rc::clone(&self.context);
        self.launch("transactions", async move {
            let outcome = context.refresh_transactions().await;
            tracing::debug!(?outcome, "transaction refresh finished");
        });

        CycleStart::Launched
    }

    fn launch(&self, lane: &'static str, task: impl Future<Output = ()> + 'static) {
        let task = LocalFutureObj::from(Box::pin(task));
        if let Err(error) = self.spawner.spawn_local_obj(task) {
            tracing::warn!(lane, %error, "failed to spawn dashboard refresh task");
        }
    }
}

impl CycleContext {
    fn in_dashboard_view(&self) -> bool {
        self.guard.admits_current(self.location.as_ref())
    }

    async fn refresh_balance(&self) -> BalanceOutcome {
        let response = match self.api.fetch_balance().await {
            Ok(response) => response,
            Err(error) => {
                self.sink.report_failure(BALANCE_FAILURE_MESSAGE, &error);
                return BalanceOutcome::Failed;
            }
        };

        if !response.success {
            tracing::debug!(
                server_error = response.error.as_deref(),
                "balance endpoint reported no data"
            );
            return BalanceOutcome::NoData;
        }

        // The request may outlive the view it was issued from.
        if !self.in_dashboard_view() {
            return BalanceOutcome::ViewChanged;
        }

        let Some(target) = self.surface.find_target(&self.balance_target_id) else {
            return BalanceOutcome::TargetMissing;
        };

        let snapshot = match response.snapshot() {
            Ok(snapshot) => snapshot,
            Err(error) => {
                self.sink.report_failure(BALANCE_FAILURE_MESSAGE, &error);
                return BalanceOutcome::Failed;
            }
        };

        let text = snapshot.display_text();
        target.set_text(&text);
        BalanceOutcome::Rendered { text }
    }

    async fn refresh_transactions(&self) -> TransactionOutcome {
        match self.api.fetch_transactions().await {
            Ok(batch) => {
                tracing::debug!(
                    records = batch.len(),
                    success = batch.success,
                    "transaction history received"
                );
                self.sink.acknowledge(TRANSACTIONS_ACK_MESSAGE);
                TransactionOutcome::Acknowledged {
                    records: batch.len(),
                }
            }
            Err(error) => {
                self.sink.report_failure(TRANSACTIONS_FAILURE_MESSAGE, &error);
                TransactionOutcome::Failed
            }
        }
    }
}
