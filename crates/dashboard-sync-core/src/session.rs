use std::rc::Rc;
use std::time::Duration;

use crate::refresh::{CycleStart, RefreshCycle};

/// A live recurring timer. Cancelling consumes it.
pub trait ScheduledHandle {
    fn cancel(self);
}

pub trait IntervalScheduler {
    type Handle: ScheduledHandle;

    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Self::Handle;
}

/// Page-session owner of the periodic refresh trigger.
///
/// The timer is registered at most once, in [`SyncSession::start`], and only
/// when the view guard holds for the path at that moment. Later navigation
/// never registers or cancels it; each tick re-checks the guard itself.
pub struct SyncSession<H: ScheduledHandle> {
    cycle: Rc<RefreshCycle>,
    period: Duration,
    timer: Option<H>,
}

impl<H: ScheduledHandle> SyncSession<H> {
    pub fn start<S>(scheduler: &S, cycle: Rc<RefreshCycle>, period: Duration) -> Self
    where
        S: IntervalScheduler<Handle = H>,
    {
        let period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
        if !cycle.in_dashboard_view() {
            tracing::info!(period_ms, "dashboard sync not scheduled outside dashboard view");
            return Self {
                cycle,
                period,
                timer: None,
            };
        }

        let tick_cycle = Rc::clone(&cycle);
        let timer = scheduler.every(
            period,
            Box::new(move || {
                tick_cycle.run();
            }),
        );
        tracing::info!(period_ms, "dashboard sync scheduled");
        Self {
            cycle,
            period,
            timer: Some(timer),
        }
    }

    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.timer.is_some()
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Manual refresh. Guarded like a scheduled tick.
    pub fn refresh_now(&self) -> CycleStart {
        self.cycle.run()
    }

    /// Cancels the timer. Returns `false` when there was nothing to cancel.
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                timer.cancel();
                tracing::info!("dashboard sync stopped");
                true
            }
            None => false,
        }
    }
}
