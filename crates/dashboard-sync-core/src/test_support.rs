use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::LocalPool;

use crate::config::SyncConfig;
use crate::error::FetchError;
use crate::observability::ObservabilitySink;
use crate::payload::{BalanceResponse, TransactionBatch};
use crate::refresh::{RefreshCycle, SyncCollaborators};
use crate::render::{RenderSurface, TextTarget};
use crate::session::{IntervalScheduler, ScheduledHandle};
use crate::transport::DashboardApi;
use crate::view_guard::ViewLocation;

pub(crate) fn balance_ok(amount: f64, currency: &str) -> BalanceResponse {
    BalanceResponse {
        success: true,
        balance: Some(serde_json::json!({ "balance": amount, "currency": currency })),
        error: None,
    }
}

pub(crate) struct FakeLocation {
    path: RefCell<String>,
    reads: Cell<usize>,
}

impl FakeLocation {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            path: RefCell::new(path.to_string()),
            reads: Cell::new(0),
        }
    }

    pub(crate) fn navigate(&self, path: &str) {
        *self.path.borrow_mut() = path.to_string();
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl ViewLocation for FakeLocation {
    fn current_path(&self) -> String {
        self.reads.set(self.reads.get() + 1);
        self.path.borrow().clone()
    }
}

enum Reply<T> {
    Ready(Result<T, FetchError>),
    Pending(oneshot::Receiver<Result<T, FetchError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, FetchError> {
        match self {
            Self::Ready(result) => result,
            Self::Pending(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(FetchError::network("scripted reply dropped"))),
        }
    }
}

/// Replays queued responses in request order.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    balance: RefCell<VecDeque<Reply<BalanceResponse>>>,
    transactions: RefCell<VecDeque<Reply<TransactionBatch>>>,
    balance_calls: Cell<usize>,
    transaction_calls: Cell<usize>,
}

impl ScriptedApi {
    pub(crate) fn push_balance(&self, result: Result<BalanceResponse, FetchError>) {
        self.balance.borrow_mut().push_back(Reply::Ready(result));
    }

    pub(crate) fn push_pending_balance(
        &self,
    ) -> oneshot::Sender<Result<BalanceResponse, FetchError>> {
        let (sender, receiver) = oneshot::channel();
        self.balance.borrow_mut().push_back(Reply::Pending(receiver));
        sender
    }

    pub(crate) fn push_transactions(&self, result: Result<TransactionBatch, FetchError>) {
        self.transactions.borrow_mut().push_back(Reply::Ready(result));
    }

    pub(crate) fn balance_calls(&self) -> usize {
        self.balance_calls.get()
    }

    pub(crate) fn transaction_calls(&self) -> usize {
        self.transaction_calls.get()
    }
}

#[async_trait(?Send)]
impl DashboardApi for ScriptedApi {
    async fn fetch_balance(&self) -> Result<BalanceResponse, FetchError> {
        self.balance_calls.set(self.balance_calls.get() + 1);
        let reply = self.balance.borrow_mut().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(FetchError::network("unscripted balance request")),
        }
    }

    async fn fetch_transactions(&self) -> Result<TransactionBatch, FetchError> {
        self.transaction_calls.set(self.transaction_calls.get() + 1);
        let reply = self.transactions.borrow_mut().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(FetchError::network("unscripted transactions request")),
        }
    }
}

/// In-memory element registry keyed by id.
#[derive(Default)]
pub(crate) struct FakeSurface {
    elements: RefCell<HashMap<String, Rc<RefCell<String>>>>,
    lookups: Cell<usize>,
    writes: Rc<Cell<usize>>,
}

impl FakeSurface {
    pub(crate) fn insert(&self, id: &str, text: &str) {
        self.elements
            .borrow_mut()
            .insert(id.to_string(), Rc::new(RefCell::new(text.to_string())));
    }

    pub(crate) fn text(&self, id: &str) -> Option<String> {
        self.elements
            .borrow()
            .get(id)
            .map(|element| element.borrow().clone())
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.get()
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }
}

struct FakeElement {
    text: Rc<RefCell<String>>,
    writes: Rc<Cell<usize>>,
}

impl TextTarget for FakeElement {
    fn set_text(&self, text: &str) {
        self.writes.set(self.writes.get() + 1);
        *self.text.borrow_mut() = text.to_string();
    }
}

impl RenderSurface for FakeSurface {
    fn find_target(&self, id: &str) -> Option<Box<dyn TextTarget>> {
        self.lookups.set(self.lookups.get() + 1);
        let text = self.elements.borrow().get(id).cloned()?;
        Some(Box::new(FakeElement {
            text,
            writes: Rc::clone(&self.writes),
        }))
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    failures: RefCell<Vec<(String, FetchError)>>,
    acknowledgements: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub(crate) fn failures(&self) -> Vec<(String, FetchError)> {
        self.failures.borrow().clone()
    }

    pub(crate) fn acknowledgements(&self) -> Vec<String> {
        self.acknowledgements.borrow().clone()
    }
}

impl ObservabilitySink for RecordingSink {
    fn report_failure(&self, message: &str, error: &FetchError) {
        self.failures
            .borrow_mut()
            .push((message.to_string(), error.clone()));
    }

    fn acknowledge(&self, message: &str) {
        self.acknowledgements.borrow_mut().push(message.to_string());
    }
}

type TickSlot = Rc<RefCell<Option<Box<dyn FnMut()>>>>;

/// Manual interval timer: ticks only when `fire` is called.
#[derive(Default)]
pub(crate) struct ManualScheduler {
    registrations: RefCell<Vec<(Duration, TickSlot)>>,
}

impl ManualScheduler {
    pub(crate) fn registered_periods(&self) -> Vec<Duration> {
        self.registrations
            .borrow()
            .iter()
            .map(|(period, _)| *period)
            .collect()
    }

    pub(crate) fn live_timers(&self) -> usize {
        self.registrations
            .borrow()
            .iter()
            .filter(|(_, slot)| slot.borrow().is_some())
            .count()
    }

    pub(crate) fn fire(&self) {
        let slots = self
            .registrations
            .borrow()
            .iter()
            .map(|(_, slot)| Rc::clone(slot))
            .collect::<Vec<_>>();
        for slot in slots {
            if let Some(tick) = slot.borrow_mut().as_mut() {
                tick();
            }
        }
    }
}

pub(crate) struct ManualTimer {
    slot: TickSlot,
}

impl ScheduledHandle for ManualTimer {
    fn cancel(self) {
        self.slot.borrow_mut().take();
    }
}

impl IntervalScheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Self::Handle {
        let slot: TickSlot = Rc::new(RefCell::new(Some(tick)));
        self.registrations
            .borrow_mut()
            .push((period, Rc::clone(&slot)));
        ManualTimer { slot }
    }
}

/// A cycle wired to fakes, driven by a single-threaded executor.
pub(crate) struct Harness {
    pub(crate) pool: LocalPool,
    pub(crate) location: Rc<FakeLocation>,
    pub(crate) api: Rc<ScriptedApi>,
    pub(crate) surface: Rc<FakeSurface>,
    pub(crate) sink: Rc<RecordingSink>,
    cycle: Rc<RefreshCycle>,
}

impl Harness {
    pub(crate) fn on_path(path: &str) -> Self {
        Self::with_config(path, &SyncConfig::default())
    }

    pub(crate) fn with_config(path: &str, config: &SyncConfig) -> Self {
        let pool = LocalPool::new();
        let location = Rc::new(FakeLocation::new(path));
        let api = Rc::new(ScriptedApi::default());
        let surface = Rc::new(FakeSurface::default());
        let sink = Rc::new(RecordingSink::default());
        let cycle = Rc::new(RefreshCycle::new(
            config,
            SyncCollaborators {
                location: Rc::clone(&location) as Rc<dyn ViewLocation>,
                api: Rc::clone(&api) as Rc<dyn DashboardApi>,
                surface: Rc::clone(&surface) as Rc<dyn RenderSurface>,
                sink: Rc::clone(&sink) as Rc<dyn ObservabilitySink>,
                spawner: Rc::new(pool.spawner()),
            },
        ));
        Self {
            pool,
            location,
            api,
            surface,
            sink,
            cycle,
        }
    }

    pub(crate) fn cycle(&self) -> &RefreshCycle {
        &self.cycle
    }

    pub(crate) fn shared_cycle(&self) -> Rc<RefreshCycle> {
        Rc::clone(&self.cycle)
    }

    pub(crate) fn run_until_stalled(&mut self) {
        self.pool.run_until_stalled();
    }
}
