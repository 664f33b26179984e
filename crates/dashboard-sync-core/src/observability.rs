use std::collections::VecDeque;

use serde::Serialize;

use crate::error::FetchError;

pub const BALANCE_FAILURE_MESSAGE: &str = "Error fetching balance:";
pub const TRANSACTIONS_FAILURE_MESSAGE: &str = "Error fetching transactions:";
pub const TRANSACTIONS_ACK_MESSAGE: &str = "Transactions refreshed";
pub const FAILURE_LOG_LIMIT: usize = 32;

/// Append-only diagnostic channel. Nothing in the sync path reads it back.
pub trait ObservabilitySink {
    fn report_failure(&self, message: &str, error: &FetchError);

    fn acknowledge(&self, _message: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub message: String,
    pub error: FetchError,
    pub recorded_at_unix_ms: u64,
}

/// Bounded in-memory tail of failure reports, oldest evicted first.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct FailureLog {
    #[serde(skip)]
    limit: usize,
    entries: VecDeque<FailureReport>,
}

impl Default for FailureLog {
    fn default() -> Self {
        Self::with_limit(FAILURE_LOG_LIMIT)
    }
}

impl FailureLog {
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, report: FailureReport) {
        self.entries.push_back(report);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &FailureReport> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
