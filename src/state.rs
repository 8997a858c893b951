//! The two user-triggered actions of the dashboard, "load tasks" and "run
//! query". Each owns its in-flight count and error message; neither touches
//! the other's slot.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::backend::ChaserBackend;
use crate::models::QueryAnswer;
use crate::pipeline::{build_view, ClientView};

pub const LOAD_TASKS_FAILED: &str = "Failed to load tasks. Is the backend reachable?";
pub const RUN_QUERY_FAILED: &str = "Failed to run query. Check the intelligence service.";

#[derive(Debug, Clone, Default)]
pub struct TaskSlot {
    pub view: Vec<ClientView>,
    pub loaded_at: Option<DateTime<Utc>>,
    pub in_flight: usize,
    pub error: Option<String>,
    /// Ticket of the newest load whose outcome has been applied.
    applied: u64,
}

impl TaskSlot {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn never_loaded(&self) -> bool {
        self.applied == 0 && self.in_flight == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuerySlot {
    pub question: String,
    pub answer: Option<QueryAnswer>,
    pub in_flight: usize,
    pub error: Option<String>,
}

impl QuerySlot {
    pub fn is_asking(&self) -> bool {
        self.in_flight > 0
    }
}

trait InFlight {
    fn in_flight(&mut self) -> &mut usize;
}

impl InFlight for TaskSlot {
    fn in_flight(&mut self) -> &mut usize {
        &mut self.in_flight
    }
}

impl InFlight for QuerySlot {
    fn in_flight(&mut self) -> &mut usize {
        &mut self.in_flight
    }
}

/// Counts one request as in flight until dropped, including when the
/// request future is cancelled mid-fetch.
struct InFlightGuard<'a, S: InFlight> {
    slot: &'a Mutex<S>,
}

impl<'a, S: InFlight> InFlightGuard<'a, S> {
    fn enter(slot: &'a Mutex<S>) -> Self {
        *slot.lock().in_flight() += 1;
        Self { slot }
    }
}

impl<S: InFlight> Drop for InFlightGuard<'_, S> {
    fn drop(&mut self) {
        *self.slot.lock().in_flight() -= 1;
    }
}

#[derive(Default)]
pub struct DashboardState {
    tasks: Mutex<TaskSlot>,
    query: Mutex<QuerySlot>,
    next_ticket: AtomicU64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks_snapshot(&self) -> TaskSlot {
        self.tasks.lock().clone()
    }

    pub fn query_snapshot(&self) -> QuerySlot {
        self.query.lock().clone()
    }

    /// Fetches the listing and rebuilds the view.
    ///
    /// Outcomes older than an already-applied load are dropped, so a slow
    /// response cannot replace newer data. On failure the previous view stays.
    pub async fn load_tasks(&self, backend: &dyn ChaserBackend, base: &str) {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.tasks.lock().error = None;

        let result = {
            let _in_flight = InFlightGuard::enter(&self.tasks);
            backend.list_tasks(base).await
        };

        let mut slot = self.tasks.lock();
        if ticket < slot.applied {
            tracing::debug!(ticket, applied = slot.applied, "dropping stale task listing");
            return;
        }
        slot.applied = ticket;

        match result {
            Ok(batches) => {
                slot.view = build_view(&batches);
                slot.loaded_at = Some(Utc::now());
                slot.error = None;
                tracing::info!(
                    batches = batches.len(),
                    clients = slot.view.len(),
                    "loaded chaser tasks"
                );
            }
            Err(e) => {
                tracing::warn!("failed to load chaser tasks from {}: {}", base, e);
                slot.error = Some(LOAD_TASKS_FAILED.into());
            }
        }
    }

    /// Runs a free-text lookup. Blank questions are ignored without a request.
    pub async fn run_query(&self, backend: &dyn ChaserBackend, base: &str, question: &str) {
        let question = question.trim();
        if question.is_empty() {
            return;
        }

        {
            let mut slot = self.query.lock();
            slot.question = question.to_string();
            slot.error = None;
        }

        let result = {
            let _in_flight = InFlightGuard::enter(&self.query);
            backend.ask(base, question).await
        };

        let mut slot = self.query.lock();
        match result {
            Ok(answer) => {
                tracing::info!(question, hits = answer.results.len(), "query answered");
                slot.answer = Some(answer);
            }
            Err(e) => {
                tracing::warn!("query {:?} failed against {}: {}", question, base, e);
                slot.error = Some(RUN_QUERY_FAILED.into());
            }
        }
    }
}
