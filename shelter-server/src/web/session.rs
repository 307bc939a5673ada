//! Per-session cancel-and-replace for locate runs.
//!
//! A client that asks again before its previous answer arrives only cares
//! about the newest position, so a new run for a session aborts the one
//! already in flight. The aborted caller is told it was superseded.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::AbortHandle;
use tracing::debug;

/// Why a session run produced no value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("superseded by a newer request for the same session")]
    Superseded,

    #[error("locate task failed: {0}")]
    TaskFailed(String),
}

struct InFlight {
    generation: u64,
    abort: AbortHandle,
}

/// Registry of in-flight runs, at most one per session id.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    runs: Arc<Mutex<HashMap<String, InFlight>>>,
    generation: Arc<AtomicU64>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` as the current run for `session`, aborting any earlier one.
    ///
    /// The task is spawned so that it can be aborted from another request.
    pub async fn run<F, T>(&self, session: &str, task: F) -> Result<T, SessionError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::spawn(task);
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);

        let previous = self.lock().insert(
            session.to_string(),
            InFlight {
                generation,
                abort: handle.abort_handle(),
            },
        );
        if let Some(previous) = previous {
            debug!(session, "aborting superseded locate");
            previous.abort.abort();
        }

        // Clears the entry even if this caller is dropped mid-await.
        let _guard = RunGuard {
            registry: self,
            session,
            generation,
            abort: handle.abort_handle(),
        };

        handle.await.map_err(|e| {
            if e.is_cancelled() {
                SessionError::Superseded
            } else {
                SessionError::TaskFailed(e.to_string())
            }
        })
    }

    /// Number of sessions with a run in flight.
    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, InFlight>> {
        self.runs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ends a run's registration: aborts its task if still running and removes
/// its entry unless a newer run has replaced it.
struct RunGuard<'a> {
    registry: &'a SessionRegistry,
    session: &'a str,
    generation: u64,
    abort: AbortHandle,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.abort.abort();
        let mut runs = self.registry.lock();
        if runs
            .get(self.session)
            .is_some_and(|r| r.generation == self.generation)
        {
            runs.remove(self.session);
        }
    }
}
