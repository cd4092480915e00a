//! Query generations used to reject responses for superseded queries.
//!
//! Every new query (a search text change, or a reset to the first page)
//! begins a new generation. Requests carry a [`QueryTicket`] for the
//! generation they were issued under; once a newer generation begins the
//! ticket is stale, and whatever that request returns is thrown away, even
//! if it resolves after the newer request completed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct QueryGeneration {
    counter: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct QueryTicket {
    generation: u64,
    counter: Arc<AtomicU64>,
}

impl QueryGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating every outstanding ticket
    pub fn begin(&self) -> QueryTicket {
        let generation = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        QueryTicket { generation, counter: Arc::clone(&self.counter) }
    }

    /// Ticket for the generation already in progress
    pub fn current(&self) -> QueryTicket {
        QueryTicket {
            generation: self.counter.load(Ordering::SeqCst),
            counter: Arc::clone(&self.counter),
        }
    }
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        !self.is_current()
    }
}

/// Wait out the debounce window, then report whether the query still stands.
///
/// A `false` result means a newer query began during the wait and the
/// request must not be sent.
pub async fn debounce(ticket: &QueryTicket, delay: Duration) -> bool {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let current = ticket.is_current();
    if !current {
        debug!(generation = ticket.generation(), "Debounced query superseded");
    }
    current
}
