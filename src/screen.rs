use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::Mutex;
use tracing::{event, Level};

use crate::{
    fetcher::ProductFetcher,
    metrics::{FetchMetrics, FetchOutcome},
    renderer::{self, RenderedProduct},
};

pub static FAILURE_NOTIFICATION: &str = "Failed to load product";

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Pending,
    Rendered(RenderedProduct),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    Applied(FetchState),
    /// A newer trigger was issued while this one was in flight; its result was dropped.
    Superseded,
}

/// Owns the fetch-and-render cycle for the product view.
///
/// Every trigger takes a new generation number. When a fetch completes, its
/// result is applied only if no later trigger has started since, so the view
/// always reflects the most recent request and stale completions are ignored.
pub struct ProductScreen<F: ProductFetcher> {
    fetcher: Arc<F>,
    state: Mutex<FetchState>,
    generation: AtomicU64,
    metrics: Arc<FetchMetrics>,
}

impl<F: ProductFetcher> ProductScreen<F> {
    pub fn new(fetcher: Arc<F>, metrics: Arc<FetchMetrics>) -> Self {
        ProductScreen {
            fetcher,
            state: Mutex::new(FetchState::Idle),
            generation: AtomicU64::new(0),
            metrics,
        }
    }

    pub async fn state(&self) -> FetchState {
        self.state.lock().await.clone()
    }

    pub async fn trigger(&self) -> TriggerOutcome {
        // Pending and the new generation are published together under the lock.
        let generation = {
            let mut state = self.state.lock().await;
            *state = FetchState::Pending;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        event!(Level::INFO, "Product fetch {} triggered", generation);

        let result = self.fetcher.fetch().await;

        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            event!(Level::DEBUG, "Discarding result of superseded fetch {}", generation);
            self.metrics.record(FetchOutcome::Superseded);
            return TriggerOutcome::Superseded;
        }

        *state = match result {
            Ok(product) => {
                self.metrics.record(FetchOutcome::Rendered);
                FetchState::Rendered(renderer::render(&product))
            }
            Err(e) => {
                if e.is_network_failure() {
                    event!(Level::WARN, "Product fetch {} could not reach the store: {}", generation, e);
                } else {
                    event!(Level::ERROR, "Product fetch {} failed: {}", generation, e);
                }
                self.metrics.record(FetchOutcome::Failed);
                FetchState::Failed(FAILURE_NOTIFICATION.to_string())
            }
        };

        TriggerOutcome::Applied(state.clone())
    }
}
