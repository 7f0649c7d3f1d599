use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::{event, Level};

pub static FETCH_COUNTER_NAME: &str = "product_fetch_total";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Rendered,
    Failed,
    Superseded,
}

impl FetchOutcome {
    fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Rendered => "rendered",
            FetchOutcome::Failed => "failed",
            FetchOutcome::Superseded => "superseded",
        }
    }
}

pub struct FetchMetrics {
    registry: Registry,
    fetches: IntCounterVec,
}

impl FetchMetrics {
    pub fn new() -> Result<FetchMetrics, String> {
        let opts = Opts::new(FETCH_COUNTER_NAME, "Completed product fetches by outcome");

        match IntCounterVec::new(opts, &["outcome"]) {
            Ok(fetches) => {
                let registry = Registry::new();
                match registry.register(Box::new(fetches.clone())) {
                    Ok(()) => Ok(FetchMetrics { registry, fetches }),
                    Err(e) => Err(format!("Failed to register fetch counter: {}", e)),
                }
            }
            Err(e) => Err(format!("Failed to create fetch counter: {}", e)),
        }
    }

    pub fn record(&self, outcome: FetchOutcome) {
        self.fetches.with_label_values(&[outcome.label()]).inc();
    }

    pub fn count(&self, outcome: FetchOutcome) -> u64 {
        self.fetches.with_label_values(&[outcome.label()]).get()
    }

    pub fn render(&self) -> String {
        let mut buffer = vec![];
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();

        match encoder.encode(&metric_families, &mut buffer) {
            Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(e) => {
                event!(Level::WARN, "Error occurred while encoding metrics: {}", e);
                String::new()
            }
        }
    }
}
