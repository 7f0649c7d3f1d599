use std::sync::Arc;

use crate::{fetcher::HttpProductFetcher, metrics::FetchMetrics, screen::ProductScreen};

#[derive(Clone)]
pub struct AppState {
    pub product_screen: Arc<ProductScreen<HttpProductFetcher>>,
    pub metrics: Arc<FetchMetrics>,
}
