use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{event, Level};

use crate::{
    domain::Product,
    dtos::ProductResponse,
    errors::{error_chain, FetchError},
};

pub static PRODUCT_PATH: &str = "products/1";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductFetcher: Send + Sync {
    async fn fetch(&self) -> Result<Product, FetchError>;
}

/// Connect and every individual read are bounded by `timeout`; a body that keeps
/// arriving in time may take longer than `timeout` overall.
pub fn build_http_client(timeout: Duration) -> Result<Client, FetchError> {
    match Client::builder()
        .connect_timeout(timeout)
        .read_timeout(timeout)
        .build()
    {
        Ok(client) => Ok(client),
        Err(e) => Err(FetchError::Client(format!("Failed to build http client: {}", e))),
    }
}

/// Fetches the single product exposed at `<base-url>/products/1`.
///
/// The client is handed in by the caller and never rebuilt, so one connection
/// pool serves every fetch made through this instance (and its clones).
#[derive(Clone)]
pub struct HttpProductFetcher {
    client: Client,
    endpoint: Url,
}

impl HttpProductFetcher {
    pub fn new(client: Client, base_url: &str) -> Result<Self, FetchError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        match Url::parse(&base) {
            Ok(base) => match base.join(PRODUCT_PATH) {
                Ok(endpoint) => Ok(HttpProductFetcher { client, endpoint }),
                Err(e) => Err(FetchError::Client(format!("Invalid product endpoint: {}", e))),
            },
            Err(e) => Err(FetchError::Client(format!("Invalid base url {}: {}", base_url, e))),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ProductFetcher for HttpProductFetcher {
    async fn fetch(&self) -> Result<Product, FetchError> {
        event!(Level::DEBUG, "Requesting product from {}", self.endpoint);

        let response = match self.client.get(self.endpoint.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                event!(Level::WARN, "Product request to {} failed: {}", self.endpoint, error_chain(&e));
                return Err(FetchError::from(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            event!(Level::WARN, "Product request returned status {}", status);
            return Err(FetchError::HttpError(status.as_u16()));
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let cause = error_chain(&e);
                event!(Level::WARN, "Failed to read product body: {}", cause);
                return Err(FetchError::NetworkFailure(cause));
            }
        };

        match serde_json::from_slice::<ProductResponse>(&body) {
            Ok(product_response) => {
                event!(Level::INFO, "Received product {}", product_response.id);
                Ok(product_response.into())
            }
            Err(e) => {
                event!(Level::WARN, "Failed to deserialize product: {}", e);
                Err(FetchError::ParseError(e.to_string()))
            }
        }
    }
}
