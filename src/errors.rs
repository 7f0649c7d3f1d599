use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("network request failed: {0}")]
    NetworkFailure(String),
    #[error("request failed with status code {0}")]
    HttpError(u16),
    #[error("failed to parse product: {0}")]
    ParseError(String),
    #[error("failed to configure http client: {0}")]
    Client(String),
}

impl FetchError {
    pub fn is_network_failure(&self) -> bool {
        matches!(self, FetchError::NetworkFailure(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::HttpError(status.as_u16()),
            None => FetchError::NetworkFailure(error_chain(&e)),
        }
    }
}

/// Joins an error with every `source()` beneath it, outermost first.
pub fn error_chain(e: &dyn StdError) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        inner: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.inner.as_deref().map(|l| l as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn error_chain_includes_every_source() {
        let e = Layer {
            message: "error decoding response body",
            inner: Some(Box::new(Layer {
                message: "request or response body error",
                inner: Some(Box::new(Layer { message: "operation timed out", inner: None })),
            })),
        };

        assert_eq!(
            error_chain(&e),
            "error decoding response body: request or response body error: operation timed out"
        );
    }

    #[test]
    fn error_chain_skips_causes_already_in_the_message() {
        let e = Layer {
            message: "connect failed: connection refused",
            inner: Some(Box::new(Layer { message: "connection refused", inner: None })),
        };

        assert_eq!(error_chain(&e), "connect failed: connection refused");
    }
}
