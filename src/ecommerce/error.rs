//! Domain-level error for e-commerce services.

use std::error::Error as StdError;

use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The single error type surfaced by e-commerce services.
///
/// Not-found, transport and decoding failures are not distinguished here;
/// callers that care inspect [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ECommerceError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ECommerceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Underlying cause downcast to a concrete error type.
    pub fn cause<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.as_deref().and_then(|e| e.downcast_ref::<E>())
    }
}
