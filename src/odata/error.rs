//! OData client error definitions.

use thiserror::Error;

/// Errors raised while building a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryBuildError {
    #[error("query has no entity type")]
    MissingEntityType,

    #[error("query has no entity key")]
    MissingEntityKey,

    /// Complex/value types cannot be addressed by key.
    #[error("type '{0}' has no entity set and cannot be queried")]
    NotAnEntity(&'static str),
}

/// Errors raised by the OData client and its transports.
#[derive(Debug, Error)]
pub enum ODataClientError {
    #[error("invalid query: {0}")]
    Query(#[from] QueryBuildError),

    #[error("model type '{0}' is not registered")]
    Unregistered(&'static str),

    #[error("query targets '{actual}' but '{expected}' was requested")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("invalid service uri '{0}'")]
    InvalidServiceUri(String),

    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("OData service returned status {status} for {resource}")]
    Status { status: u16, resource: String },

    #[error("OData transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode '{type_name}': {source}")]
    Decode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for OData client operations.
pub type ODataResult<T> = Result<T, ODataClientError>;
