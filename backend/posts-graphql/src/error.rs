//! Error types for the posts service
//!
//! Store failures carry the name of the operation that failed. Resolver-facing
//! errors map onto a stable `extensions.code` so clients can tell an ownership
//! rejection from a missing row or an unreachable database.

use async_graphql::ErrorExtensions;
use std::sync::Arc;
use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure raised by the store layer (connection, query or row decoding)
#[derive(Debug, Error)]
#[error("failed to {operation}: {source}")]
pub struct StoreError {
    pub operation: &'static str,
    #[source]
    pub source: sqlx::Error,
}

impl StoreError {
    pub fn new(operation: &'static str, source: sqlx::Error) -> Self {
        Self { operation, source }
    }
}

/// Errors surfaced by post operations and resolvers
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No request scope (store handle plus acting user) was attached
    #[error("user not authenticated")]
    Unauthenticated,

    /// Acting user does not own the resource
    #[error("unauthorized: you can only {action} your own posts")]
    Forbidden { action: &'static str },

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error(transparent)]
    Store(#[from] Arc<StoreError>),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Store(_) => "INTERNAL",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(Arc::new(err))
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| ext.set("code", self.code()))
    }
}
