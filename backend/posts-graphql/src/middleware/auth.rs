//! Request identity and authorization helpers for GraphQL resolvers
//!
//! There is no login flow: the acting user is fixed by configuration and
//! attached to every execution as part of a [`RequestScope`].

use async_graphql::Context;
use std::fmt;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::UserId;
use crate::store::PostStore;

/// The user on whose behalf a request executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer(UserId);

impl Viewer {
    pub fn new(user_id: UserId) -> Self {
        Self(user_id)
    }

    pub fn user_id(self) -> UserId {
        self.0
    }
}

impl fmt::Display for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything a resolver needs from the dispatching layer, built once per request
#[derive(Clone)]
pub struct RequestScope {
    store: Arc<dyn PostStore>,
    viewer: Viewer,
}

impl RequestScope {
    pub fn new(store: Arc<dyn PostStore>, viewer: Viewer) -> Self {
        Self { store, viewer }
    }

    pub fn store(&self) -> &dyn PostStore {
        self.store.as_ref()
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer
    }
}

/// Fetch the request scope, failing closed when the endpoint did not attach one
pub fn require_scope<'a>(ctx: &'a Context<'_>) -> Result<&'a RequestScope, ApiError> {
    ctx.data::<RequestScope>().map_err(|_| ApiError::Unauthenticated)
}

/// Check that the acting user owns the resource before `action` proceeds
pub fn check_owner(viewer: Viewer, owner_id: UserId, action: &'static str) -> Result<(), ApiError> {
    if viewer.user_id() != owner_id {
        return Err(ApiError::Forbidden { action });
    }

    Ok(())
}
