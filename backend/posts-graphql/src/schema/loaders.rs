//! DataLoader implementations for N+1 query prevention
//!
//! Resolving `user` on every post of a list would otherwise cost one query per
//! post. The loader collects the owner ids requested in the same execution
//! tick and fetches them with a single `WHERE id = ANY($1)`.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::StoreError;
use crate::models::{User, UserId};
use crate::store::PostStore;

/// Batches user lookups by id
#[derive(Clone)]
pub struct UserLoader {
    store: Arc<dyn PostStore>,
}

impl UserLoader {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl Loader<UserId> for UserLoader {
    type Value = User;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[UserId]) -> Result<HashMap<UserId, Self::Value>, Self::Error> {
        let users = self.store.users_by_ids(keys).await.map_err(Arc::new)?;

        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }
}
