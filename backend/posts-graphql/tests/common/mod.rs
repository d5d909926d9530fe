//! Shared fixtures: an in-memory `PostStore` and schema helpers
#![allow(dead_code)]

use async_graphql::{Request, Response};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use posts_graphql::config::GraphQLConfig;
use posts_graphql::error::{StoreError, StoreResult};
use posts_graphql::middleware::{RequestScope, Viewer};
use posts_graphql::models::{Post, PostId, User, UserId};
use posts_graphql::schema::{build_schema, AppSchema};
use posts_graphql::store::PostStore;

#[derive(Default)]
struct State {
    next_post_id: PostId,
    posts: BTreeMap<PostId, Post>,
    users: BTreeMap<UserId, User>,
}

/// Mirrors the Postgres store: serial ids, id ordering, foreign key on owner
#[derive(Default)]
pub struct InMemoryPostStore {
    state: RwLock<State>,
    failing: AtomicBool,
    failing_users: AtomicBool,
    user_batches: AtomicUsize,
}

impl InMemoryPostStore {
    pub fn with_users(users: &[(UserId, &str)]) -> Arc<Self> {
        let store = Self::default();
        {
            let mut state = store.state.try_write().expect("fresh store is unlocked");
            for (id, username) in users {
                state.users.insert(
                    *id,
                    User {
                        id: *id,
                        username: username.to_string(),
                    },
                );
            }
        }
        Arc::new(store)
    }

    /// Make every subsequent call fail like an unreachable database
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Fail only user lookups, leaving post reads and writes intact
    pub fn set_failing_users(&self, failing: bool) {
        self.failing_users.store(failing, Ordering::SeqCst);
    }

    /// Number of `users_by_ids` calls so far
    pub fn user_batches(&self) -> usize {
        self.user_batches.load(Ordering::SeqCst)
    }

    pub async fn content_of(&self, id: PostId) -> Option<String> {
        self.state.read().await.posts.get(&id).map(|p| p.content.clone())
    }

    pub async fn post_count(&self) -> usize {
        self.state.read().await.posts.len()
    }

    /// Insert a post without the foreign-key check
    pub async fn insert_orphan_post(&self, owner: UserId, content: &str) -> Post {
        let mut state = self.state.write().await;
        state.next_post_id += 1;
        let post = Post {
            id: state.next_post_id,
            content: content.to_string(),
            owner_user_id: owner,
        };
        state.posts.insert(post.id, post.clone());
        post
    }

    fn check_available(&self, operation: &'static str) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::new(operation, sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        self.check_available("list posts")?;
        Ok(self.state.read().await.posts.values().cloned().collect())
    }

    async fn insert_post(&self, owner: UserId, content: &str) -> StoreResult<Post> {
        self.check_available("create post")?;
        let mut state = self.state.write().await;
        if !state.users.contains_key(&owner) {
            return Err(StoreError::new(
                "create post",
                sqlx::Error::Protocol("insert violates foreign key constraint posts_user_id_fkey".to_string()),
            ));
        }
        state.next_post_id += 1;
        let post = Post {
            id: state.next_post_id,
            content: content.to_string(),
            owner_user_id: owner,
        };
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn post_owner(&self, id: PostId) -> StoreResult<Option<UserId>> {
        self.check_available("check post ownership")?;
        Ok(self.state.read().await.posts.get(&id).map(|p| p.owner_user_id))
    }

    async fn update_post_content(&self, id: PostId, content: &str) -> StoreResult<Option<Post>> {
        self.check_available("update post")?;
        let mut state = self.state.write().await;
        Ok(state.posts.get_mut(&id).map(|post| {
            post.content = content.to_string();
            post.clone()
        }))
    }

    async fn delete_post(&self, id: PostId) -> StoreResult<u64> {
        self.check_available("delete post")?;
        let removed = self.state.write().await.posts.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        self.check_available("fetch user")?;
        if self.failing_users.load(Ordering::SeqCst) {
            return Err(StoreError::new("fetch user", sqlx::Error::PoolTimedOut));
        }
        self.user_batches.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().await;
        Ok(ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }
}

pub fn schema_for(store: Arc<InMemoryPostStore>) -> AppSchema {
    build_schema(store, &GraphQLConfig::default())
}

/// Execute `query` as `user_id` with a request scope attached
pub async fn execute_as(
    schema: &AppSchema,
    store: &Arc<InMemoryPostStore>,
    user_id: UserId,
    query: &str,
) -> Response {
    let store: Arc<dyn PostStore> = store.clone();
    let request = Request::new(query).data(RequestScope::new(store, Viewer::new(user_id)));
    schema.execute(request).await
}

/// `extensions.code` of every error in the response
pub fn error_codes(response: &Response) -> Vec<String> {
    response
        .errors
        .iter()
        .map(|e| {
            let json = serde_json::to_value(e).expect("server errors serialize");
            json["extensions"]["code"].as_str().unwrap_or_default().to_string()
        })
        .collect()
}

pub fn data_json(response: Response) -> serde_json::Value {
    response.data.into_json().expect("response data converts to JSON")
}
