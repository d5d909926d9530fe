//! Store layer: one method per database interaction
//!
//! Resolvers never touch SQL directly; they go through [`PostStore`] so the
//! Postgres implementation can be swapped for a test double.

mod postgres;

pub use postgres::{PgPostStore, MIGRATOR};

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{Post, PostId, User, UserId};

#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, in store-determined order
    async fn list_posts(&self) -> StoreResult<Vec<Post>>;

    /// Insert a post owned by `owner` and return it with its assigned id
    async fn insert_post(&self, owner: UserId, content: &str) -> StoreResult<Post>;

    /// Owner of the post, or `None` if no post has this id
    async fn post_owner(&self, id: PostId) -> StoreResult<Option<UserId>>;

    /// Overwrite a post's content. `None` when the row no longer exists.
    async fn update_post_content(&self, id: PostId, content: &str) -> StoreResult<Option<Post>>;

    /// Delete a post, returning the number of rows removed
    async fn delete_post(&self, id: PostId) -> StoreResult<u64>;

    /// Users whose id is in `ids`. Unknown ids are simply absent from the result.
    async fn users_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>>;
}
