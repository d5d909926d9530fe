use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::debug;

use super::PostStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{Post, PostId, User, UserId};

/// Creates `users` and `posts`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// sqlx-backed [`PostStore`] over a shared connection pool
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        sqlx::query_as::<_, Post>("SELECT id, user_id, content FROM posts ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::new("list posts", e))
    }

    async fn insert_post(&self, owner: UserId, content: &str) -> StoreResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, content)
            VALUES ($1, $2)
            RETURNING id, user_id, content
            "#,
        )
        .bind(owner)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::new("create post", e))?;

        debug!(post_id = post.id, user_id = owner, "Inserted post");
        Ok(post)
    }

    async fn post_owner(&self, id: PostId) -> StoreResult<Option<UserId>> {
        sqlx::query_scalar::<_, UserId>("SELECT user_id FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::new("check post ownership", e))
    }

    async fn update_post_content(&self, id: PostId, content: &str) -> StoreResult<Option<Post>> {
        sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET content = $1
            WHERE id = $2
            RETURNING id, user_id, content
            "#,
        )
        .bind(content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::new("update post", e))
    }

    async fn delete_post(&self, id: PostId) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::new("delete post", e))?;

        Ok(result.rows_affected())
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::new("fetch user", e))
    }
}
