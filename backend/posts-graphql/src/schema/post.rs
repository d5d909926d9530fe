//! Post queries, mutations and the post → user edge

use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result as GraphQLResult};
use tracing::error;

use super::loaders::UserLoader;
use crate::error::ApiError;
use crate::middleware::require_scope;
use crate::models::{Post, PostId, User};
use crate::service::posts;

/// Convert an operation failure into a field error, logging store faults
fn field_error(err: ApiError) -> async_graphql::Error {
    if let ApiError::Store(source) = &err {
        error!(error = %source, "Store operation failed");
    }
    err.extend()
}

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// Get a list of all posts
    async fn posts(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<Post>> {
        let scope = require_scope(ctx).map_err(field_error)?;

        posts::list_posts(scope.store()).await.map_err(field_error)
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    /// Creates a new post
    async fn create_post(&self, ctx: &Context<'_>, content: String) -> GraphQLResult<Post> {
        let scope = require_scope(ctx).map_err(field_error)?;

        posts::create_post(scope.store(), scope.viewer(), &content)
            .await
            .map_err(field_error)
    }

    /// Updates an existing post
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: PostId,
        content: String,
    ) -> GraphQLResult<Post> {
        let scope = require_scope(ctx).map_err(field_error)?;

        posts::update_post(scope.store(), scope.viewer(), id, &content)
            .await
            .map_err(field_error)
    }

    /// Deletes an existing post
    async fn delete_post(&self, ctx: &Context<'_>, id: PostId) -> GraphQLResult<bool> {
        let scope = require_scope(ctx).map_err(field_error)?;

        posts::delete_post(scope.store(), scope.viewer(), id)
            .await
            .map_err(field_error)
    }
}

#[ComplexObject]
impl Post {
    /// The user who created the post.
    async fn user(&self, ctx: &Context<'_>) -> GraphQLResult<User> {
        require_scope(ctx).map_err(field_error)?;

        let loader = ctx.data::<DataLoader<UserLoader>>()?;

        loader
            .load_one(self.owner_user_id)
            .await
            .map_err(|e| field_error(e.into()))?
            .ok_or_else(|| {
                field_error(ApiError::NotFound {
                    resource: "user",
                    id: self.owner_user_id,
                })
            })
    }
}
