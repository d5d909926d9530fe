//! Post operations behind the GraphQL fields
//!
//! Each operation takes the store and the acting user explicitly. Mutations of
//! an existing post look up its owner first and abort without side effects
//! when the acting user is someone else.

use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::middleware::{check_owner, Viewer};
use crate::models::{Post, PostId};
use crate::store::PostStore;

pub async fn list_posts(store: &dyn PostStore) -> Result<Vec<Post>, ApiError> {
    let posts = store.list_posts().await?;
    debug!(count = posts.len(), "Listed posts");
    Ok(posts)
}

pub async fn create_post(
    store: &dyn PostStore,
    viewer: Viewer,
    content: &str,
) -> Result<Post, ApiError> {
    let post = store.insert_post(viewer.user_id(), content).await?;
    info!(post_id = post.id, user_id = %viewer, "Post created");
    Ok(post)
}

pub async fn update_post(
    store: &dyn PostStore,
    viewer: Viewer,
    id: PostId,
    content: &str,
) -> Result<Post, ApiError> {
    let owner = store
        .post_owner(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "post", id })?;

    if let Err(e) = check_owner(viewer, owner, "update") {
        warn!(post_id = id, user_id = %viewer, owner_id = owner, "Rejected update of foreign post");
        return Err(e);
    }

    // The row can disappear between the ownership check and the update.
    let post = store
        .update_post_content(id, content)
        .await?
        .ok_or(ApiError::NotFound { resource: "post", id })?;

    info!(post_id = id, user_id = %viewer, "Post updated");
    Ok(post)
}

/// Returns `false` when there was nothing to delete.
pub async fn delete_post(store: &dyn PostStore, viewer: Viewer, id: PostId) -> Result<bool, ApiError> {
    let Some(owner) = store.post_owner(id).await? else {
        debug!(post_id = id, "Delete of missing post");
        return Ok(false);
    };

    if let Err(e) = check_owner(viewer, owner, "delete") {
        warn!(post_id = id, user_id = %viewer, owner_id = owner, "Rejected delete of foreign post");
        return Err(e);
    }

    let removed = store.delete_post(id).await?;
    info!(post_id = id, user_id = %viewer, removed, "Post deleted");
    Ok(removed > 0)
}

