//! Record shapes for the two relations the service reads and writes

use async_graphql::SimpleObject;

pub type PostId = i32;
pub type UserId = i32;

/// A row of `posts`. The `user` edge is resolved in `schema::post`.
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
#[graphql(complex)]
pub struct Post {
    /// The ID of the post.
    pub id: PostId,
    /// The content of the post.
    pub content: String,
    /// The ID of the user who created the post.
    #[graphql(name = "userId")]
    #[sqlx(rename = "user_id")]
    pub owner_user_id: UserId,
}

/// A row of `users`. Read-only from this service.
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// The ID of the user.
    pub id: UserId,
    /// The username of the user.
    pub username: String,
}
