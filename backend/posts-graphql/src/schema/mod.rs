//! GraphQL schema
//!
//! Built once at startup. The user loader is the only schema-level data; the
//! store handle and acting user travel per request in a `RequestScope`.

pub mod loaders;
pub mod post;

use async_graphql::{dataloader::DataLoader, EmptySubscription, MergedObject, Schema};
use std::sync::Arc;

use crate::config::GraphQLConfig;
use crate::store::PostStore;

/// Root query object
#[derive(MergedObject, Default)]
#[graphql(name = "RootQuery")]
pub struct QueryRoot(post::PostQuery);

/// Root mutation object
#[derive(MergedObject, Default)]
#[graphql(name = "RootMutation")]
pub struct MutationRoot(post::PostMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with query limits from `config`
pub fn build_schema(store: Arc<dyn PostStore>, config: &GraphQLConfig) -> AppSchema {
    let builder = Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(DataLoader::new(loaders::UserLoader::new(store), tokio::task::spawn))
    .limit_depth(config.max_depth)
    .limit_complexity(config.max_complexity);

    if config.introspection {
        builder.finish()
    } else {
        builder.disable_introspection().finish()
    }
}
