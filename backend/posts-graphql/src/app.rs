//! Application assembly and HTTP routes
//!
//! [`Application`] owns the schema, the store handle and the acting user. It is
//! built once in `main` and cloned into every actix worker; nothing else in
//! the process holds state across requests.

use actix_web::{web, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use std::sync::Arc;

use crate::config::GraphQLConfig;
use crate::middleware::{RequestScope, Viewer};
use crate::schema::{build_schema, AppSchema};
use crate::store::PostStore;

pub const LIVENESS_TEXT: &str = "GraphQL server is running at /graphql";

#[derive(Clone)]
pub struct Application {
    schema: AppSchema,
    store: Arc<dyn PostStore>,
    viewer: Viewer,
    playground: bool,
}

impl Application {
    pub fn new(store: Arc<dyn PostStore>, viewer: Viewer, graphql: &GraphQLConfig) -> Self {
        Self {
            schema: build_schema(store.clone(), graphql),
            store,
            viewer,
            playground: graphql.playground,
        }
    }

    pub fn schema(&self) -> &AppSchema {
        &self.schema
    }

    /// Scope attached to each execution. Simulates a logged-in user.
    pub fn request_scope(&self) -> RequestScope {
        RequestScope::new(self.store.clone(), self.viewer)
    }

    /// Register shared state and routes on an actix `App`
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.clone()))
            .route("/graphql", web::post().to(graphql_handler))
            .route("/graphql/schema", web::get().to(schema_handler))
            .route("/health", web::get().to(health_handler))
            .route("/", web::get().to(root_handler));

        if self.playground {
            cfg.route("/playground", web::get().to(playground_handler));
        }
    }
}

async fn graphql_handler(app: web::Data<Application>, req: GraphQLRequest) -> GraphQLResponse {
    let request = req.into_inner().data(app.request_scope());
    app.schema.execute(request).await.into()
}

async fn root_handler() -> &'static str {
    LIVENESS_TEXT
}

async fn health_handler() -> &'static str {
    "ok"
}

/// SDL (Schema Definition Language) endpoint for client code generation
async fn schema_handler(app: web::Data<Application>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body(app.schema.sdl())
}

async fn playground_handler() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
