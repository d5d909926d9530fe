use actix_web::{App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

use posts_graphql::app::Application;
use posts_graphql::config::Config;
use posts_graphql::middleware::Viewer;
use posts_graphql::store::{PgPostStore, PostStore, MIGRATOR};
use posts_graphql::telemetry;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    info!("Starting posts GraphQL service...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.database.log_config();

    let pool = db_pool::create_pool(config.database.clone())
        .await
        .context("Unable to connect to database")?;

    if config.run_migrations {
        MIGRATOR
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Database migrations applied");
    }

    let store: Arc<dyn PostStore> = Arc::new(PgPostStore::new(pool));
    let viewer = Viewer::new(config.auth.acting_user_id);
    let application = Application::new(store, viewer, &config.graphql);

    info!(
        acting_user_id = %viewer,
        playground = config.graphql.playground,
        "GraphQL schema built"
    );

    let bind_addr = config.bind_addr();
    info!("GraphQL server starting on http://{}/graphql", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(|cfg| application.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await
    .context("Server failed")?;

    Ok(())
}
