use actix_governor::{Governor, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod config;
mod controller;
mod db;
mod docs;
mod error;
mod flash;
mod model;
mod models;
mod repository;
mod routes;
mod service;
mod validation;
mod view;

use config::Config;
use db::{ensure_schema, init_db};
use repository::Repositories;
use routes::AppState;

use crate::docs::ApiDoc;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(addr = %config.server_addr, "Server starting...");

    let repos = if config.uses_memory_store() {
        warn!("DATABASE_URL=memory, records will not survive a restart");
        Repositories::in_memory()
    } else {
        let pool = init_db(&config.database_url, config.db_max_connections).await?;
        ensure_schema(&pool).await?;
        Repositories::mysql(pool)
    };

    let state = AppState::new(&repos, config.api_prefix.clone())?;

    // One token every 60s / rate, bursting up to the full per-minute budget
    let per_ms = 60_000 / u64::from(config.rate_per_min.max(1));
    let governor_conf = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms.max(1))
        .burst_size(config.rate_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("Invalid RATE_PER_MIN")?;

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .configure(|cfg| routes::configure(cfg, state.clone()))
    })
    .bind(&config.server_addr)
    .with_context(|| format!("Failed to bind {}", config.server_addr))?
    .run()
    .await
    .context("Server error")
}
