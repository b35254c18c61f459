mod catalog;
mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod schema;

use std::sync::Arc;

use sea_orm::ConnectOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{catalog::Catalog, config::Config};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movie_catalog=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options.max_connections(config.max_connections).sqlx_logging(false);
    let db = db::connect_and_migrate(options).await?;
    tracing::info!(url = %config.database_url, "database ready");

    let state = Arc::new(AppState { catalog: Catalog::new(db) });

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
