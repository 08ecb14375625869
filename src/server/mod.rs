//! HTTP server
//!
//! Lesson routes are nested under `/api`.

pub mod routes;
pub mod state;

pub use state::AppState;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::store::LessonStore;

/// Build the application router around `state`
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(routes::health))
        .route(
            "/lessons",
            get(routes::list_lessons).post(routes::create_lesson),
        )
        .route(
            "/lessons/:id",
            get(routes::get_lesson).delete(routes::delete_lesson),
        )
        .route("/lessons/:id/continue", post(routes::continue_lesson));

    Router::new()
        .route("/", get(routes::root))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build state from `config` and serve until the process is stopped
pub async fn run_server(config: &Config) -> Result<()> {
    let store = if config.server.seed_examples {
        LessonStore::with_examples()?
    } else {
        LessonStore::new()
    };
    let llm = config.llm.build_client()?;
    let state = AppState::new(Arc::new(store), Arc::new(llm));

    let port = config.server.port;
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await {
        Ok(l) => l,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            tracing::error!(port, "port is already in use, try `lessonsmith serve --port <PORT>`");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(port, "server running on http://localhost:{}", port);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
