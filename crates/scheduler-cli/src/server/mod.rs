//! HTTP API and static front-end.

pub mod error;
pub mod routes;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::util::Lifecycle;

#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<Lifecycle>,
}

impl AppState {
    pub fn new(lifecycle: Lifecycle) -> Self {
        Self {
            lifecycle: Arc::new(lifecycle),
        }
    }
}

/// Builds the application: `/api` routes, then static files from `web_dir`
/// for everything else when that directory exists.
pub fn app(state: AppState, web_dir: &Path) -> Router {
    let mut app = Router::new()
        .nest("/api", routes::api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if web_dir.exists() {
        info!(web_dir = %web_dir.display(), "serving static files");
        app = app.fallback_service(ServeDir::new(web_dir).append_index_html_on_directories(true));
    } else {
        info!(web_dir = %web_dir.display(), "web directory not found, API-only mode");
    }
    app
}

pub async fn serve(config: &Config, lifecycle: Lifecycle) -> anyhow::Result<()> {
    let app = app(AppState::new(lifecycle), &config.web_dir);

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
