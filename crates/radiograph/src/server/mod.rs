//! Web front-end: an upload page and a JSON diagnosis endpoint.
//!
//! Each `POST /diagnose` is one user interaction and is handled to
//! completion inside its own request; nothing is queued or shared between
//! requests beyond the read-only [`Radiograph`] service.

mod handlers;
mod page;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use radiograph_core::Radiograph;
use std::sync::Arc;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the application router.
pub fn router(radiograph: Arc<Radiograph>) -> Router {
    let max_upload = radiograph.config().limits.max_file_size_bytes();
    let body_limit = usize::try_from(max_upload)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/diagnose", post(handlers::post_diagnose))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(radiograph)
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn run(radiograph: Arc<Radiograph>, addr: &str) -> anyhow::Result<()> {
    let app = router(radiograph);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on: http://{}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to stop the server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
