//! axum 기반 리뷰 서비스 HTTP 인터페이스.

mod error;
mod identity;
mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use tokio::signal;

use crate::interface::composition::AppComposition;

pub use error::{ApiError, ApiResult};
pub use identity::CallerIdentity;

/// 서비스 라우터를 구성한다.
pub fn router(app: Arc<AppComposition>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/review", post(routes::submit_review))
        .route(
            "/api/history",
            get(routes::get_history).delete(routes::clear_history),
        )
        .route("/api/feedback", post(routes::submit_feedback))
        .route("/api/chat", post(routes::chat))
        .route("/api/chathistory", get(routes::chat_history))
        .with_state(app)
}

/// 주소에 바인딩해 Ctrl+C까지 서비스한다.
pub async fn serve(app: Arc<AppComposition>, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(
        address = %listener.local_addr()?,
        model = app.review_model(),
        "prlens service listening"
    );

    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("prlens service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
