//! HTTP API surface
//!
//! Exposes the two editor-facing endpoints under the `/imagen-flow/v1`
//! namespace. Responses always carry a JSON body with a `success` flag;
//! errors additionally map onto a meaningful status code.

use crate::app::App;
use crate::models::{GenerateRequest, GenerateResponse, SummarizeRequest, SummarizeResponse};
use crate::{Error, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tracing::{error, info};

pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/imagen-flow/v1/summarize", post(summarize))
        .route("/imagen-flow/v1/generate", post(generate))
        .with_state(app)
}

/// Binds `bind_address` and serves the API until ctrl-c.
pub async fn serve(app: Arc<App>, bind_address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install ctrl-c handler: {}", e);
    }
}

fn error_status(error: &Error) -> StatusCode {
    match error {
        Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        Error::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
        Error::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        Error::Upstream(_) | Error::Fetch(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn summarize(
    State(app): State<Arc<App>>,
    Json(request): Json<SummarizeRequest>,
) -> (StatusCode, Json<SummarizeResponse>) {
    match app.summarize(&request.content).await {
        Ok(essence) => (StatusCode::OK, Json(SummarizeResponse::ok(essence))),
        Err(e) => {
            error!("Summarize request failed: {}", e);
            (error_status(&e), Json(SummarizeResponse::error(e.to_string())))
        }
    }
}

async fn generate(
    State(app): State<Arc<App>>,
    Json(request): Json<GenerateRequest>,
) -> (StatusCode, Json<GenerateResponse>) {
    match app.generate(&request).await {
        Ok(outcome) => {
            // A batch succeeds when at least one image made it into the
            // library; a fully failed batch is an error response.
            let success = !outcome.images.is_empty();
            let status = if success {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            let message = if success {
                None
            } else {
                Some("No images could be saved to the media library".to_string())
            };
            (
                status,
                Json(GenerateResponse {
                    success,
                    images: outcome.images,
                    failures: outcome.failures,
                    message,
                }),
            )
        }
        Err(e) => {
            error!("Generate request failed: {}", e);
            (error_status(&e), Json(GenerateResponse::error(e.to_string())))
        }
    }
}
