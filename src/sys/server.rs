use crate::sys::gemini::{QueryGenerator, SuggestRequest, SuggestResponse};
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::post,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

pub const SUGGEST_PATH: &str = "/api/suggest-query";

#[derive(Clone)]
pub struct ServerState {
    pub generator: Arc<dyn QueryGenerator>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(SUGGEST_PATH, post(suggest_query))
        .with_state(state)
}

/// The body is parsed by hand so a malformed request gets the same 500
/// payload as an upstream failure instead of axum's own rejection.
pub async fn suggest_query(
    State(state): State<ServerState>,
    body: Bytes,
) -> (StatusCode, Json<SuggestResponse>) {
    match generate(&state, &body).await {
        Ok(query) => (StatusCode::OK, Json(SuggestResponse::Query { query })),
        Err(e) => {
            log::error!("Query generation failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SuggestResponse::Error {
                    error: "Gemini failed".to_string(),
                }),
            )
        }
    }
}

async fn generate(state: &ServerState, body: &[u8]) -> Result<String> {
    let req: SuggestRequest =
        serde_json::from_slice(body).context("Invalid suggestion request body")?;
    state.generator.suggest_query(&req.title).await
}

pub async fn serve(addr: SocketAddr, state: ServerState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;
    log::info!("Suggestion endpoint listening on http://{}{}", addr, SUGGEST_PATH);
    println!("Listening on http://{}{}", addr, SUGGEST_PATH);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running suggestion server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        log::warn!("Failed to install Ctrl+C handler: {}", err);
    }
}
