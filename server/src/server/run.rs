//! Router assembly and the serve loop.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::{http, AppState};

const WEB_DIR: &str = "web";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::health))
        .route("/rooms", get(http::list_rooms).post(http::create_room))
        .route("/rooms/:room_id/join", post(http::join_room))
        .route("/rooms/:room_id/start", post(http::start_hand))
        .route("/rooms/:room_id/action", post(http::player_action))
        .route("/rooms/:room_id", get(http::room_state))
        .nest_service("/assets", ServeDir::new(WEB_DIR))
        .route("/", get(serve_index))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state);
    tracing::info!(%addr, "poker server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("serving HTTP")?;
    Ok(())
}

/// The bundled front page when a `web/` directory exists, a JSON banner
/// otherwise.
async fn serve_index() -> impl IntoResponse {
    let index = Path::new(WEB_DIR).join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(content) => (
            axum::http::StatusCode::OK,
            [("content-type", "text/html")],
            content,
        )
            .into_response(),
        Err(_) => Json(serde_json::json!({ "message": "DeepSeek Poker API" })).into_response(),
    }
}
