//! Router for the chat API

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use super::public;
use crate::agent::BookingAgent;
use crate::api::state::AppState;
use crate::google::GcalClient;

type SharedState = Arc<RwLock<AppState>>;

/// Run one chat message through the booking pipeline. The agent owns all
/// booking failure modes, so this handler only rejects empty input.
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    if payload.message.trim().is_empty() {
        return Ok((StatusCode::BAD_REQUEST, "Message is required").into_response());
    }

    let config = {
        let shared_state = state.read().expect("Unable to read shared state");
        shared_state.config.clone()
    };

    let agent = BookingAgent::new(config.timezone, GcalClient::from_config(&config));
    let response = agent.handle(&payload.message).await;

    Ok(axum::Json(public::ChatResponse::success(response)).into_response())
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler))
}
