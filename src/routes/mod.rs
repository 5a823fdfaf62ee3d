//! API routes
//!
//! The chat widget talks JSON to these three endpoints. Failures cross the
//! boundary as explicit status codes with a JSON error body, so whatever
//! front-end sits on top decides how to render them.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::chat::{self, ChatError};
use crate::conversation::DisplayTurn;
use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<DisplayTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatTurnResponse {
    pub reply: String,
    pub history: Vec<DisplayTurn>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub input: String,
    pub history: Vec<DisplayTurn>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub struct ApiError(ChatError);

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ChatError::Provider(_) => StatusCode::BAD_GATEWAY,
        };

        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatTurnResponse>, ApiError> {
    let history = state
        .chain
        .send_turn(&request.message, &request.history)
        .await?;

    let reply = history
        .last()
        .map(|turn| turn.assistant.clone())
        .unwrap_or_default();

    Ok(Json(ChatTurnResponse { reply, history }))
}

async fn clear_chat() -> Json<ResetResponse> {
    let (input, history) = chat::reset();
    Json(ResetResponse { input, history })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/chat", post(send_message))
        .route("/v1/reset", post(clear_chat))
}
