use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::error_response;
use crate::domain::CreateClientInput;
use crate::infrastructure::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientInput>,
) -> impl IntoResponse {
    match state.client_repo.create(payload).await {
        Ok(client) => (StatusCode::CREATED, Json(client)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.client_repo.find_by_id(&id).await {
        Ok(Some(client)) => (StatusCode::OK, Json(client)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Client not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
