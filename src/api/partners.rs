use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::error_response;
use crate::domain::CreatePartnerInput;
use crate::infrastructure::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreatePartnerInput>,
) -> impl IntoResponse {
    match state.partner_repo.create(payload).await {
        Ok(partner) => (StatusCode::CREATED, Json(partner)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_partner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.partner_repo.find_by_id(&id).await {
        Ok(Some(partner)) => (StatusCode::OK, Json(partner)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Partner not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
