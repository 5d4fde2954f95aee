use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;

use super::error_response;
use crate::domain::CreateConsultInput;
use crate::infrastructure::AppState;
use crate::services::consult_service;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindClientConsultsDto {
    pub client_id: String,
    pub date: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateConsultInput>,
) -> impl IntoResponse {
    match consult_service::create_consult(state.consult_repo.as_ref(), payload).await {
        Ok(consult) => (StatusCode::CREATED, Json(consult)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn find_by_client(
    State(state): State<AppState>,
    Json(payload): Json<FindClientConsultsDto>,
) -> impl IntoResponse {
    match consult_service::find_client_consults(
        state.consult_repo.as_ref(),
        &payload.client_id,
        payload.date.as_deref(),
    )
    .await
    {
        Ok(consults) => (StatusCode::OK, Json(consults)).into_response(),
        Err(e) => error_response(e),
    }
}
