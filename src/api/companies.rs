//! Company API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::error_response;
use crate::domain::CreateCompanyInput;
use crate::infrastructure::AppState;
use crate::services::company_service;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindCompanyByPartnerIdDto {
    pub partner_id: String,
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateCompanyInput>,
) -> impl IntoResponse {
    match company_service::create_company(state.company_repo.as_ref(), payload).await {
        Ok(company) => (StatusCode::CREATED, Json(company)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn find_all(State(state): State<AppState>) -> impl IntoResponse {
    match company_service::find_all_companies(state.company_repo.as_ref()).await {
        Ok(companies) => (StatusCode::OK, Json(companies)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn find_by_partner_id(
    State(state): State<AppState>,
    Json(payload): Json<FindCompanyByPartnerIdDto>,
) -> impl IntoResponse {
    match company_service::find_companies_by_partner(state.company_repo.as_ref(), &payload.partner_id)
        .await
    {
        Ok(companies) => (StatusCode::OK, Json(companies)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match company_service::find_company(state.company_repo.as_ref(), &id).await {
        Ok(Some(company)) => (StatusCode::OK, Json(company)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Company not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
