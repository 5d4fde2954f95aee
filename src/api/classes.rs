//! Class API handlers
//!
//! Bodies mirror the mobile client's DTOs, so lookups that take ids travel
//! as POST bodies rather than path segments.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::error_response;
use crate::domain::{CreateClassInput, UpdateClassInput};
use crate::infrastructure::AppState;
use crate::services::class_service::{self, FindAllClassesQuery};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassDto {
    pub class_id: String,
    #[serde(flatten)]
    pub changes: UpdateClassInput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClassDto {
    pub class_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindAllClassesDto {
    pub company_id: String,
    pub date: Option<String>,
    pub client_identification: Option<String>,
    pub booked_classes: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindAllClassesByDateDto {
    pub company_id: String,
    pub start_date: String,
    pub end_date: String,
}

/// Used by both booking and cancellation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassClientDto {
    pub class_id: String,
    pub client_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindNextClientClassDto {
    pub client_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindScheduledClassesDto {
    pub client_id: String,
    pub date: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateClassInput>,
) -> impl IntoResponse {
    match class_service::create_class(state.class_repo.as_ref(), payload).await {
        Ok(class) => (StatusCode::CREATED, Json(class)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<UpdateClassDto>,
) -> impl IntoResponse {
    match class_service::update_class(state.class_repo.as_ref(), &payload.class_id, payload.changes)
        .await
    {
        Ok(class) => (StatusCode::OK, Json(class)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Json(payload): Json<DeleteClassDto>,
) -> impl IntoResponse {
    match class_service::delete_class(state.class_repo.as_ref(), &payload.class_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Class deleted successfully" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match class_service::find_class_by_id(state.class_repo.as_ref(), &id).await {
        Ok(Some(class)) => (StatusCode::OK, Json(class)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Class not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn find_all(
    State(state): State<AppState>,
    Json(payload): Json<FindAllClassesDto>,
) -> impl IntoResponse {
    let query = FindAllClassesQuery {
        company_id: payload.company_id,
        date: payload.date,
        client_identification: payload.client_identification,
        booked_classes: payload.booked_classes.unwrap_or(false),
    };

    match class_service::find_all_classes(state.class_repo.as_ref(), query).await {
        Ok(classes) => (StatusCode::OK, Json(classes)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn find_all_by_date(
    State(state): State<AppState>,
    Json(payload): Json<FindAllClassesByDateDto>,
) -> impl IntoResponse {
    match class_service::find_all_classes_by_date(
        state.class_repo.as_ref(),
        &payload.company_id,
        &payload.start_date,
        &payload.end_date,
    )
    .await
    {
        Ok(classes) => (StatusCode::OK, Json(classes)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn book(
    State(state): State<AppState>,
    Json(payload): Json<ClassClientDto>,
) -> impl IntoResponse {
    match class_service::book_class(state.class_repo.as_ref(), &payload.class_id, &payload.client_id)
        .await
    {
        Ok(class) => (StatusCode::OK, Json(class)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn cancel(
    State(state): State<AppState>,
    Json(payload): Json<ClassClientDto>,
) -> impl IntoResponse {
    match class_service::cancel_class(
        state.class_repo.as_ref(),
        &payload.class_id,
        &payload.client_id,
    )
    .await
    {
        Ok(class) => (
            StatusCode::OK,
            Json(json!({
                "message": class_service::CANCELLED_MESSAGE,
                "class": class
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Responds with `null` when the client has no classes
pub async fn find_next(
    State(state): State<AppState>,
    Json(payload): Json<FindNextClientClassDto>,
) -> impl IntoResponse {
    match class_service::find_next_client_class(state.class_repo.as_ref(), &payload.client_id).await
    {
        Ok(next) => (StatusCode::OK, Json(next)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn clients_on_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match class_service::find_clients_on_class(state.class_repo.as_ref(), &id).await {
        Ok(clients) => (StatusCode::OK, Json(clients)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn scheduled(
    State(state): State<AppState>,
    Json(payload): Json<FindScheduledClassesDto>,
) -> impl IntoResponse {
    match class_service::find_scheduled_classes(
        state.class_repo.as_ref(),
        &payload.client_id,
        payload.date.as_deref(),
    )
    .await
    {
        Ok(classes) => (StatusCode::OK, Json(classes)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn scheduled_with_consults(
    State(state): State<AppState>,
    Json(payload): Json<FindScheduledClassesDto>,
) -> impl IntoResponse {
    match class_service::find_scheduled_classes_and_consults(
        state.class_repo.as_ref(),
        state.consult_repo.as_ref(),
        &payload.client_id,
        payload.date.as_deref(),
    )
    .await
    {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => error_response(e),
    }
}
