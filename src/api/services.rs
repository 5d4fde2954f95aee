//! Services controller - offerings that clients book as consults

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use super::error_response;
use crate::domain::{CreateServiceInput, DomainError, ServiceFilter, UpdateServiceInput};
use crate::infrastructure::AppState;
use crate::services::catalog_service;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindByPartnerIdDto {
    pub partner_id: String,
}

/// Update keyed by `id`; absent fields are left as they are
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceDto {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i32>,
}

impl From<UpdateServiceDto> for UpdateServiceInput {
    fn from(dto: UpdateServiceDto) -> Self {
        UpdateServiceInput {
            name: dto.name,
            description: dto.description.map(Some),
            price: dto.price.map(Some),
            duration_minutes: dto.duration_minutes.map(Some),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/services/create",
    request_body = CreateServiceInput,
    responses(
        (status = 201, description = "Service created", body = Service),
        (status = 404, description = "Partner not found")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateServiceInput>,
) -> impl IntoResponse {
    match catalog_service::create_service(state.service_repo.as_ref(), payload).await {
        Ok(service) => (StatusCode::CREATED, Json(service)).into_response(),
        Err(e) => error_response(e),
    }
}

/// The filter travels in the body of a GET; a missing or empty body lists
/// everything, a malformed one is a 400
#[utoipa::path(
    get,
    path = "/api/services/findAll",
    request_body = ServiceFilter,
    responses(
        (status = 200, description = "Matching services", body = [Service]),
        (status = 400, description = "Malformed filter")
    )
)]
pub async fn find_all(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let filter = if body.iter().all(u8::is_ascii_whitespace) {
        ServiceFilter::default()
    } else {
        match Json::<ServiceFilter>::from_bytes(&body) {
            Ok(Json(filter)) => filter,
            Err(rejection) => {
                return error_response(DomainError::Validation(rejection.body_text()))
            }
        }
    };

    match catalog_service::find_all_services(state.service_repo.as_ref(), filter).await {
        Ok(services) => (StatusCode::OK, Json(services)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/services/findByPartnerId",
    request_body = FindByPartnerIdDto,
    responses(
        (status = 200, description = "Services of the partner", body = [Service])
    )
)]
pub async fn find_by_partner_id(
    State(state): State<AppState>,
    Json(payload): Json<FindByPartnerIdDto>,
) -> impl IntoResponse {
    match catalog_service::find_services_by_partner(state.service_repo.as_ref(), &payload.partner_id)
        .await
    {
        Ok(services) => (StatusCode::OK, Json(services)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/services/update",
    request_body = UpdateServiceDto,
    responses(
        (status = 200, description = "Service updated", body = Service),
        (status = 404, description = "Service not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<UpdateServiceDto>,
) -> impl IntoResponse {
    let id = payload.id.clone();

    match catalog_service::update_service(state.service_repo.as_ref(), &id, payload.into()).await {
        Ok(service) => (StatusCode::OK, Json(service)).into_response(),
        Err(e) => error_response(e),
    }
}
