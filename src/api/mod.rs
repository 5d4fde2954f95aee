pub mod classes;
pub mod clients;
pub mod companies;
pub mod consults;
pub mod health;
pub mod partners;
pub mod services;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

/// Render a domain error as `{"error": "..."}` with the matching status
pub fn error_response(e: DomainError) -> Response {
    let status = match &e {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Database(_) | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", e);
    }

    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Partners
        .route("/partners/create", post(partners::create))
        .route("/partners/:id", get(partners::get_partner))
        // Clients
        .route("/clients/create", post(clients::create))
        .route("/clients/:id", get(clients::get_client))
        // Companies
        .route("/companies/create", post(companies::create))
        .route("/companies/findAll", get(companies::find_all))
        .route("/companies/findByPartnerId", post(companies::find_by_partner_id))
        .route("/companies/:id", get(companies::get_company))
        // Services
        .route("/services/create", post(services::create))
        .route("/services/findAll", get(services::find_all))
        .route("/services/findByPartnerId", post(services::find_by_partner_id))
        .route("/services/update", post(services::update))
        // Consults
        .route("/consults/create", post(consults::create))
        .route("/consults/findByClient", post(consults::find_by_client))
        // Classes
        .route("/classes/create", post(classes::create))
        .route("/classes/update", post(classes::update))
        .route("/classes/delete", post(classes::delete))
        .route("/classes/findAll", post(classes::find_all))
        .route("/classes/findAllByDate", post(classes::find_all_by_date))
        .route("/classes/book", post(classes::book))
        .route("/classes/cancel", post(classes::cancel))
        .route("/classes/findNext", post(classes::find_next))
        .route("/classes/scheduled", post(classes::scheduled))
        .route(
            "/classes/scheduledWithConsults",
            post(classes::scheduled_with_consults),
        )
        .route("/classes/:id", get(classes::get_class))
        .route("/classes/:id/clients", get(classes::clients_on_class))
        .with_state(state)
}
