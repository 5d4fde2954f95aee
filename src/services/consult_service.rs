//! Consult Service - booking a service for a client

use super::class_service::normalize_date;
use crate::domain::{Consult, ConsultRepository, CreateConsultInput, DomainError};

pub async fn create_consult(
    repo: &dyn ConsultRepository,
    mut input: CreateConsultInput,
) -> Result<Consult, DomainError> {
    input.date = normalize_date(&input.date)?;

    let consult = repo.create(input).await?;
    tracing::info!(
        "Client {} booked service {} on {}",
        consult.client_id,
        consult.service_id,
        consult.date
    );
    Ok(consult)
}

pub async fn find_client_consults(
    repo: &dyn ConsultRepository,
    client_id: &str,
    date: Option<&str>,
) -> Result<Vec<Consult>, DomainError> {
    let date = date.map(normalize_date).transpose()?;
    repo.find_by_client(client_id, date.as_deref()).await
}
