//! Catalog Service - the services (offerings) partners sell

use crate::domain::{
    CreateServiceInput, DomainError, Service, ServiceFilter, ServiceRepository,
    UpdateServiceInput,
};

pub async fn create_service(
    repo: &dyn ServiceRepository,
    input: CreateServiceInput,
) -> Result<Service, DomainError> {
    let service = repo.create(input).await?;
    tracing::info!("Created service {} for partner {}", service.id, service.partner_id);
    Ok(service)
}

pub async fn find_all_services(
    repo: &dyn ServiceRepository,
    filter: ServiceFilter,
) -> Result<Vec<Service>, DomainError> {
    repo.find_all(filter).await
}

pub async fn find_services_by_partner(
    repo: &dyn ServiceRepository,
    partner_id: &str,
) -> Result<Vec<Service>, DomainError> {
    repo.find_by_partner_id(partner_id).await
}

pub async fn update_service(
    repo: &dyn ServiceRepository,
    id: &str,
    input: UpdateServiceInput,
) -> Result<Service, DomainError> {
    repo.update(id, input).await
}
