//! Company Service - thin pass-through to CompanyRepository

use crate::domain::{Company, CompanyRepository, CreateCompanyInput, DomainError};

pub async fn create_company(
    repo: &dyn CompanyRepository,
    input: CreateCompanyInput,
) -> Result<Company, DomainError> {
    let company = repo.create(input).await?;
    tracing::info!("Registered company {} for partner {}", company.id, company.partner_id);
    Ok(company)
}

pub async fn find_all_companies(repo: &dyn CompanyRepository) -> Result<Vec<Company>, DomainError> {
    repo.find_all().await
}

pub async fn find_companies_by_partner(
    repo: &dyn CompanyRepository,
    partner_id: &str,
) -> Result<Vec<Company>, DomainError> {
    repo.find_by_partner_id(partner_id).await
}

pub async fn find_company(
    repo: &dyn CompanyRepository,
    id: &str,
) -> Result<Option<Company>, DomainError> {
    repo.find_one_by_id(id).await
}
