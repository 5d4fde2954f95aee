//! SeaORM implementation of CompanyRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{Company, CompanyRepository, CreateCompanyInput, DomainError};
use crate::models::company::{self, ActiveModel, Column, Entity as CompanyEntity};
use crate::models::partner::Entity as PartnerEntity;

impl From<company::Model> for Company {
    fn from(c: company::Model) -> Self {
        Company {
            id: c.id,
            name: c.name,
            banner_image: c.banner_image,
            logo_image: c.logo_image,
            partner_id: c.partner_id,
            address: c.address,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// SeaORM-based implementation of CompanyRepository
pub struct SeaOrmCompanyRepository {
    db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn create(&self, input: CreateCompanyInput) -> Result<Company, DomainError> {
        if PartnerEntity::find_by_id(input.partner_id.as_str())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound);
        }

        let now = chrono::Utc::now().to_rfc3339();

        let company = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(input.name),
            banner_image: Set(input.banner_image),
            logo_image: Set(input.logo_image),
            partner_id: Set(input.partner_id),
            address: Set(input.address),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = company.insert(&self.db).await?;
        Ok(result.into())
    }

    async fn find_all(&self) -> Result<Vec<Company>, DomainError> {
        let companies = CompanyEntity::find()
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(companies.into_iter().map(Into::into).collect())
    }

    async fn find_by_partner_id(&self, partner_id: &str) -> Result<Vec<Company>, DomainError> {
        let companies = CompanyEntity::find()
            .filter(Column::PartnerId.eq(partner_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(companies.into_iter().map(Into::into).collect())
    }

    async fn find_one_by_id(&self, id: &str) -> Result<Option<Company>, DomainError> {
        let company = CompanyEntity::find_by_id(id).one(&self.db).await?;
        Ok(company.map(Into::into))
    }
}
