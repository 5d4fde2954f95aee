//! SeaORM implementation of ServiceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{
    CreateServiceInput, DomainError, Service, ServiceFilter, ServiceRepository,
    UpdateServiceInput,
};
use crate::models::partner::Entity as PartnerEntity;
use crate::models::service::{self, ActiveModel, Column, Entity as ServiceEntity};

impl From<service::Model> for Service {
    fn from(s: service::Model) -> Self {
        Service {
            id: s.id,
            partner_id: s.partner_id,
            name: s.name,
            description: s.description,
            price: s.price,
            duration_minutes: s.duration_minutes,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// SeaORM-based implementation of ServiceRepository
pub struct SeaOrmServiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn create(&self, input: CreateServiceInput) -> Result<Service, DomainError> {
        if PartnerEntity::find_by_id(input.partner_id.as_str())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound);
        }

        let now = chrono::Utc::now().to_rfc3339();

        let service = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            partner_id: Set(input.partner_id),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            duration_minutes: Set(input.duration_minutes),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = service.insert(&self.db).await?;
        Ok(result.into())
    }

    async fn find_all(&self, filter: ServiceFilter) -> Result<Vec<Service>, DomainError> {
        let mut condition = Condition::all();

        if let Some(partner_id) = filter.partner_id {
            condition = condition.add(Column::PartnerId.eq(partner_id));
        }

        if let Some(name) = filter.name {
            condition = condition.add(Column::Name.contains(&name));
        }

        let services = ServiceEntity::find()
            .filter(condition)
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(services.into_iter().map(Into::into).collect())
    }

    async fn find_by_partner_id(&self, partner_id: &str) -> Result<Vec<Service>, DomainError> {
        self.find_all(ServiceFilter {
            partner_id: Some(partner_id.to_string()),
            name: None,
        })
        .await
    }

    async fn update(&self, id: &str, input: UpdateServiceInput) -> Result<Service, DomainError> {
        let existing = ServiceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(duration) = input.duration_minutes {
            active.duration_minutes = Set(duration);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Ok(result.into())
    }
}
