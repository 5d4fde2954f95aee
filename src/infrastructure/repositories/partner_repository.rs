//! SeaORM implementation of PartnerRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::domain::{CreatePartnerInput, DomainError, Partner, PartnerRepository};
use crate::models::partner::{self, ActiveModel, Entity as PartnerEntity};

impl From<partner::Model> for Partner {
    fn from(p: partner::Model) -> Self {
        Partner {
            id: p.id,
            name: p.name,
            email: p.email,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// SeaORM-based implementation of PartnerRepository
pub struct SeaOrmPartnerRepository {
    db: DatabaseConnection,
}

impl SeaOrmPartnerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PartnerRepository for SeaOrmPartnerRepository {
    async fn create(&self, input: CreatePartnerInput) -> Result<Partner, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let partner = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(input.name),
            email: Set(input.email),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = partner.insert(&self.db).await?;
        Ok(result.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Partner>, DomainError> {
        let partner = PartnerEntity::find_by_id(id).one(&self.db).await?;
        Ok(partner.map(Into::into))
    }
}
