//! SeaORM implementation of ClientRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::{Client, ClientRepository, CreateClientInput, DomainError};
use crate::models::client::{self, ActiveModel, Column, Entity as ClientEntity};

impl From<client::Model> for Client {
    fn from(c: client::Model) -> Self {
        Client {
            id: c.id,
            identification: c.identification,
            name: c.name,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// SeaORM-based implementation of ClientRepository
pub struct SeaOrmClientRepository {
    db: DatabaseConnection,
}

impl SeaOrmClientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for SeaOrmClientRepository {
    async fn create(&self, input: CreateClientInput) -> Result<Client, DomainError> {
        if self
            .find_by_identification(&input.identification)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "Client identification already registered".to_string(),
            ));
        }

        let now = chrono::Utc::now().to_rfc3339();

        let client = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            identification: Set(input.identification),
            name: Set(input.name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = client.insert(&self.db).await?;
        Ok(result.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Client>, DomainError> {
        let client = ClientEntity::find_by_id(id).one(&self.db).await?;
        Ok(client.map(Into::into))
    }

    async fn find_by_identification(
        &self,
        identification: &str,
    ) -> Result<Option<Client>, DomainError> {
        let client = ClientEntity::find()
            .filter(Column::Identification.eq(identification))
            .one(&self.db)
            .await?;
        Ok(client.map(Into::into))
    }
}
