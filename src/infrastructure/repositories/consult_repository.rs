//! SeaORM implementation of ConsultRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Select, Set,
};
use uuid::Uuid;

use crate::domain::{Consult, ConsultRepository, CreateConsultInput, DomainError, Service};
use crate::models::client::Entity as ClientEntity;
use crate::models::consult::{self, ActiveModel, Column, Entity as ConsultEntity};
use crate::models::service::Entity as ServiceEntity;

impl From<consult::Model> for Consult {
    fn from(c: consult::Model) -> Self {
        Consult {
            id: c.id,
            client_id: c.client_id,
            service_id: c.service_id,
            date: c.date,
            created_at: c.created_at,
        }
    }
}

/// SeaORM-based implementation of ConsultRepository
pub struct SeaOrmConsultRepository {
    db: DatabaseConnection,
}

impl SeaOrmConsultRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn client_consults(client_id: &str, date: Option<&str>) -> Select<ConsultEntity> {
        let mut condition = Condition::all().add(Column::ClientId.eq(client_id));

        if let Some(date) = date {
            condition = condition.add(Column::Date.eq(date));
        }

        ConsultEntity::find()
            .filter(condition)
            .order_by_asc(Column::Date)
            .order_by_asc(Column::CreatedAt)
    }
}

#[async_trait]
impl ConsultRepository for SeaOrmConsultRepository {
    async fn create(&self, input: CreateConsultInput) -> Result<Consult, DomainError> {
        if ClientEntity::find_by_id(input.client_id.as_str())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound);
        }
        if ServiceEntity::find_by_id(input.service_id.as_str())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound);
        }

        let consult = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            client_id: Set(input.client_id),
            service_id: Set(input.service_id),
            date: Set(input.date),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        let result = consult.insert(&self.db).await?;
        Ok(result.into())
    }

    async fn find_by_client(
        &self,
        client_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<Consult>, DomainError> {
        let consults = Self::client_consults(client_id, date).all(&self.db).await?;
        Ok(consults.into_iter().map(Into::into).collect())
    }

    async fn find_services_by_client(
        &self,
        client_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<Service>, DomainError> {
        let consults_with_services = Self::client_consults(client_id, date)
            .find_also_related(ServiceEntity)
            .all(&self.db)
            .await?;

        Ok(consults_with_services
            .into_iter()
            .filter_map(|(_, service)| service.map(Into::into))
            .collect())
    }
}
