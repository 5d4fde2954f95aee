//! SeaORM implementation of ClassRepository
//!
//! Bookings live in the `class_clients` join table. Booking, cancelling and
//! deleting touch both tables and run inside a single transaction; the lot
//! count only moves through conditional `UPDATE ... SET lots = lots -/+ 1`
//! statements so it can never be driven below zero.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    JoinType, QueryFilter, QueryOrder, QuerySelect, QueryTrait, RelationTrait, Set,
    TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::{
    Class, ClassFilter, ClassRepository, ClassWithClients, ClassWithCompany, Client, Company,
    CreateClassInput, DomainError, UpdateClassInput,
};
use crate::models::class::{self, ActiveModel, Column, Entity as ClassEntity};
use crate::models::class_client::{self, Entity as ClassClientEntity};
use crate::models::client::{self, Entity as ClientEntity};
use crate::models::company::Entity as CompanyEntity;

pub const ALREADY_BOOKED: &str = "Class already booked";
pub const CLASS_FULL: &str = "Class is full";

impl From<class::Model> for Class {
    fn from(c: class::Model) -> Self {
        Class {
            id: c.id,
            company_id: c.company_id,
            name: c.name,
            date: c.date,
            date_timestamp: c.date_timestamp,
            lots: c.lots,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// SeaORM-based implementation of ClassRepository
pub struct SeaOrmClassRepository {
    db: DatabaseConnection,
}

impl SeaOrmClassRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Attach booked clients to each class, preserving class order
async fn with_clients<C: ConnectionTrait>(
    conn: &C,
    classes: Vec<class::Model>,
) -> Result<Vec<ClassWithClients>, DomainError> {
    let class_ids: Vec<String> = classes.iter().map(|c| c.id.clone()).collect();
    let mut clients_by_class: HashMap<String, Vec<Client>> = HashMap::new();

    if !class_ids.is_empty() {
        let bookings = ClassClientEntity::find()
            .filter(class_client::Column::ClassId.is_in(class_ids))
            .order_by_asc(class_client::Column::BookedAt)
            .find_also_related(ClientEntity)
            .all(conn)
            .await?;

        for (booking, client) in bookings {
            if let Some(client) = client {
                clients_by_class
                    .entry(booking.class_id)
                    .or_default()
                    .push(client.into());
            }
        }
    }

    Ok(classes
        .into_iter()
        .map(|c| {
            let clients = clients_by_class.remove(&c.id).unwrap_or_default();
            ClassWithClients {
                class: c.into(),
                clients,
            }
        })
        .collect())
}

/// Attach the owning company to each class, preserving class order
async fn with_company<C: ConnectionTrait>(
    conn: &C,
    classes: Vec<class::Model>,
) -> Result<Vec<ClassWithCompany>, DomainError> {
    let mut company_ids: Vec<String> = classes.iter().map(|c| c.company_id.clone()).collect();
    company_ids.sort();
    company_ids.dedup();

    let mut companies: HashMap<String, Company> = HashMap::new();
    if !company_ids.is_empty() {
        for company in CompanyEntity::find()
            .filter(crate::models::company::Column::Id.is_in(company_ids))
            .all(conn)
            .await?
        {
            companies.insert(company.id.clone(), company.into());
        }
    }

    Ok(classes
        .into_iter()
        .map(|c| {
            let company = companies.get(&c.company_id).cloned();
            ClassWithCompany {
                class: c.into(),
                company,
            }
        })
        .collect())
}

async fn reload<C: ConnectionTrait>(conn: &C, id: &str) -> Result<class::Model, DomainError> {
    ClassEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(DomainError::NotFound)
}

#[async_trait]
impl ClassRepository for SeaOrmClassRepository {
    async fn create(&self, input: CreateClassInput) -> Result<Class, DomainError> {
        if CompanyEntity::find_by_id(input.company_id.as_str())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound);
        }

        let now = chrono::Utc::now().to_rfc3339();

        let new_class = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            company_id: Set(input.company_id),
            name: Set(input.name),
            date: Set(input.date),
            date_timestamp: Set(input.date_timestamp),
            lots: Set(input.lots),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = new_class.insert(&self.db).await?;
        Ok(result.into())
    }

    async fn update(&self, id: &str, input: UpdateClassInput) -> Result<Class, DomainError> {
        let existing = ClassEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if let Some(ts) = input.date_timestamp {
            active.date_timestamp = Set(ts);
        }
        if let Some(lots) = input.lots {
            active.lots = Set(lots);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Ok(result.into())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        ClassClientEntity::delete_many()
            .filter(class_client::Column::ClassId.eq(id))
            .exec(&txn)
            .await?;

        let result = ClassEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Class>, DomainError> {
        let class = ClassEntity::find_by_id(id).one(&self.db).await?;
        Ok(class.map(Into::into))
    }

    async fn find_all(&self, filter: ClassFilter) -> Result<Vec<ClassWithClients>, DomainError> {
        let mut condition = Condition::all();

        if let Some(company_id) = filter.company_id {
            condition = condition.add(Column::CompanyId.eq(company_id));
        }

        if let Some(date) = filter.date {
            condition = condition.add(Column::Date.eq(date));
        }

        if let Some(identification) = filter.client_identification {
            let booked_by = ClassClientEntity::find()
                .select_only()
                .column(class_client::Column::ClassId)
                .join(JoinType::InnerJoin, class_client::Relation::Client.def())
                .filter(client::Column::Identification.eq(identification))
                .into_query();
            condition = condition.add(Column::Id.in_subquery(booked_by));
        }

        let classes = ClassEntity::find()
            .filter(condition)
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        tracing::debug!("find_all classes matched {}", classes.len());
        with_clients(&self.db, classes).await
    }

    async fn find_by_date_range(
        &self,
        company_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<ClassWithClients>, DomainError> {
        let classes = ClassEntity::find()
            .filter(Column::CompanyId.eq(company_id))
            .filter(Column::Date.between(start, end))
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        with_clients(&self.db, classes).await
    }

    async fn book(&self, class_id: &str, client_id: &str) -> Result<Class, DomainError> {
        let txn = self.db.begin().await?;

        if ClassEntity::find_by_id(class_id).one(&txn).await?.is_none() {
            return Err(DomainError::NotFound);
        }
        if ClientEntity::find_by_id(client_id).one(&txn).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        let existing = ClassClientEntity::find_by_id((class_id.to_string(), client_id.to_string()))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(DomainError::Conflict(ALREADY_BOOKED.to_string()));
        }

        let now = chrono::Utc::now().to_rfc3339();

        let taken = ClassEntity::update_many()
            .col_expr(Column::Lots, Expr::col(Column::Lots).sub(1))
            .col_expr(Column::UpdatedAt, Expr::value(now.clone()))
            .filter(Column::Id.eq(class_id))
            .filter(Column::Lots.gt(0))
            .exec(&txn)
            .await?;
        if taken.rows_affected == 0 {
            return Err(DomainError::Conflict(CLASS_FULL.to_string()));
        }

        let booking = class_client::ActiveModel {
            class_id: Set(class_id.to_string()),
            client_id: Set(client_id.to_string()),
            booked_at: Set(now),
        };
        ClassClientEntity::insert(booking)
            .exec_without_returning(&txn)
            .await?;

        let updated = reload(&txn, class_id).await?;
        txn.commit().await?;

        Ok(updated.into())
    }

    async fn cancel(&self, class_id: &str, client_id: &str) -> Result<Class, DomainError> {
        let txn = self.db.begin().await?;

        let removed = ClassClientEntity::delete_many()
            .filter(class_client::Column::ClassId.eq(class_id))
            .filter(class_client::Column::ClientId.eq(client_id))
            .exec(&txn)
            .await?;
        if removed.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        ClassEntity::update_many()
            .col_expr(Column::Lots, Expr::col(Column::Lots).add(1))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(Column::Id.eq(class_id))
            .exec(&txn)
            .await?;

        let updated = reload(&txn, class_id).await?;
        txn.commit().await?;

        Ok(updated.into())
    }

    async fn find_clients(&self, class_id: &str) -> Result<Vec<Client>, DomainError> {
        let class = reload(&self.db, class_id).await?;

        let mut found = with_clients(&self.db, vec![class]).await?;
        Ok(found.pop().map(|c| c.clients).unwrap_or_default())
    }

    async fn find_by_client(
        &self,
        client_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<ClassWithCompany>, DomainError> {
        if ClientEntity::find_by_id(client_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound);
        }

        let booked = ClassClientEntity::find()
            .select_only()
            .column(class_client::Column::ClassId)
            .filter(class_client::Column::ClientId.eq(client_id))
            .into_query();

        let mut condition = Condition::all().add(Column::Id.in_subquery(booked));
        if let Some(date) = date {
            condition = condition.add(Column::Date.eq(date));
        }

        let classes = ClassEntity::find()
            .filter(condition)
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        with_company(&self.db, classes).await
    }
}
