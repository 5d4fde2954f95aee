use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String, // UUID
    pub company_id: String,
    pub name: String,
    pub date: String,           // YYYY-MM-DD
    pub date_timestamp: String, // integer as text
    pub lots: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Company,
    #[sea_orm(has_many = "super::class_client::Entity")]
    ClassClient,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::class_client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassClient.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        super::class_client::Relation::Client.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::class_client::Relation::Class.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
