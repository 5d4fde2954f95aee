use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String, // UUID
    #[sea_orm(unique)]
    pub identification: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::class_client::Entity")]
    ClassClient,
    #[sea_orm(has_many = "super::consult::Entity")]
    Consult,
}

impl Related<super::class_client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassClient.def()
    }
}

impl Related<super::consult::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consult.def()
    }
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        super::class_client::Relation::Class.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::class_client::Relation::Client.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
