use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_name = "starts_at")]
    pub starts_at: OffsetDateTime,
    #[sea_orm(column_name = "ends_at")]
    pub ends_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fishes::Entity")]
    Fishes,
    #[sea_orm(has_many = "super::rankings::Entity")]
    Rankings,
}

impl Related<super::fishes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fishes.def()
    }
}

impl Related<super::rankings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rankings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
