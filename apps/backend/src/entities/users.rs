use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Forum users, read for placement eligibility and ranking display.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    #[sea_orm(column_name = "last_seen_at")]
    pub last_seen_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rankings::Entity")]
    Rankings,
}

impl Related<super::rankings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rankings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
