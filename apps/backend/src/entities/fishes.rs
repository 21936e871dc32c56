use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fishes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "round_id")]
    pub round_id: i64,
    pub name: Option<String>,
    #[sea_orm(column_name = "discussion_id_placement")]
    pub discussion_id_placement: Option<i64>,
    #[sea_orm(column_name = "post_id_placement")]
    pub post_id_placement: Option<i64>,
    #[sea_orm(column_name = "user_id_placement")]
    pub user_id_placement: Option<i64>,
    #[sea_orm(column_name = "placement_valid_since")]
    pub placement_valid_since: OffsetDateTime,
    #[sea_orm(column_name = "last_caught_at")]
    pub last_caught_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "user_id_last_placement")]
    pub user_id_last_placement: Option<i64>,
    #[sea_orm(column_name = "user_id_last_naming")]
    pub user_id_last_naming: Option<i64>,
    #[sea_orm(column_name = "user_id_last_catch")]
    pub user_id_last_catch: Option<i64>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rounds::Entity",
        from = "Column::RoundId",
        to = "super::rounds::Column::Id"
    )]
    Round,
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Round.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
