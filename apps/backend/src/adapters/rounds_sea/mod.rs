//! SeaORM adapter for rounds.

use sea_orm::sea_query::Condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::rounds;

pub mod dto;

pub use dto::RoundCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id).one(conn).await
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let round = rounds::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        starts_at: Set(dto.starts_at),
        ends_at: Set(dto.ends_at),
        created_at: Set(dto.now),
    };

    round.insert(conn).await
}

/// The running round that started most recently.
pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::StartsAt.lte(now))
        .filter(
            Condition::any()
                .add(rounds::Column::EndsAt.is_null())
                .add(rounds::Column::EndsAt.gt(now)),
        )
        .order_by_desc(rounds::Column::StartsAt)
        .order_by_desc(rounds::Column::Id)
        .one(conn)
        .await
}
