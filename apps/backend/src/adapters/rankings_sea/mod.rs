//! SeaORM adapter for rankings - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use time::OffsetDateTime;

use crate::entities::{rankings, users};

pub async fn find_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    user_id: i64,
) -> Result<Option<rankings::Model>, sea_orm::DbErr> {
    rankings::Entity::find()
        .filter(rankings::Column::RoundId.eq(round_id))
        .filter(rankings::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// Insert `(round, user)` with one catch, or add one to the existing row.
/// A single statement, so concurrent first catches cannot lose an increment.
pub async fn increment_catch<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    user_id: i64,
    now: OffsetDateTime,
) -> Result<rankings::Model, sea_orm::DbErr> {
    let first_catch = rankings::ActiveModel {
        id: NotSet,
        round_id: Set(round_id),
        user_id: Set(user_id),
        catch_count: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    rankings::Entity::insert(first_catch)
        .on_conflict(
            OnConflict::columns([rankings::Column::RoundId, rankings::Column::UserId])
                .value(
                    rankings::Column::CatchCount,
                    Expr::col((rankings::Entity, rankings::Column::CatchCount)).add(1),
                )
                .value(rankings::Column::UpdatedAt, Expr::value(now))
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_for_user(conn, round_id, user_id)
        .await?
        .ok_or_else(|| {
            sea_orm::DbErr::RecordNotFound(format!(
                "ranking for round {round_id} user {user_id} not found"
            ))
        })
}

/// Rankings of a round, best first, ties by user id, each with its user row.
pub async fn list_with_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<(rankings::Model, Option<users::Model>)>, sea_orm::DbErr> {
    rankings::Entity::find()
        .filter(rankings::Column::RoundId.eq(round_id))
        .order_by_desc(rankings::Column::CatchCount)
        .order_by_asc(rankings::Column::UserId)
        .find_also_related(users::Entity)
        .all(conn)
        .await
}
