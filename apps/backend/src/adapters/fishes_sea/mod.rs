//! SeaORM adapter for fishes - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::fishes;
use crate::infra::db_errors::OPTIMISTIC_LOCK_PREFIX;

pub mod dto;

pub use dto::{FishCreate, FishUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fish_id: i64,
) -> Result<Option<fishes::Model>, sea_orm::DbErr> {
    fishes::Entity::find_by_id(fish_id).one(conn).await
}

pub async fn create_fish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: FishCreate,
) -> Result<fishes::Model, sea_orm::DbErr> {
    let fish = fishes::ActiveModel {
        id: NotSet,
        round_id: Set(dto.round_id),
        name: Set(dto.name),
        discussion_id_placement: Set(dto.discussion_id_placement),
        post_id_placement: Set(dto.post_id_placement),
        user_id_placement: Set(dto.user_id_placement),
        placement_valid_since: Set(dto.placement_valid_since),
        last_caught_at: Set(None),
        user_id_last_placement: Set(None),
        user_id_last_naming: Set(None),
        user_id_last_catch: Set(None),
        created_at: Set(dto.now),
        updated_at: Set(dto.now),
        version: Set(1),
    };

    fish.insert(conn).await
}

/// Conditional save: writes only if the row still has `expected_version`,
/// bumping the version. Zero rows affected means the fish is gone
/// (`RecordNotFound`) or was saved by someone else (`OPTIMISTIC_LOCK:` payload).
pub async fn save_fish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: FishUpdate,
) -> Result<fishes::Model, sea_orm::DbErr> {
    let result = fishes::Entity::update_many()
        .col_expr(fishes::Column::Name, Expr::value(dto.name))
        .col_expr(
            fishes::Column::DiscussionIdPlacement,
            Expr::value(dto.discussion_id_placement),
        )
        .col_expr(
            fishes::Column::PostIdPlacement,
            Expr::value(dto.post_id_placement),
        )
        .col_expr(
            fishes::Column::UserIdPlacement,
            Expr::value(dto.user_id_placement),
        )
        .col_expr(
            fishes::Column::PlacementValidSince,
            Expr::value(dto.placement_valid_since),
        )
        .col_expr(fishes::Column::LastCaughtAt, Expr::value(dto.last_caught_at))
        .col_expr(
            fishes::Column::UserIdLastPlacement,
            Expr::value(dto.user_id_last_placement),
        )
        .col_expr(
            fishes::Column::UserIdLastNaming,
            Expr::value(dto.user_id_last_naming),
        )
        .col_expr(
            fishes::Column::UserIdLastCatch,
            Expr::value(dto.user_id_last_catch),
        )
        .col_expr(fishes::Column::UpdatedAt, Expr::value(dto.now))
        .col_expr(
            fishes::Column::Version,
            Expr::col(fishes::Column::Version).add(1),
        )
        .filter(fishes::Column::Id.eq(dto.id))
        .filter(fishes::Column::Version.eq(dto.expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, dto.id).await? {
            Some(current) => Err(sea_orm::DbErr::Custom(format!(
                "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{},\"actual\":{}}}",
                dto.expected_version, current.version
            ))),
            None => Err(sea_orm::DbErr::RecordNotFound(format!(
                "fish {} not found",
                dto.id
            ))),
        };
    }

    find_by_id(conn, dto.id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("fish {} not found", dto.id)))
}

/// Fishes of any round at the given placement columns that are catchable at `now`.
pub async fn find_catchable_at<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    column: fishes::Column,
    target_id: i64,
    now: OffsetDateTime,
) -> Result<Vec<fishes::Model>, sea_orm::DbErr> {
    fishes::Entity::find()
        .filter(column.eq(target_id))
        .filter(fishes::Column::PlacementValidSince.lte(now))
        .order_by_asc(fishes::Column::Id)
        .all(conn)
        .await
}

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<fishes::Model>, sea_orm::DbErr> {
    fishes::Entity::find()
        .filter(fishes::Column::RoundId.eq(round_id))
        .order_by_asc(fishes::Column::Id)
        .all(conn)
        .await
}
