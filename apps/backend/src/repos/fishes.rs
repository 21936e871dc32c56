//! Fish repository: domain `Fish` in, domain `Fish` out.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::fishes_sea as fishes_adapter;
use crate::domain::{Fish, PlacementKind, PlacementTarget};
use crate::entities::fishes;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

pub async fn find_fish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fish_id: i64,
) -> Result<Option<Fish>, DomainError> {
    fishes_adapter::find_by_id(conn, fish_id)
        .await?
        .map(Fish::try_from)
        .transpose()
}

/// Find a fish or fail with `NotFound(Fish)`.
pub async fn require_fish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fish_id: i64,
) -> Result<Fish, DomainError> {
    find_fish(conn, fish_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Fish, format!("Fish {fish_id} not found"))
    })
}

pub async fn create_fish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    name: Option<String>,
    placement: PlacementTarget,
    placement_valid_since: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<Fish, DomainError> {
    let (discussion_id_placement, post_id_placement, user_id_placement) = placement.columns();
    let dto = fishes_adapter::FishCreate {
        round_id,
        name,
        discussion_id_placement,
        post_id_placement,
        user_id_placement,
        placement_valid_since,
        now,
    };
    Fish::try_from(fishes_adapter::create_fish(conn, dto).await?)
}

/// Persist every mutable field of `fish`, conditioned on `fish.version`.
/// Fails with `Conflict(OptimisticLock)` if the row changed since it was read.
pub async fn save_fish<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fish: &Fish,
    now: OffsetDateTime,
) -> Result<Fish, DomainError> {
    let (discussion_id_placement, post_id_placement, user_id_placement) =
        fish.placement.columns();
    let dto = fishes_adapter::FishUpdate {
        id: fish.id,
        expected_version: fish.version,
        name: fish.name.clone(),
        discussion_id_placement,
        post_id_placement,
        user_id_placement,
        placement_valid_since: fish.placement_valid_since,
        last_caught_at: fish.last_caught_at,
        user_id_last_placement: fish.user_id_last_placement,
        user_id_last_naming: fish.user_id_last_naming,
        user_id_last_catch: fish.user_id_last_catch,
        now,
    };
    Fish::try_from(fishes_adapter::save_fish(conn, dto).await?)
}

pub async fn find_catchable_at<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    target: PlacementTarget,
    now: OffsetDateTime,
) -> Result<Vec<Fish>, DomainError> {
    let column = match target.kind {
        PlacementKind::Discussion => fishes::Column::DiscussionIdPlacement,
        PlacementKind::Post => fishes::Column::PostIdPlacement,
        PlacementKind::User => fishes::Column::UserIdPlacement,
    };
    fishes_adapter::find_catchable_at(conn, column, target.id, now)
        .await?
        .into_iter()
        .map(Fish::try_from)
        .collect()
}

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Fish>, DomainError> {
    fishes_adapter::list_by_round(conn, round_id)
        .await?
        .into_iter()
        .map(Fish::try_from)
        .collect()
}

// A row with zero or several placement columns set cannot be represented.
impl TryFrom<fishes::Model> for Fish {
    type Error = DomainError;

    fn try_from(model: fishes::Model) -> Result<Self, Self::Error> {
        let placement = PlacementTarget::from_columns(
            model.discussion_id_placement,
            model.post_id_placement,
            model.user_id_placement,
        )
        .ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!(
                    "fish {} must have exactly one placement column set",
                    model.id
                ),
            )
        })?;

        Ok(Fish {
            id: model.id,
            round_id: model.round_id,
            name: model.name,
            placement,
            placement_valid_since: model.placement_valid_since,
            last_caught_at: model.last_caught_at,
            user_id_last_placement: model.user_id_last_placement,
            user_id_last_naming: model.user_id_last_naming,
            user_id_last_catch: model.user_id_last_catch,
            created_at: model.created_at,
            updated_at: model.updated_at,
            version: model.version,
        })
    }
}
