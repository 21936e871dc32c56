//! Placement target eligibility, per kind.

use sea_orm::ConnectionTrait;

use crate::adapters::targets_sea as targets_adapter;
pub use crate::adapters::targets_sea::EligibilityWindow;
use crate::domain::{PlacementKind, PlacementTarget};
use crate::errors::domain::DomainError;

pub async fn count_eligible<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kind: PlacementKind,
    window: &EligibilityWindow,
) -> Result<u64, DomainError> {
    let count = match kind {
        PlacementKind::Discussion => targets_adapter::count_discussions(conn).await?,
        PlacementKind::Post => targets_adapter::count_posts(conn, window).await?,
        PlacementKind::User => targets_adapter::count_users(conn, window).await?,
    };
    Ok(count)
}

/// The eligible target of `kind` at `offset` in id order.
pub async fn nth_eligible<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kind: PlacementKind,
    window: &EligibilityWindow,
    offset: u64,
) -> Result<Option<PlacementTarget>, DomainError> {
    let id = match kind {
        PlacementKind::Discussion => targets_adapter::nth_discussion(conn, offset).await?,
        PlacementKind::Post => targets_adapter::nth_post(conn, window, offset).await?,
        PlacementKind::User => targets_adapter::nth_user(conn, window, offset).await?,
    };
    Ok(id.map(|id| PlacementTarget { kind, id }))
}

pub async fn is_eligible<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    target: PlacementTarget,
    window: &EligibilityWindow,
) -> Result<bool, DomainError> {
    let eligible = match target.kind {
        PlacementKind::Discussion => {
            targets_adapter::discussion_is_eligible(conn, target.id).await?
        }
        PlacementKind::Post => targets_adapter::post_is_eligible(conn, window, target.id).await?,
        PlacementKind::User => targets_adapter::user_is_eligible(conn, window, target.id).await?,
    };
    Ok(eligible)
}
