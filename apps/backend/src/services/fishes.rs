use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;
use tracing::info;

use crate::domain::naming::validate_name;
use crate::domain::{Fish, PlacementTarget};
use crate::errors::domain::DomainError;
use crate::repos::{fishes, rounds};
use crate::services::placement::PlacementEngine;

#[derive(Clone)]
pub struct FishService {
    engine: Arc<PlacementEngine>,
}

impl FishService {
    pub fn new(engine: Arc<PlacementEngine>) -> Self {
        Self { engine }
    }

    /// Put a new fish into a round at a random placement, catchable at once.
    pub async fn spawn_fish(
        &self,
        txn: &DatabaseTransaction,
        round_id: i64,
        name: Option<&str>,
        now: OffsetDateTime,
    ) -> Result<Fish, DomainError> {
        rounds::require_round(txn, round_id).await?;
        let name = name.map(validate_name).transpose()?;

        let target = self.engine.random_placement(txn, now).await?;
        let fish = fishes::create_fish(txn, round_id, name, target, now, now).await?;

        info!(fish_id = fish.id, round_id, placement = ?fish.placement, "fish spawned");
        Ok(fish)
    }

    /// Fishes at `target` that can be caught at `now`.
    pub async fn fishes_at<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        target: PlacementTarget,
        now: OffsetDateTime,
    ) -> Result<Vec<Fish>, DomainError> {
        fishes::find_catchable_at(conn, target, now).await
    }

    pub async fn list_round<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
    ) -> Result<Vec<Fish>, DomainError> {
        fishes::list_by_round(conn, round_id).await
    }
}
