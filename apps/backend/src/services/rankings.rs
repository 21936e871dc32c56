use std::sync::Arc;

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::errors::domain::DomainError;
use crate::policy::{Ability, Actor, Gate, Subject};
use crate::repos::rankings::{self, RankingEntry};
use crate::repos::rounds;

#[derive(Clone)]
pub struct RankingService {
    gate: Arc<dyn Gate>,
}

impl RankingService {
    pub fn new(gate: Arc<dyn Gate>) -> Self {
        Self { gate }
    }

    /// Leaderboard of a round: most catches first, ties by user id.
    pub async fn list_rankings<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        round_id: i64,
        now: OffsetDateTime,
    ) -> Result<Vec<RankingEntry>, DomainError> {
        let round = rounds::require_round(conn, round_id).await?;

        if !self
            .gate
            .can_perform(actor, Ability::ListRankings, Subject::Round(&round), now)
        {
            return Err(DomainError::permission_denied(
                Ability::ListRankings,
                format!("user {} may not list rankings of round {round_id}", actor.id),
            ));
        }

        rankings::list_with_users(conn, round_id).await
    }
}
