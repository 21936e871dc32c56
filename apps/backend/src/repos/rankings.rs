//! Rankings repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::rankings_sea as rankings_adapter;
use crate::entities::{rankings, users};
use crate::errors::domain::DomainError;

/// Per-user, per-round catch tally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    pub id: i64,
    pub round_id: i64,
    pub user_id: i64,
    pub catch_count: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedUser {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub ranking: Ranking,
    pub user: Option<RankedUser>,
}

pub async fn increment_catch<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    user_id: i64,
    now: OffsetDateTime,
) -> Result<Ranking, DomainError> {
    let ranking = rankings_adapter::increment_catch(conn, round_id, user_id, now).await?;
    Ok(Ranking::from(ranking))
}

pub async fn find_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    user_id: i64,
) -> Result<Option<Ranking>, DomainError> {
    let ranking = rankings_adapter::find_for_user(conn, round_id, user_id).await?;
    Ok(ranking.map(Ranking::from))
}

/// Ordered by catch count (desc) then user id.
pub async fn list_with_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<RankingEntry>, DomainError> {
    let rows = rankings_adapter::list_with_users(conn, round_id).await?;
    Ok(rows
        .into_iter()
        .map(|(ranking, user)| RankingEntry {
            ranking: Ranking::from(ranking),
            user: user.map(RankedUser::from),
        })
        .collect())
}

impl From<rankings::Model> for Ranking {
    fn from(model: rankings::Model) -> Self {
        Self {
            id: model.id,
            round_id: model.round_id,
            user_id: model.user_id,
            catch_count: model.catch_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<users::Model> for RankedUser {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
        }
    }
}
