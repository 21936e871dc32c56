//! Rounds repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::domain::Round;
use crate::entities::rounds;
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: String,
    starts_at: OffsetDateTime,
    ends_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Result<Round, DomainError> {
    let dto = rounds_adapter::RoundCreate {
        name,
        starts_at,
        ends_at,
        now,
    };
    Ok(Round::from(rounds_adapter::create_round(conn, dto).await?))
}

pub async fn find_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Round>, DomainError> {
    Ok(rounds_adapter::find_by_id(conn, round_id)
        .await?
        .map(Round::from))
}

pub async fn require_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Round, DomainError> {
    find_round(conn, round_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
    })
}

pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<Option<Round>, DomainError> {
    Ok(rounds_adapter::find_active(conn, now).await?.map(Round::from))
}

impl From<rounds::Model> for Round {
    fn from(model: rounds::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            starts_at: model.starts_at,
            ends_at: model.ends_at,
            created_at: model.created_at,
        }
    }
}
