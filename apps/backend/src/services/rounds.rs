use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;
use tracing::info;

use crate::domain::Round;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::rounds;

#[derive(Debug, Default, Clone, Copy)]
pub struct RoundService;

impl RoundService {
    pub fn new() -> Self {
        Self
    }

    /// `ends_at`, when given, must be after `starts_at`.
    pub async fn create_round(
        &self,
        txn: &DatabaseTransaction,
        name: &str,
        starts_at: OffsetDateTime,
        ends_at: Option<OffsetDateTime>,
        now: OffsetDateTime,
    ) -> Result<Round, DomainError> {
        if let Some(end) = ends_at {
            if end <= starts_at {
                return Err(DomainError::validation(
                    ValidationKind::InvalidRoundBounds,
                    format!("round must end after it starts ({starts_at} >= {end})"),
                ));
            }
        }

        let round = rounds::create_round(txn, name.to_string(), starts_at, ends_at, now).await?;
        info!(round_id = round.id, name = %round.name, "round created");
        Ok(round)
    }

    /// The running round that started most recently, if any.
    pub async fn active_round<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        now: OffsetDateTime,
    ) -> Result<Option<Round>, DomainError> {
        rounds::find_active(conn, now).await
    }
}
