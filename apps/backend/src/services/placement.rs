//! Placement engine: picks random eligible targets and validates explicit ones.

use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sea_orm::ConnectionTrait;
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::config::game::GameSettings;
use crate::domain::pick::{pick_weighted, KindPool};
use crate::domain::{ExplicitPlacement, PlacementKind, PlacementTarget};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::repos::targets::{self, EligibilityWindow};

pub struct PlacementEngine {
    settings: GameSettings,
    rng: Mutex<ChaCha8Rng>,
}

impl PlacementEngine {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            rng: Mutex::new(ChaCha8Rng::from_os_rng()),
        }
    }

    /// Deterministic picks, for tests.
    pub fn with_seed(settings: GameSettings, seed: u64) -> Self {
        Self {
            settings,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    fn window(&self, now: OffsetDateTime) -> EligibilityWindow {
        EligibilityWindow {
            posts_since: now.saturating_sub(Duration::days(self.settings.recent_post_days)),
            users_seen_since: now.saturating_sub(Duration::days(self.settings.active_user_days)),
        }
    }

    fn weight(&self, kind: PlacementKind) -> u32 {
        match kind {
            PlacementKind::Discussion => self.settings.discussion_weight,
            PlacementKind::Post => self.settings.post_weight,
            PlacementKind::User => self.settings.user_weight,
        }
    }

    /// Pick an eligible target at random. Fails with `Infra(NoEligibleTarget)`
    /// when the forum has nothing a fish may sit on.
    pub async fn random_placement<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        now: OffsetDateTime,
    ) -> Result<PlacementTarget, DomainError> {
        let window = self.window(now);

        let mut pools = Vec::with_capacity(PlacementKind::ALL.len());
        for kind in PlacementKind::ALL {
            pools.push(KindPool {
                kind,
                count: targets::count_eligible(conn, kind, &window).await?,
                weight: self.weight(kind),
            });
        }

        let picked = {
            let mut rng = self.rng.lock();
            pick_weighted(&pools, &mut *rng)
        };
        let (kind, offset) = picked.ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::NoEligibleTarget,
                "no discussion, post or user is eligible for a fish",
            )
        })?;

        debug!(?kind, offset, "picked random placement");

        targets::nth_eligible(conn, kind, &window, offset)
            .await?
            .ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::NoEligibleTarget,
                    format!("eligible {kind:?} targets changed while placing"),
                )
            })
    }

    /// Resolve a caller-supplied placement. Fails with
    /// `Validation(InvalidPlacement)` unless it names exactly one existing,
    /// eligible target.
    pub async fn assert_valid<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        placement: &ExplicitPlacement,
        now: OffsetDateTime,
    ) -> Result<PlacementTarget, DomainError> {
        let target = placement.target()?;

        if !targets::is_eligible(conn, target, &self.window(now)).await? {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlacement,
                format!(
                    "{:?} {} does not exist or cannot hold a fish",
                    target.kind, target.id
                ),
            ));
        }
        Ok(target)
    }
}
