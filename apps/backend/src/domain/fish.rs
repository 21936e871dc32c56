use time::OffsetDateTime;

use crate::domain::placement::PlacementTarget;

/// Domain fish. The location is a single target, so the three persisted
/// placement columns can never be set at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fish {
    pub id: i64,
    pub round_id: i64,
    pub name: Option<String>,
    pub placement: PlacementTarget,
    /// Catches before this instant are premature
    pub placement_valid_since: OffsetDateTime,
    pub last_caught_at: Option<OffsetDateTime>,
    pub user_id_last_placement: Option<i64>,
    pub user_id_last_naming: Option<i64>,
    pub user_id_last_catch: Option<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub version: i32,
}

impl Fish {
    pub fn discussion_id_placement(&self) -> Option<i64> {
        self.placement.columns().0
    }

    pub fn post_id_placement(&self) -> Option<i64> {
        self.placement.columns().1
    }

    pub fn user_id_placement(&self) -> Option<i64> {
        self.placement.columns().2
    }

    pub fn is_catchable(&self, now: OffsetDateTime) -> bool {
        self.placement_valid_since <= now
    }
}
