//! DTOs for fishes_sea adapter.

use time::OffsetDateTime;

/// Insert payload. Exactly one placement column is expected to be set.
#[derive(Debug, Clone)]
pub struct FishCreate {
    pub round_id: i64,
    pub name: Option<String>,
    pub discussion_id_placement: Option<i64>,
    pub post_id_placement: Option<i64>,
    pub user_id_placement: Option<i64>,
    pub placement_valid_since: OffsetDateTime,
    pub now: OffsetDateTime,
}

/// Full write of a fish's mutable columns, guarded by `expected_version`.
#[derive(Debug, Clone)]
pub struct FishUpdate {
    pub id: i64,
    pub expected_version: i32,
    pub name: Option<String>,
    pub discussion_id_placement: Option<i64>,
    pub post_id_placement: Option<i64>,
    pub user_id_placement: Option<i64>,
    pub placement_valid_since: OffsetDateTime,
    pub last_caught_at: Option<OffsetDateTime>,
    pub user_id_last_placement: Option<i64>,
    pub user_id_last_naming: Option<i64>,
    pub user_id_last_catch: Option<i64>,
    pub now: OffsetDateTime,
}
