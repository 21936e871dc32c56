//! DTOs for rounds_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub name: String,
    pub starts_at: OffsetDateTime,
    pub ends_at: Option<OffsetDateTime>,
    pub now: OffsetDateTime,
}
