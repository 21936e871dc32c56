use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub id: i64,
    pub name: String,
    pub starts_at: OffsetDateTime,
    /// Open-ended when `None`
    pub ends_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl Round {
    /// `starts_at <= now < ends_at`
    pub fn is_running(&self, now: OffsetDateTime) -> bool {
        self.starts_at <= now && self.ends_at.is_none_or(|end| now < end)
    }
}
