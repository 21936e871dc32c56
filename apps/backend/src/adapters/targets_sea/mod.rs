//! Read-only queries over the forum mirror tables that decide where a
//! fish may be placed.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};
use sea_orm::sea_query::JoinType;
use time::OffsetDateTime;

use crate::entities::{discussions, posts, users};

/// Cut-off instants for recency-based eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityWindow {
    /// Posts created before this are too old
    pub posts_since: OffsetDateTime,
    /// Users last seen before this are inactive
    pub users_seen_since: OffsetDateTime,
}

fn eligible_discussions() -> Select<discussions::Entity> {
    discussions::Entity::find()
        .filter(discussions::Column::HiddenAt.is_null())
        .filter(discussions::Column::IsPrivate.eq(false))
}

// A visible post inside a hidden or private discussion is not eligible either.
fn eligible_posts(window: &EligibilityWindow) -> Select<posts::Entity> {
    posts::Entity::find()
        .join(JoinType::InnerJoin, posts::Relation::Discussion.def())
        .filter(posts::Column::HiddenAt.is_null())
        .filter(posts::Column::CreatedAt.gte(window.posts_since))
        .filter(discussions::Column::HiddenAt.is_null())
        .filter(discussions::Column::IsPrivate.eq(false))
}

fn eligible_users(window: &EligibilityWindow) -> Select<users::Entity> {
    users::Entity::find().filter(users::Column::LastSeenAt.gte(window.users_seen_since))
}

pub async fn count_discussions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    eligible_discussions().count(conn).await
}

pub async fn count_posts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    window: &EligibilityWindow,
) -> Result<u64, sea_orm::DbErr> {
    eligible_posts(window).count(conn).await
}

pub async fn count_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    window: &EligibilityWindow,
) -> Result<u64, sea_orm::DbErr> {
    eligible_users(window).count(conn).await
}

/// Id of the eligible discussion at `offset` in id order.
pub async fn nth_discussion<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    offset: u64,
) -> Result<Option<i64>, sea_orm::DbErr> {
    eligible_discussions()
        .select_only()
        .column(discussions::Column::Id)
        .order_by_asc(discussions::Column::Id)
        .offset(offset)
        .limit(1)
        .into_tuple::<i64>()
        .one(conn)
        .await
}

pub async fn nth_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    window: &EligibilityWindow,
    offset: u64,
) -> Result<Option<i64>, sea_orm::DbErr> {
    eligible_posts(window)
        .select_only()
        .column(posts::Column::Id)
        .order_by_asc(posts::Column::Id)
        .offset(offset)
        .limit(1)
        .into_tuple::<i64>()
        .one(conn)
        .await
}

pub async fn nth_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    window: &EligibilityWindow,
    offset: u64,
) -> Result<Option<i64>, sea_orm::DbErr> {
    eligible_users(window)
        .select_only()
        .column(users::Column::Id)
        .order_by_asc(users::Column::Id)
        .offset(offset)
        .limit(1)
        .into_tuple::<i64>()
        .one(conn)
        .await
}

pub async fn discussion_is_eligible<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    discussion_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    Ok(eligible_discussions()
        .filter(discussions::Column::Id.eq(discussion_id))
        .count(conn)
        .await?
        > 0)
}

pub async fn post_is_eligible<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    window: &EligibilityWindow,
    post_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    Ok(eligible_posts(window)
        .filter(posts::Column::Id.eq(post_id))
        .count(conn)
        .await?
        > 0)
}

pub async fn user_is_eligible<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    window: &EligibilityWindow,
    user_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    Ok(eligible_users(window)
        .filter(users::Column::Id.eq(user_id))
        .count(conn)
        .await?
        > 0)
}
