//! Row builders for the forum mirror, rounds and fishes.

use catchfish::domain::{Fish, PlacementTarget};
use catchfish::entities::{discussions, posts, users};
use catchfish::repos::{fishes, rounds};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, NotSet, Set};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub fn base_time() -> OffsetDateTime {
    datetime!(2026-03-01 12:00:00 UTC)
}

pub async fn insert_user(
    conn: &impl ConnectionTrait,
    username: &str,
    last_seen_at: Option<OffsetDateTime>,
) -> Result<i64, DbErr> {
    let user = users::ActiveModel {
        id: NotSet,
        username: Set(username.to_string()),
        last_seen_at: Set(last_seen_at),
    }
    .insert(conn)
    .await?;
    Ok(user.id)
}

pub async fn insert_discussion(
    conn: &impl ConnectionTrait,
    title: &str,
    is_private: bool,
    hidden_at: Option<OffsetDateTime>,
) -> Result<i64, DbErr> {
    let discussion = discussions::ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        is_private: Set(is_private),
        hidden_at: Set(hidden_at),
        created_at: Set(base_time() - Duration::days(90)),
    }
    .insert(conn)
    .await?;
    Ok(discussion.id)
}

pub async fn insert_post(
    conn: &impl ConnectionTrait,
    discussion_id: i64,
    created_at: OffsetDateTime,
    hidden_at: Option<OffsetDateTime>,
) -> Result<i64, DbErr> {
    let post = posts::ActiveModel {
        id: NotSet,
        discussion_id: Set(discussion_id),
        created_at: Set(created_at),
        hidden_at: Set(hidden_at),
    }
    .insert(conn)
    .await?;
    Ok(post.id)
}

/// A round running from a day before `base_time()` with no end.
pub async fn insert_open_round(conn: &(impl ConnectionTrait + Send + Sync)) -> i64 {
    let now = base_time();
    rounds::create_round(conn, "Spring".into(), now - Duration::days(1), None, now)
        .await
        .expect("insert round")
        .id
}

pub async fn insert_fish(
    conn: &(impl ConnectionTrait + Send + Sync),
    round_id: i64,
    at: PlacementTarget,
    valid_since: OffsetDateTime,
) -> Fish {
    fishes::create_fish(conn, round_id, None, at, valid_since, base_time())
        .await
        .expect("insert fish")
}

/// Minimal forum: one public discussion, one active user, one running round.
#[derive(Debug, Clone, Copy)]
pub struct Forum {
    pub round_id: i64,
    pub discussion_id: i64,
    pub user_id: i64,
}

impl Forum {
    pub fn discussion(&self) -> PlacementTarget {
        PlacementTarget::discussion(self.discussion_id)
    }

    pub fn user(&self) -> PlacementTarget {
        PlacementTarget::user(self.user_id)
    }
}

pub async fn seed_forum(conn: &(impl ConnectionTrait + Send + Sync)) -> Forum {
    let discussion_id = insert_discussion(conn, "Welcome", false, None)
        .await
        .expect("insert discussion");
    let user_id = insert_user(conn, "alice", Some(base_time() - Duration::days(1)))
        .await
        .expect("insert user");
    let round_id = insert_open_round(conn).await;
    Forum {
        round_id,
        discussion_id,
        user_id,
    }
}
