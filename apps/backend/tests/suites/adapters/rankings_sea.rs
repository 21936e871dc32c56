use catchfish::adapters::rankings_sea;
use catchfish::entities::rankings;
use catchfish::errors::domain::{ConflictKind, DomainError};
use catchfish::infra::db_errors::map_db_err;
use catchfish::AppError;
use sea_orm::{ActiveModelTrait, EntityTrait, NotSet, PaginatorTrait, Set, TransactionTrait};
use time::Duration;

use crate::support::factory::{insert_open_round, insert_user};
use crate::support::{base_time, build_test_state};

#[tokio::test]
async fn upsert_creates_then_increments_one_row() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();
    let round_id = insert_open_round(&txn).await;

    let first = rankings_sea::increment_catch(&txn, round_id, 5, now).await?;
    assert_eq!(first.catch_count, 1);
    assert_eq!(first.created_at, now);

    let later = now + Duration::minutes(3);
    let second = rankings_sea::increment_catch(&txn, round_id, 5, later).await?;
    assert_eq!(second.id, first.id);
    assert_eq!(second.catch_count, 2);
    assert_eq!(second.created_at, now);
    assert_eq!(second.updated_at, later);

    assert_eq!(rankings::Entity::find().count(&txn).await?, 1);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn duplicate_round_user_row_is_a_unique_violation() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();
    let round_id = insert_open_round(&txn).await;

    rankings_sea::increment_catch(&txn, round_id, 8, now).await?;

    let duplicate = rankings::ActiveModel {
        id: NotSet,
        round_id: Set(round_id),
        user_id: Set(8),
        catch_count: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await
    .expect_err("unique index must reject the second row");

    assert!(matches!(
        map_db_err(duplicate),
        DomainError::Conflict(ConflictKind::Other(kind), _) if kind == "Unique"
    ));

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn list_joins_users_in_rank_order() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();
    let round_id = insert_open_round(&txn).await;
    let zed = insert_user(&txn, "zed", None).await?;
    let amy = insert_user(&txn, "amy", None).await?;

    rankings_sea::increment_catch(&txn, round_id, zed, now).await?;
    rankings_sea::increment_catch(&txn, round_id, amy, now).await?;
    rankings_sea::increment_catch(&txn, round_id, amy, now).await?;

    let rows = rankings_sea::list_with_users(&txn, round_id).await?;
    let names: Vec<_> = rows
        .iter()
        .map(|(r, u)| (r.catch_count, u.as_ref().map(|u| u.username.clone())))
        .collect();
    assert_eq!(
        names,
        vec![(2, Some("amy".to_string())), (1, Some("zed".to_string()))]
    );

    txn.rollback().await?;
    Ok(())
}
