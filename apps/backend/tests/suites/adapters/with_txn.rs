use std::sync::Arc;

use actix_web::test::TestRequest;
use actix_web::HttpMessage;
use catchfish::db::txn::{with_txn, SharedTxn};
use catchfish::entities::rounds;
use catchfish::errors::ErrorCode;
use catchfish::repos::rounds as round_repo;
use catchfish::AppError;
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};

use crate::support::{base_time, build_test_state};

#[tokio::test]
async fn ok_commits_and_err_rolls_back() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let now = base_time();

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            round_repo::create_round(txn, "kept".into(), now, None, now).await?;
            Ok(())
        })
    })
    .await?;

    let err = with_txn(None, &state, |txn| {
        Box::pin(async move {
            round_repo::create_round(txn, "discarded".into(), now, None, now).await?;
            Err::<(), _>(AppError::internal("boom"))
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Internal);

    let names: Vec<String> = rounds::Entity::find()
        .all(&state.db)
        .await?
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["kept".to_string()]);
    Ok(())
}

#[tokio::test]
async fn shared_txn_is_used_and_left_open() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let now = base_time();

    let shared = Arc::new(state.db.begin().await?);
    let req = TestRequest::default().to_http_request();
    req.extensions_mut().insert(SharedTxn(shared.clone()));

    with_txn(Some(&req), &state, |txn| {
        Box::pin(async move {
            round_repo::create_round(txn, "inside".into(), now, None, now).await?;
            Ok(())
        })
    })
    .await?;

    // Visible through the shared transaction; the owner decides its fate.
    assert_eq!(rounds::Entity::find().count(shared.as_ref()).await?, 1);

    req.extensions_mut().remove::<SharedTxn>();
    drop(req);
    let Ok(txn) = Arc::try_unwrap(shared) else {
        panic!("shared txn still referenced");
    };
    txn.rollback().await?;

    assert_eq!(rounds::Entity::find().count(&state.db).await?, 0);
    Ok(())
}
