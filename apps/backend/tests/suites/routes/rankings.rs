use actix_web::http::StatusCode;
use actix_web::test;
use catchfish::policy::Permission;
use catchfish::repos::rankings;
use catchfish::AppError;
use serde_json::{json, Value};

use super::{stock_pond, wall_clock};
use crate::common::assert_problem_details;
use crate::support::auth::bearer;
use crate::support::factory::insert_user;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn rankings_list_best_catchers_first() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (pond, _) = stock_pond(&state.db).await;
    let now = wall_clock();
    let rival = insert_user(&state.db, "rival", None).await?;
    rankings::increment_catch(&state.db, pond.round_id, pond.catcher_id, now).await?;
    rankings::increment_catch(&state.db, pond.round_id, rival, now).await?;
    rankings::increment_catch(&state.db, pond.round_id, rival, now).await?;

    let auth = bearer(pond.catcher_id, &[Permission::SeeRankings], &state.security);
    let app = create_test_app(state).await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/rounds/{}/rankings", pond.round_id))
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!([
            {
                "round_id": pond.round_id,
                "user_id": rival,
                "catch_count": 2,
                "user": {"id": rival, "username": "rival"}
            },
            {
                "round_id": pond.round_id,
                "user_id": pond.catcher_id,
                "catch_count": 1,
                "user": {"id": pond.catcher_id, "username": "angler"}
            }
        ])
    );
    Ok(())
}

#[actix_web::test]
async fn rankings_need_see_rankings() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (pond, _) = stock_pond(&state.db).await;
    let auth = bearer(pond.catcher_id, &[Permission::Catch], &state.security);
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/rounds/{}/rankings", pond.round_id))
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 403, "FORBIDDEN").await;
    Ok(())
}

#[actix_web::test]
async fn rankings_of_an_unknown_round_are_404() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let auth = bearer(1, &[Permission::SeeRankings], &state.security);
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/rounds/999/rankings")
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 404, "ROUND_NOT_FOUND").await;
    Ok(())
}
