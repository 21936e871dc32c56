use actix_web::http::StatusCode;
use actix_web::test;
use catchfish::entities::rankings;
use catchfish::policy::Permission;
use catchfish::repos::fishes as fish_repo;
use catchfish::AppError;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::{json, Value};

use super::stock_pond;
use crate::common::assert_problem_details;
use crate::support::auth::bearer;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn catching_relocates_and_counts() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (pond, fish) = stock_pond(&state.db).await;
    let auth = bearer(pond.catcher_id, &[Permission::Catch], &state.security);
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/fishes/{}/catch", fish.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({"placement": {"discussion_id": pond.discussion_id.to_string()}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], fish.id);
    assert_eq!(body["user_id_last_catch"], pond.catcher_id);
    assert_eq!(body["version"], 2);
    assert!(body["last_caught_at"].is_string());
    let set = ["discussion_id_placement", "post_id_placement", "user_id_placement"]
        .iter()
        .filter(|k| !body[**k].is_null())
        .count();
    assert_eq!(set, 1);

    let ranking = rankings::Entity::find()
        .filter(rankings::Column::RoundId.eq(pond.round_id))
        .filter(rankings::Column::UserId.eq(pond.catcher_id))
        .one(&state.db)
        .await?
        .expect("ranking row");
    assert_eq!(ranking.catch_count, 1);
    Ok(())
}

#[actix_web::test]
async fn catching_at_the_wrong_place_is_422_with_reason() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (pond, fish) = stock_pond(&state.db).await;
    let auth = bearer(pond.catcher_id, &[Permission::Catch], &state.security);
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/fishes/{}/catch", fish.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({"placement": {"user_id": pond.catcher_id}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem_details(resp, 422, "WRONG_CATCH_PLACEMENT").await;
    assert_eq!(problem["reason"], "wrong-catch-placement");

    let unchanged = fish_repo::require_fish(&state.db, fish.id).await?;
    assert_eq!(unchanged.version, fish.version);
    Ok(())
}

#[actix_web::test]
async fn catching_an_unknown_fish_is_404() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let auth = bearer(1, &[Permission::Catch], &state.security);
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/fishes/4242/catch")
        .insert_header(("Authorization", auth))
        .set_json(json!({"placement": {"discussion_id": 1}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 404, "FISH_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn catching_without_permission_is_403() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (pond, fish) = stock_pond(&state.db).await;
    let auth = bearer(pond.catcher_id, &[Permission::SeeRankings], &state.security);
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/fishes/{}/catch", fish.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({"placement": {"discussion_id": pond.discussion_id}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 403, "FORBIDDEN").await;
    Ok(())
}

#[actix_web::test]
async fn nowhere_to_swim_is_503() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (pond, fish) = stock_pond(&state.db).await;
    // Hide the only discussion and forget the only user.
    let db = &state.db;
    catchfish::entities::discussions::Entity::update_many()
        .col_expr(
            catchfish::entities::discussions::Column::HiddenAt,
            sea_orm::sea_query::Expr::value(Some(super::wall_clock())),
        )
        .exec(db)
        .await?;
    catchfish::entities::users::Entity::delete_many().exec(db).await?;

    let auth = bearer(pond.catcher_id, &[Permission::Catch], &state.security);
    let app = create_test_app(state.clone()).await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/fishes/{}/catch", fish.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({"placement": {"discussion_id": pond.discussion_id}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 503, "NO_ELIGIBLE_TARGET").await;

    // Rolled back: still at the discussion, never caught.
    let stored = fish_repo::require_fish(&state.db, fish.id).await?;
    assert_eq!(stored.last_caught_at, None);
    assert_eq!(stored.version, fish.version);
    Ok(())
}

#[actix_web::test]
async fn catcher_may_rename_during_the_grace_window() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (pond, fish) = stock_pond(&state.db).await;
    let auth = bearer(
        pond.catcher_id,
        &[Permission::Catch, Permission::ChooseName],
        &state.security,
    );
    let app = create_test_app(state.clone()).await;

    let catch = test::TestRequest::post()
        .uri(&format!("/api/fishes/{}/catch", fish.id))
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"placement": {"discussion_id": pond.discussion_id}}))
        .to_request();
    let resp = test::call_service(&app, catch).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let rename = test::TestRequest::patch()
        .uri(&format!("/api/fishes/{}", fish.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({"name": "  Goldie "}))
        .to_request();
    let resp = test::call_service(&app, rename).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Goldie");
    assert_eq!(body["user_id_last_naming"], pond.catcher_id);
    Ok(())
}

#[actix_web::test]
async fn patch_by_someone_else_is_403() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (pond, fish) = stock_pond(&state.db).await;
    let auth = bearer(
        pond.catcher_id,
        &[Permission::ChoosePlace, Permission::ChooseName],
        &state.security,
    );
    let app = create_test_app(state).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/fishes/{}", fish.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({"placement": "random"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 403, "FORBIDDEN").await;
    Ok(())
}

#[actix_web::test]
async fn unknown_placement_keyword_is_422() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (pond, fish) = stock_pond(&state.db).await;
    let auth = bearer(pond.catcher_id, &[Permission::ChoosePlace], &state.security);
    let app = create_test_app(state).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/fishes/{}", fish.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({"placement": "anywhere"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem_details(resp, 422, "INVALID_PLACEMENT").await;
    assert_eq!(problem["reason"], "invalid-placement");
    Ok(())
}

#[actix_web::test]
async fn null_name_is_gated_then_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (pond, fish) = stock_pond(&state.db).await;
    let app = create_test_app(state.clone()).await;

    // Nobody has caught the fish yet, so nobody may name it.
    let stranger = bearer(pond.catcher_id, &[Permission::ChooseName], &state.security);
    let req = test::TestRequest::patch()
        .uri(&format!("/api/fishes/{}", fish.id))
        .insert_header(("Authorization", stranger))
        .set_json(json!({"name": null}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 403, "FORBIDDEN").await;

    let catcher = bearer(
        pond.catcher_id,
        &[Permission::Catch, Permission::ChooseName],
        &state.security,
    );
    let catch = test::TestRequest::post()
        .uri(&format!("/api/fishes/{}/catch", fish.id))
        .insert_header(("Authorization", catcher.clone()))
        .set_json(json!({"placement": {"discussion_id": pond.discussion_id}}))
        .to_request();
    let resp = test::call_service(&app, catch).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/fishes/{}", fish.id))
        .insert_header(("Authorization", catcher))
        .set_json(json!({"name": null}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem_details(resp, 422, "INVALID_NAME").await;
    assert_eq!(problem["reason"], "invalid-name");
    Ok(())
}

#[actix_web::test]
async fn null_placement_is_invalid_placement() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (pond, fish) = stock_pond(&state.db).await;
    let auth = bearer(
        pond.catcher_id,
        &[Permission::Catch, Permission::ChoosePlace],
        &state.security,
    );
    let app = create_test_app(state.clone()).await;

    let catch = test::TestRequest::post()
        .uri(&format!("/api/fishes/{}/catch", fish.id))
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"placement": {"discussion_id": pond.discussion_id}}))
        .to_request();
    let resp = test::call_service(&app, catch).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let caught = fish_repo::require_fish(&state.db, fish.id).await?;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/fishes/{}", fish.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({"placement": null}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 422, "INVALID_PLACEMENT").await;

    let unchanged = fish_repo::require_fish(&state.db, fish.id).await?;
    assert_eq!(unchanged.version, caught.version);
    Ok(())
}
