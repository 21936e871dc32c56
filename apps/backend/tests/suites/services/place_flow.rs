use catchfish::domain::{ExplicitPlacement, Fish, PlacementQuery, PlacementRequest, PlacementTarget};
use catchfish::errors::domain::{DomainError, ValidationKind};
use catchfish::policy::{Ability, Actor, Permission};
use catchfish::repos::fishes;
use catchfish::services::PlaceAttributes;
use catchfish::state::app_state::AppState;
use catchfish::AppError;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use time::{Duration, OffsetDateTime};

use crate::common::assert_domain_err;
use crate::support::factory::{insert_discussion, insert_fish, insert_post, insert_user};
use crate::support::{base_time, build_test_state, seed_forum, Forum};

/// Catch the fish at `forum.discussion()` as `actor` and return it held.
async fn caught_by(
    state: &AppState,
    txn: &DatabaseTransaction,
    forum: &Forum,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<Fish, AppError> {
    let fish = insert_fish(txn, forum.round_id, forum.discussion(), now).await;
    Ok(state
        .catch_service()
        .catch_fish(txn, actor, fish.id, &PlacementQuery::from(forum.discussion()), now)
        .await?)
}

fn explicit(target: PlacementTarget) -> PlaceAttributes {
    let (discussion_id, post_id, user_id) = target.columns();
    PlaceAttributes {
        placement: Some(PlacementRequest::Explicit(ExplicitPlacement {
            discussion_id,
            post_id,
            user_id,
        })),
        name: None,
    }
}

fn rename(name: &str) -> PlaceAttributes {
    PlaceAttributes {
        placement: None,
        name: Some(name.to_string()),
    }
}

#[tokio::test]
async fn explicit_place_moves_and_releases_the_fish() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();

    let forum = seed_forum(&txn).await;
    let actor = Actor::new(forum.user_id, [Permission::Catch, Permission::ChoosePlace]);
    let held = caught_by(&state, &txn, &forum, &actor, now).await?;
    assert!(held.placement_valid_since > now);

    let later = now + Duration::minutes(1);
    let target = PlacementTarget::user(forum.user_id);
    let placed = state
        .catch_service()
        .place_fish(&txn, &actor, held.id, &explicit(target), later)
        .await?;

    assert_eq!(placed.placement, target);
    assert_eq!(placed.user_id_placement(), Some(forum.user_id));
    assert_eq!(placed.discussion_id_placement(), None);
    assert_eq!(placed.user_id_last_placement, Some(forum.user_id));
    assert_eq!(placed.placement_valid_since, later);
    assert_eq!(placed.version, held.version + 1);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn random_place_keeps_location_and_releases_now() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();

    let forum = seed_forum(&txn).await;
    let actor = Actor::new(forum.user_id, [Permission::Catch, Permission::ChoosePlace]);
    let held = caught_by(&state, &txn, &forum, &actor, now).await?;

    let later = now + Duration::minutes(2);
    let attrs = PlaceAttributes {
        placement: Some(PlacementRequest::Random),
        name: None,
    };
    let placed = state
        .catch_service()
        .place_fish(&txn, &actor, held.id, &attrs, later)
        .await?;

    assert_eq!(placed.placement, held.placement);
    assert_eq!(placed.user_id_last_placement, None);
    assert_eq!(placed.placement_valid_since, later);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn ineligible_explicit_targets_are_invalid_placements() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();

    let forum = seed_forum(&txn).await;
    let private = insert_discussion(&txn, "Staff", true, None).await?;
    let hidden = insert_discussion(&txn, "Spam", false, Some(now - Duration::days(2))).await?;
    let old_post = insert_post(&txn, forum.discussion_id, now - Duration::days(45), None).await?;
    let private_post = insert_post(&txn, private, now - Duration::hours(1), None).await?;
    let idle_user = insert_user(&txn, "bob", Some(now - Duration::days(60))).await?;
    let ghost_user = insert_user(&txn, "carol", None).await?;

    let actor = Actor::new(forum.user_id, [Permission::Catch, Permission::ChoosePlace]);
    let held = caught_by(&state, &txn, &forum, &actor, now).await?;
    let at = now + Duration::seconds(10);

    for target in [
        PlacementTarget::discussion(private),
        PlacementTarget::discussion(hidden),
        PlacementTarget::discussion(9999),
        PlacementTarget::post(old_post),
        PlacementTarget::post(private_post),
        PlacementTarget::user(idle_user),
        PlacementTarget::user(ghost_user),
    ] {
        let result = state
            .catch_service()
            .place_fish(&txn, &actor, held.id, &explicit(target), at)
            .await;
        assert_domain_err(result, |e| {
            matches!(e, DomainError::Validation(ValidationKind::InvalidPlacement, _))
        });
    }

    let two_ids = PlaceAttributes {
        placement: Some(PlacementRequest::Explicit(ExplicitPlacement {
            discussion_id: Some(forum.discussion_id),
            post_id: None,
            user_id: Some(forum.user_id),
        })),
        name: None,
    };
    let result = state
        .catch_service()
        .place_fish(&txn, &actor, held.id, &two_ids, at)
        .await;
    assert_domain_err(result, |e| {
        matches!(e, DomainError::Validation(ValidationKind::InvalidPlacement, _))
    });

    assert_eq!(fishes::require_fish(&txn, held.id).await?, held);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn only_the_last_catcher_may_place_within_the_window() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();

    let forum = seed_forum(&txn).await;
    let actor = Actor::new(forum.user_id, [Permission::Catch, Permission::ChoosePlace]);
    let held = caught_by(&state, &txn, &forum, &actor, now).await?;
    let target = forum.discussion();

    let rival = Actor::new(forum.user_id + 100, [Permission::ChoosePlace]);
    let result = state
        .catch_service()
        .place_fish(&txn, &rival, held.id, &explicit(target), now)
        .await;
    assert_domain_err(result, |e| {
        matches!(e, DomainError::PermissionDenied(Ability::Place, _))
    });

    let too_late = held.placement_valid_since + Duration::seconds(1);
    let result = state
        .catch_service()
        .place_fish(&txn, &actor, held.id, &explicit(target), too_late)
        .await;
    assert_domain_err(result, |e| {
        matches!(e, DomainError::PermissionDenied(Ability::Place, _))
    });

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn rename_without_place_permission_releases_the_fish() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();

    let forum = seed_forum(&txn).await;
    let namer = Actor::new(forum.user_id, [Permission::Catch, Permission::ChooseName]);
    let held = caught_by(&state, &txn, &forum, &namer, now).await?;

    let later = now + Duration::minutes(1);
    let renamed = state
        .catch_service()
        .place_fish(&txn, &namer, held.id, &rename("  Wanda "), later)
        .await?;

    assert_eq!(renamed.name.as_deref(), Some("Wanda"));
    assert_eq!(renamed.user_id_last_naming, Some(forum.user_id));
    assert_eq!(renamed.placement_valid_since, later);
    assert_eq!(renamed.placement, held.placement);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn rename_with_place_permission_keeps_the_hold() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();

    let forum = seed_forum(&txn).await;
    let actor = Actor::new(
        forum.user_id,
        [Permission::Catch, Permission::ChoosePlace, Permission::ChooseName],
    );
    let held = caught_by(&state, &txn, &forum, &actor, now).await?;

    let renamed = state
        .catch_service()
        .place_fish(&txn, &actor, held.id, &rename("Nemo"), now + Duration::minutes(1))
        .await?;
    assert_eq!(renamed.name.as_deref(), Some("Nemo"));
    assert_eq!(renamed.placement_valid_since, held.placement_valid_since);

    // Same name again changes nothing, so nothing is written.
    let again = state
        .catch_service()
        .place_fish(&txn, &actor, held.id, &rename("Nemo"), now + Duration::minutes(2))
        .await?;
    assert_eq!(again.version, renamed.version);
    assert_eq!(again, renamed);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn rename_permission_is_judged_on_the_fish_before_placing() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();

    let forum = seed_forum(&txn).await;
    let actor = Actor::new(
        forum.user_id,
        [Permission::Catch, Permission::ChoosePlace, Permission::ChooseName],
    );
    let held = caught_by(&state, &txn, &forum, &actor, now).await?;

    // Placing releases the fish at `at`, which would end the rename window
    // if it were judged on the updated fish.
    let at = now + Duration::minutes(1);
    let attrs = PlaceAttributes {
        placement: Some(PlacementRequest::Explicit(ExplicitPlacement {
            discussion_id: Some(forum.discussion_id),
            post_id: None,
            user_id: None,
        })),
        name: Some("Dory".to_string()),
    };
    let updated = state
        .catch_service()
        .place_fish(&txn, &actor, held.id, &attrs, at)
        .await?;

    assert_eq!(updated.name.as_deref(), Some("Dory"));
    assert_eq!(updated.placement, forum.discussion());
    assert_eq!(updated.placement_valid_since, at);
    assert_eq!(updated.version, held.version + 1);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn invalid_names_are_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();

    let forum = seed_forum(&txn).await;
    let namer = Actor::new(forum.user_id, [Permission::Catch, Permission::ChooseName]);
    let held = caught_by(&state, &txn, &forum, &namer, now).await?;

    let too_long = "x".repeat(256);
    for bad in ["   ", "bell\u{0007}", too_long.as_str()] {
        let result = state
            .catch_service()
            .place_fish(&txn, &namer, held.id, &rename(bad), now)
            .await;
        assert_domain_err(result, |e| {
            matches!(e, DomainError::Validation(ValidationKind::InvalidName, _))
        });
    }

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn empty_request_writes_nothing() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let txn = state.db.begin().await?;
    let now = base_time();

    let forum = seed_forum(&txn).await;
    let fish = insert_fish(&txn, forum.round_id, forum.discussion(), now).await;
    let anyone = Actor::new(forum.user_id, []);

    let same = state
        .catch_service()
        .place_fish(&txn, &anyone, fish.id, &PlaceAttributes::default(), now)
        .await?;
    assert_eq!(same, fish);

    txn.rollback().await?;
    Ok(())
}
