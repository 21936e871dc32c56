use actix_web::{web, HttpRequest};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::{
    ExplicitPlacement, Fish, PlacementInput, PlacementKind, PlacementQuery, PlacementRequest,
};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::extractors::{CurrentActor, FishId, ValidatedJson};
use crate::services::PlaceAttributes;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CatchRequest {
    /// Where the client saw the fish
    #[serde(default)]
    pub placement: PlacementQuery,
}

/// An explicit `null` counts as supplied: it is gated like any other value
/// and then fails validation.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub placement: Option<Option<PlacementInput>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
}

impl TryFrom<PlaceRequest> for PlaceAttributes {
    type Error = DomainError;

    fn try_from(req: PlaceRequest) -> Result<Self, Self::Error> {
        let placement = match req.placement {
            None => None,
            Some(None) => Some(PlacementRequest::Explicit(ExplicitPlacement::default())),
            Some(Some(input)) => Some(PlacementRequest::try_from(input)?),
        };

        Ok(PlaceAttributes {
            placement,
            name: req.name.map(Option::unwrap_or_default),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct FishResponse {
    pub id: i64,
    pub round_id: i64,
    pub name: Option<String>,
    pub placement_kind: PlacementKind,
    pub discussion_id_placement: Option<i64>,
    pub post_id_placement: Option<i64>,
    pub user_id_placement: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub placement_valid_since: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_caught_at: Option<OffsetDateTime>,
    pub user_id_last_placement: Option<i64>,
    pub user_id_last_naming: Option<i64>,
    pub user_id_last_catch: Option<i64>,
    pub version: i32,
}

impl From<Fish> for FishResponse {
    fn from(fish: Fish) -> Self {
        Self {
            id: fish.id,
            round_id: fish.round_id,
            placement_kind: fish.placement.kind,
            discussion_id_placement: fish.discussion_id_placement(),
            post_id_placement: fish.post_id_placement(),
            user_id_placement: fish.user_id_placement(),
            name: fish.name,
            placement_valid_since: fish.placement_valid_since,
            last_caught_at: fish.last_caught_at,
            user_id_last_placement: fish.user_id_last_placement,
            user_id_last_naming: fish.user_id_last_naming,
            user_id_last_catch: fish.user_id_last_catch,
            version: fish.version,
        }
    }
}

/// POST /api/fishes/{fish_id}/catch
async fn catch_fish(
    http_req: HttpRequest,
    fish_id: FishId,
    actor: CurrentActor,
    body: ValidatedJson<CatchRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<FishResponse>, AppError> {
    let service = app_state.catch_service();
    let actor = actor.into_inner();
    let requested = body.into_inner().placement;
    let now = OffsetDateTime::now_utc();

    let fish = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            Ok(service
                .catch_fish(txn, &actor, fish_id.0, &requested, now)
                .await?)
        })
    })
    .await?;

    Ok(web::Json(FishResponse::from(fish)))
}

/// PATCH /api/fishes/{fish_id}
async fn place_fish(
    http_req: HttpRequest,
    fish_id: FishId,
    actor: CurrentActor,
    body: ValidatedJson<PlaceRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<FishResponse>, AppError> {
    let service = app_state.catch_service();
    let actor = actor.into_inner();
    let attributes = PlaceAttributes::try_from(body.into_inner())?;
    let now = OffsetDateTime::now_utc();

    let fish = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            Ok(service
                .place_fish(txn, &actor, fish_id.0, &attributes, now)
                .await?)
        })
    })
    .await?;

    Ok(web::Json(FishResponse::from(fish)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{fish_id}/catch").route(web::post().to(catch_fish)));
    cfg.service(web::resource("/{fish_id}").route(web::patch().to(place_fish)));
}
