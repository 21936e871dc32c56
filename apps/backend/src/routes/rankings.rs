use actix_web::{web, HttpRequest};
use serde::Serialize;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentActor, RoundId};
use crate::repos::rankings::{RankedUser, RankingEntry};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub round_id: i64,
    pub user_id: i64,
    pub catch_count: i32,
    /// Absent when the user row is gone from the forum mirror
    pub user: Option<UserSummary>,
}

impl From<RankingEntry> for RankingResponse {
    fn from(entry: RankingEntry) -> Self {
        Self {
            round_id: entry.ranking.round_id,
            user_id: entry.ranking.user_id,
            catch_count: entry.ranking.catch_count,
            user: entry
                .user
                .map(|RankedUser { id, username }| UserSummary { id, username }),
        }
    }
}

/// GET /api/rounds/{round_id}/rankings
async fn list_rankings(
    http_req: HttpRequest,
    round_id: RoundId,
    actor: CurrentActor,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<RankingResponse>>, AppError> {
    let service = app_state.ranking_service();
    let actor = actor.into_inner();
    let now = OffsetDateTime::now_utc();

    let entries = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            Ok(service
                .list_rankings(txn, &actor, round_id.0, now)
                .await?)
        })
    })
    .await?;

    Ok(web::Json(
        entries.into_iter().map(RankingResponse::from).collect(),
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{round_id}/rankings").route(web::get().to(list_rankings)));
}
