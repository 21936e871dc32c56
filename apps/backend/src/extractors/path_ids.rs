use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Parse a positive id from the named path segment.
fn positive_id(req: &HttpRequest, param: &str, code: ErrorCode) -> Result<i64, AppError> {
    let raw = req
        .match_info()
        .get(param)
        .ok_or_else(|| AppError::bad_request(code, format!("Missing {param} parameter")))?;

    let id = raw
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(code, format!("Invalid {param}: {raw}")))?;

    if id <= 0 {
        return Err(AppError::bad_request(
            code,
            format!("{param} must be positive, got: {id}"),
        ));
    }
    Ok(id)
}

/// `{fish_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FishId(pub i64);

impl FromRequest for FishId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(positive_id(req, "fish_id", ErrorCode::InvalidFishId).map(FishId))
    }
}

/// `{round_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundId(pub i64);

impl FromRequest for RoundId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(positive_id(req, "round_id", ErrorCode::InvalidRoundId).map(RoundId))
    }
}
