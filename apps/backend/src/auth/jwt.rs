use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use time::OffsetDateTime;

use crate::error::AppError;
use crate::policy::{Actor, Permission};
use crate::state::security_config::SecurityConfig;

/// Access token TTL in seconds.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Claims carried by an access token issued by the forum.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Forum user id. Accepted as a number or a numeric string.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub sub: i64,
    /// Permission wire strings, e.g. `catchthefish.catch`.
    #[serde(default)]
    pub permissions: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Unknown permission strings are ignored so the forum can grant
    /// capabilities this service does not know about.
    pub fn actor(&self) -> Actor {
        Actor::new(
            self.sub,
            self.permissions
                .iter()
                .filter_map(|p| p.parse::<Permission>().ok()),
        )
    }
}

pub fn mint_access_token(
    user_id: i64,
    permissions: &[Permission],
    now: OffsetDateTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now.unix_timestamp();
    let claims = Claims {
        sub: user_id,
        permissions: permissions.iter().map(|p| p.as_str().to_string()).collect(),
        iat,
        exp: iat + ACCESS_TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify signature and expiry. Expired tokens map to
/// `UNAUTHORIZED_EXPIRED_JWT`, everything else to `UNAUTHORIZED_INVALID_JWT`.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}
