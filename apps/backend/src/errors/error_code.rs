//! Error codes for the catchfish API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    UnauthorizedInvalidJwt,
    UnauthorizedExpiredJwt,
    /// Actor lacks the permission for the requested ability
    Forbidden,

    // Request Validation
    InvalidFishId,
    InvalidRoundId,
    /// Catch request names a placement the fish is no longer at
    WrongCatchPlacement,
    InvalidName,
    InvalidPlacement,
    RoundClosed,
    InvalidRoundBounds,
    ValidationError,
    BadRequest,

    // Resource Not Found
    FishNotFound,
    RoundNotFound,
    RankingNotFound,
    NotFound,

    // Conflicts
    OptimisticLock,
    UniqueViolation,
    FkViolation,
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    /// No discussion, post or user can currently hold a fish
    NoEligibleTarget,
    DataCorruption,
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",

            Self::InvalidFishId => "INVALID_FISH_ID",
            Self::InvalidRoundId => "INVALID_ROUND_ID",
            Self::WrongCatchPlacement => "WRONG_CATCH_PLACEMENT",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidPlacement => "INVALID_PLACEMENT",
            Self::RoundClosed => "ROUND_CLOSED",
            Self::InvalidRoundBounds => "INVALID_ROUND_BOUNDS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::FishNotFound => "FISH_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::RankingNotFound => "RANKING_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::NoEligibleTarget => "NO_ELIGIBLE_TARGET",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::UnauthorizedMissingBearer,
        Self::UnauthorizedInvalidJwt,
        Self::UnauthorizedExpiredJwt,
        Self::Forbidden,
        Self::InvalidFishId,
        Self::InvalidRoundId,
        Self::WrongCatchPlacement,
        Self::InvalidName,
        Self::InvalidPlacement,
        Self::RoundClosed,
        Self::InvalidRoundBounds,
        Self::ValidationError,
        Self::BadRequest,
        Self::FishNotFound,
        Self::RoundNotFound,
        Self::RankingNotFound,
        Self::NotFound,
        Self::OptimisticLock,
        Self::UniqueViolation,
        Self::FkViolation,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::NoEligibleTarget,
        Self::DataCorruption,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
