//! Where a fish is, and where a caller wants it to be.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::domain::fish::Fish;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    Discussion,
    Post,
    User,
}

impl PlacementKind {
    pub const ALL: [PlacementKind; 3] = [
        PlacementKind::Discussion,
        PlacementKind::Post,
        PlacementKind::User,
    ];
}

/// A resolved location: one kind plus the id of the target row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementTarget {
    pub kind: PlacementKind,
    pub id: i64,
}

impl PlacementTarget {
    pub fn discussion(id: i64) -> Self {
        Self {
            kind: PlacementKind::Discussion,
            id,
        }
    }

    pub fn post(id: i64) -> Self {
        Self {
            kind: PlacementKind::Post,
            id,
        }
    }

    pub fn user(id: i64) -> Self {
        Self {
            kind: PlacementKind::User,
            id,
        }
    }

    /// Build from the three nullable placement columns. `None` unless exactly one is set.
    pub fn from_columns(
        discussion_id: Option<i64>,
        post_id: Option<i64>,
        user_id: Option<i64>,
    ) -> Option<Self> {
        match (discussion_id, post_id, user_id) {
            (Some(id), None, None) => Some(Self::discussion(id)),
            (None, Some(id), None) => Some(Self::post(id)),
            (None, None, Some(id)) => Some(Self::user(id)),
            _ => None,
        }
    }

    /// Column view: `(discussion_id, post_id, user_id)` with exactly one `Some`.
    pub fn columns(&self) -> (Option<i64>, Option<i64>, Option<i64>) {
        match self.kind {
            PlacementKind::Discussion => (Some(self.id), None, None),
            PlacementKind::Post => (None, Some(self.id), None),
            PlacementKind::User => (None, None, Some(self.id)),
        }
    }
}

/// Caller-supplied placement, not yet resolved against the forum.
/// Ids may arrive as JSON numbers or numeric strings.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitPlacement {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub discussion_id: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub post_id: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub user_id: Option<i64>,
}

impl ExplicitPlacement {
    /// Shape check only: exactly one positive id. Existence and eligibility
    /// are checked by the placement engine.
    pub fn target(&self) -> Result<PlacementTarget, DomainError> {
        let supplied = [
            self.discussion_id.map(PlacementTarget::discussion),
            self.post_id.map(PlacementTarget::post),
            self.user_id.map(PlacementTarget::user),
        ];
        let mut targets = supplied.into_iter().flatten();

        match (targets.next(), targets.next()) {
            (Some(target), None) if target.id > 0 => Ok(target),
            (Some(target), None) => Err(DomainError::validation(
                ValidationKind::InvalidPlacement,
                format!("placement id must be positive, got {}", target.id),
            )),
            (None, _) => Err(DomainError::validation(
                ValidationKind::InvalidPlacement,
                "placement needs one of discussion_id, post_id or user_id",
            )),
            (Some(_), Some(_)) => Err(DomainError::validation(
                ValidationKind::InvalidPlacement,
                "placement must name exactly one of discussion_id, post_id or user_id",
            )),
        }
    }
}

/// The placement a catch request claims the fish is at.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementQuery {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub discussion_id: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub post_id: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub user_id: Option<i64>,
}

impl PlacementQuery {
    fn id_for(&self, kind: PlacementKind) -> Option<i64> {
        match kind {
            PlacementKind::Discussion => self.discussion_id,
            PlacementKind::Post => self.post_id,
            PlacementKind::User => self.user_id,
        }
    }
}

impl From<PlacementTarget> for PlacementQuery {
    fn from(target: PlacementTarget) -> Self {
        let (discussion_id, post_id, user_id) = target.columns();
        Self {
            discussion_id,
            post_id,
            user_id,
        }
    }
}

/// The `placement` attribute of a place/rename request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementRequest {
    /// Keep the current (randomly chosen) placement and release it now
    Random,
    Explicit(ExplicitPlacement),
}

/// Wire form of [`PlacementRequest`]: the keyword `"random"` or an object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PlacementInput {
    Keyword(String),
    Explicit(ExplicitPlacement),
}

impl TryFrom<PlacementInput> for PlacementRequest {
    type Error = DomainError;

    fn try_from(input: PlacementInput) -> Result<Self, Self::Error> {
        match input {
            PlacementInput::Keyword(word) if word == "random" => Ok(PlacementRequest::Random),
            PlacementInput::Keyword(word) => Err(DomainError::validation(
                ValidationKind::InvalidPlacement,
                format!("unknown placement keyword '{word}'"),
            )),
            PlacementInput::Explicit(explicit) => Ok(PlacementRequest::Explicit(explicit)),
        }
    }
}

/// Move the fish. Every other placement column is cleared by construction.
pub fn assign(target: PlacementTarget, fish: &mut Fish) {
    fish.placement = target;
}

/// True iff the query names the fish's current kind with the fish's id.
/// Ids of other kinds in the query are ignored; an absent id never matches.
pub fn matches_current(fish: &Fish, query: &PlacementQuery) -> bool {
    query.id_for(fish.placement.kind) == Some(fish.placement.id)
}
