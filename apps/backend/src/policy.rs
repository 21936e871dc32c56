//! Who may do what to a fish or round.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::{Fish, Round};

/// Capabilities granted to a user, carried on the wire as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "catchthefish.catch")]
    Catch,
    #[serde(rename = "catchthefish.choose-place")]
    ChoosePlace,
    #[serde(rename = "catchthefish.choose-name")]
    ChooseName,
    #[serde(rename = "catchthefish.see-rankings")]
    SeeRankings,
}

impl Permission {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::Catch => "catchthefish.catch",
            Permission::ChoosePlace => "catchthefish.choose-place",
            Permission::ChooseName => "catchthefish.choose-name",
            Permission::SeeRankings => "catchthefish.see-rankings",
        }
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "catchthefish.catch" => Ok(Permission::Catch),
            "catchthefish.choose-place" => Ok(Permission::ChoosePlace),
            "catchthefish.choose-name" => Ok(Permission::ChooseName),
            "catchthefish.see-rankings" => Ok(Permission::SeeRankings),
            other => Err(format!("unknown permission: {other}")),
        }
    }
}

/// Actions checked against a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Catch,
    Place,
    Name,
    ListRankings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub permissions: HashSet<Permission>,
}

impl Actor {
    pub fn new(id: i64, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            id,
            permissions: permissions.into_iter().collect(),
        }
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Fish(&'a Fish),
    Round(&'a Round),
}

pub trait Gate: Send + Sync {
    fn can_perform(
        &self,
        actor: &Actor,
        ability: Ability,
        subject: Subject<'_>,
        now: OffsetDateTime,
    ) -> bool;
}

/// Default rules.
///
/// - catch: `Catch` and the fish's placement is already valid
/// - place / name: `ChoosePlace` / `ChooseName`, actor made the last catch,
///   and the grace window after that catch is still open
/// - list rankings: `SeeRankings`
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissionGate;

impl PermissionGate {
    fn can_edit(actor: &Actor, fish: &Fish, permission: Permission, now: OffsetDateTime) -> bool {
        actor.has(permission)
            && fish.user_id_last_catch == Some(actor.id)
            && now < fish.placement_valid_since
    }
}

impl Gate for PermissionGate {
    fn can_perform(
        &self,
        actor: &Actor,
        ability: Ability,
        subject: Subject<'_>,
        now: OffsetDateTime,
    ) -> bool {
        match (ability, subject) {
            (Ability::Catch, Subject::Fish(fish)) => {
                actor.has(Permission::Catch) && fish.is_catchable(now)
            }
            (Ability::Place, Subject::Fish(fish)) => {
                Self::can_edit(actor, fish, Permission::ChoosePlace, now)
            }
            (Ability::Name, Subject::Fish(fish)) => {
                Self::can_edit(actor, fish, Permission::ChooseName, now)
            }
            (Ability::ListRankings, Subject::Round(_)) => actor.has(Permission::SeeRankings),
            _ => false,
        }
    }
}
