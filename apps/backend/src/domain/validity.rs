//! When a fish's placement becomes catchable after an action.
//!
//! | action            | actor capability                      | policy              |
//! |-------------------|---------------------------------------|---------------------|
//! | catch             | choose-place or choose-name           | `Delayed(grace)`    |
//! | catch             | neither                               | `Immediate`         |
//! | place (any form)  | -                                     | `Immediate`         |
//! | rename            | cannot `place` the pre-request fish   | `Immediate`         |
//! | rename            | can `place` the pre-request fish      | `Unchanged`         |

use time::{Duration, OffsetDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityPolicy {
    Immediate,
    Delayed(Duration),
    Unchanged,
}

impl ValidityPolicy {
    /// New `placement_valid_since`, or `None` when it must stay as is.
    pub fn valid_since(self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        match self {
            ValidityPolicy::Immediate => Some(now),
            ValidityPolicy::Delayed(grace) => Some(now.saturating_add(grace)),
            ValidityPolicy::Unchanged => None,
        }
    }
}

/// Catchers who may re-place or rename get a grace window before others can catch.
pub fn after_catch(
    can_choose_place: bool,
    can_choose_name: bool,
    auto_placed_after: Duration,
) -> ValidityPolicy {
    if can_choose_place || can_choose_name {
        ValidityPolicy::Delayed(auto_placed_after)
    } else {
        ValidityPolicy::Immediate
    }
}

pub fn after_place() -> ValidityPolicy {
    ValidityPolicy::Immediate
}

/// `can_place_snapshot` is the `place` decision on the fish as it was before the request.
pub fn after_rename(can_place_snapshot: bool) -> ValidityPolicy {
    if can_place_snapshot {
        ValidityPolicy::Unchanged
    } else {
        ValidityPolicy::Immediate
    }
}
