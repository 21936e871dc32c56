//! Domain layer: pure fish and placement rules, no I/O.

pub mod fish;
pub mod naming;
pub mod pick;
pub mod placement;
pub mod round;
pub mod validity;

#[cfg(test)]
mod tests_props_pick;

pub use fish::Fish;
pub use placement::{
    assign, matches_current, ExplicitPlacement, PlacementInput, PlacementKind, PlacementQuery,
    PlacementRequest, PlacementTarget,
};
pub use round::Round;
