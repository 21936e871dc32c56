pub mod catches;
pub mod fishes;
pub mod placement;
pub mod rankings;
pub mod rounds;

pub use catches::{CatchService, PlaceAttributes};
pub use fishes::FishService;
pub use placement::PlacementEngine;
pub use rankings::RankingService;
pub use rounds::RoundService;
