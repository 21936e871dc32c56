pub mod current_actor;
pub mod path_ids;
pub mod validated_json;

pub use current_actor::CurrentActor;
pub use path_ids::{FishId, RoundId};
pub use validated_json::ValidatedJson;
