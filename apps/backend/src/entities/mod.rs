pub mod discussions;
pub mod fishes;
pub mod posts;
pub mod rankings;
pub mod rounds;
pub mod users;

pub use discussions::Entity as Discussions;
pub use fishes::Entity as Fishes;
pub use posts::Entity as Posts;
pub use rankings::Entity as Rankings;
pub use rounds::Entity as Rounds;
pub use users::Entity as Users;
