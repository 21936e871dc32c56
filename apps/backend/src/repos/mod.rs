//! Repositories: adapter calls mapped to domain types and `DomainError`.

pub mod fishes;
pub mod rankings;
pub mod rounds;
pub mod targets;
