//! SeaORM adapters. Functions return `DbErr`; repos map to `DomainError`.

pub mod fishes_sea;
pub mod rankings_sea;
pub mod rounds_sea;
pub mod targets_sea;
