pub mod backup;
pub mod factory;
pub mod repositories;
