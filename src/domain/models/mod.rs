pub mod audit;
pub mod auth;
pub mod event;
pub mod settings;
pub mod trainer;
pub mod user;
