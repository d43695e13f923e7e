pub mod audit;
pub mod auth;
pub mod backup;
pub mod calendar;
pub mod event;
pub mod health;
pub mod mark;
pub mod settings;
pub mod trainer;
pub mod user;
