pub mod auth_service;
pub mod blocking;
pub mod conflict;
pub mod expansion;
pub mod titles;
