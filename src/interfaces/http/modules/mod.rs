//! Per-resource handlers and DTOs

pub mod appointments;
pub mod auth;
pub mod health;
pub mod notifications;
pub mod search;
pub mod services;
pub mod settings;
pub mod users;
pub mod vehicle_types;
pub mod vehicles;
