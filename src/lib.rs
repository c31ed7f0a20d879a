//! # Auto-service shop backend
//!
//! REST API for a vehicle service shop: customers register, add their
//! vehicles and book services from the catalog; administrators manage the
//! catalog, users, appointments and shop settings.
//!
//! ## Architecture
//!
//! - **domain**: entities, status rules and repository traits
//! - **application**: use cases (authentication, booking, notifications, ...)
//! - **infrastructure**: SQLite persistence via SeaORM, password hashing, shutdown
//! - **session**: bearer-token session store
//! - **interfaces**: axum REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod session;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::http::{create_api_router, AppState};
