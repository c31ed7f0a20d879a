//! Authentication module: login, registration, sessions, passwords

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
