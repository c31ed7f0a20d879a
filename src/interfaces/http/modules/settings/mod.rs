//! Shop settings module

pub mod handlers;

pub use handlers::*;
