//! Search module

pub mod handlers;

pub use handlers::*;
