//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `middleware`: bearer-token session authentication
//! - `modules`: handlers and DTOs per resource
//! - `router`: route table with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

pub use router::create_api_router;
pub use state::AppState;
