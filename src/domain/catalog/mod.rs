//! Service catalog aggregate

pub mod model;
pub mod repository;

pub use model::{
    cents_to_price, price_to_cents, NewService, Service, UpdateServiceDto,
    DEFAULT_DURATION_MINUTES,
};
pub use repository::ServiceRepository;
