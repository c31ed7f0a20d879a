//! Settings aggregate

pub mod model;

use async_trait::async_trait;

pub use model::{decode_value, encode_value, Setting, ShopSettings};

use crate::domain::DomainResult;

#[async_trait]
pub trait SettingRepository: Send + Sync {
    async fn get(&self, key: &str) -> DomainResult<Option<Setting>>;
    /// Upserts one key. A `None` description keeps the stored one.
    async fn set(&self, key: &str, value: &str, description: Option<String>) -> DomainResult<Setting>;
    /// Ordered by key.
    async fn list(&self) -> DomainResult<Vec<Setting>>;
}
