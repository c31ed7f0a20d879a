use async_trait::async_trait;

use super::{NewService, Service, UpdateServiceDto};
use crate::domain::DomainResult;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: NewService) -> DomainResult<Service>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Service>>;
    /// Ordered by category, then name.
    async fn list(&self, active_only: bool) -> DomainResult<Vec<Service>>;
    async fn update(&self, id: i32, dto: UpdateServiceDto) -> DomainResult<Option<Service>>;
    /// Fails with `Conflict` while appointments still reference the service.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
    async fn search(&self, query: &str) -> DomainResult<Vec<Service>>;
}
