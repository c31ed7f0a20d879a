use async_trait::async_trait;

use super::{NewVehicle, UpdateVehicleDto, Vehicle, VehicleWithOwner};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: NewVehicle) -> DomainResult<Vehicle>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>>;
    async fn list_by_owner(&self, user_id: i32) -> DomainResult<Vec<Vehicle>>;
    async fn update(&self, id: i32, dto: UpdateVehicleDto) -> DomainResult<Option<Vehicle>>;
    async fn delete(&self, id: i32) -> DomainResult<bool>;
    async fn search(&self, query: &str) -> DomainResult<Vec<VehicleWithOwner>>;
}
