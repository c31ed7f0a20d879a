//! Vehicle type aggregate
//!
//! System types are seeded at startup and cannot be deleted; users may add
//! their own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::DomainResult;

pub const DEFAULT_ICON: &str = "🚗";

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleType {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub is_system: bool,
    pub created_by: Option<i32>,
    /// Username of the creator, filled by list queries.
    pub creator_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl VehicleType {
    /// System types are never deletable; custom ones only by their creator or an admin.
    pub fn can_be_deleted_by(&self, user_id: i32, is_admin: bool) -> bool {
        !self.is_system && (is_admin || self.created_by == Some(user_id))
    }
}

#[derive(Debug, Clone)]
pub struct NewVehicleType {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_by: Option<i32>,
}

#[async_trait]
pub trait VehicleTypeRepository: Send + Sync {
    /// System types first, then alphabetical.
    async fn list(&self) -> DomainResult<Vec<VehicleType>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<VehicleType>>;
    /// Fails with `Conflict` when the name is taken.
    async fn create(&self, vehicle_type: NewVehicleType) -> DomainResult<VehicleType>;
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
