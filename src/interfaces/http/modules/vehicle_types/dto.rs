//! Vehicle type DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::VehicleType;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleTypeDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    /// Seeded types cannot be deleted
    pub is_system: bool,
    pub created_by: Option<i32>,
    pub creator_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<VehicleType> for VehicleTypeDto {
    fn from(vt: VehicleType) -> Self {
        Self {
            id: vt.id,
            name: vt.name,
            description: vt.description,
            icon: vt.icon,
            is_system: vt.is_system,
            created_by: vt.created_by,
            creator_name: vt.creator_name,
            created_at: vt.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleTypeRequest {
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(length(max = 16))]
    pub icon: Option<String>,
}
