//! Vehicle DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::VehicleDraft;
use crate::domain::vehicle::{UpdateVehicleDto, VehicleWithOwner};
use crate::domain::Vehicle;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleDto {
    pub id: i32,
    pub user_id: i32,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub color: Option<String>,
    pub engine_type: Option<String>,
    pub mileage: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            make: v.make,
            model: v.model,
            year: v.year,
            vin: v.vin,
            license_plate: v.license_plate,
            color: v.color,
            engine_type: v.engine_type,
            mileage: v.mileage,
            notes: v.notes,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

/// Vehicle search hit with its owner
#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleWithOwnerDto {
    #[serde(flatten)]
    pub vehicle: VehicleDto,
    pub owner_username: String,
    pub owner_full_name: Option<String>,
}

impl From<VehicleWithOwner> for VehicleWithOwnerDto {
    fn from(v: VehicleWithOwner) -> Self {
        Self {
            vehicle: v.vehicle.into(),
            owner_username: v.owner_username,
            owner_full_name: v.owner_full_name,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub make: String,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    #[validate(length(max = 17))]
    pub vin: Option<String>,
    #[validate(length(max = 20))]
    pub license_plate: Option<String>,
    pub color: Option<String>,
    pub engine_type: Option<String>,
    #[validate(range(min = 0))]
    pub mileage: Option<i32>,
    pub notes: Option<String>,
}

impl From<CreateVehicleRequest> for VehicleDraft {
    fn from(r: CreateVehicleRequest) -> Self {
        Self {
            make: r.make,
            model: r.model,
            year: r.year,
            vin: r.vin,
            license_plate: r.license_plate,
            color: r.color,
            engine_type: r.engine_type,
            mileage: r.mileage,
            notes: r.notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub make: Option<String>,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub model: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    #[validate(length(max = 17))]
    pub vin: Option<String>,
    #[validate(length(max = 20))]
    pub license_plate: Option<String>,
    pub color: Option<String>,
    pub engine_type: Option<String>,
    #[validate(range(min = 0))]
    pub mileage: Option<i32>,
    pub notes: Option<String>,
}

impl From<UpdateVehicleRequest> for UpdateVehicleDto {
    fn from(r: UpdateVehicleRequest) -> Self {
        Self {
            make: r.make,
            model: r.model,
            year: r.year,
            vin: r.vin,
            license_plate: r.license_plate,
            color: r.color,
            engine_type: r.engine_type,
            mileage: r.mileage,
            notes: r.notes,
        }
    }
}
