//! Vehicle domain entity

use chrono::{DateTime, Utc};

/// A customer's vehicle. Owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
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

impl Vehicle {
    /// "Make Model (PLATE)" as shown on appointment lists.
    pub fn label(&self) -> String {
        match self.license_plate.as_deref() {
            Some(plate) if !plate.is_empty() => format!("{} {} ({})", self.make, self.model, plate),
            _ => format!("{} {}", self.make, self.model),
        }
    }
}

/// Vehicle joined with its owner, as returned by search.
#[derive(Debug, Clone)]
pub struct VehicleWithOwner {
    pub vehicle: Vehicle,
    pub owner_username: String,
    pub owner_full_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewVehicle {
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
}

#[derive(Debug, Clone, Default)]
pub struct UpdateVehicleDto {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub color: Option<String>,
    pub engine_type: Option<String>,
    pub mileage: Option<i32>,
    pub notes: Option<String>,
}
