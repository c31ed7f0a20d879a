//! Service catalog DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::catalog::{NewService, UpdateServiceDto, DEFAULT_DURATION_MINUTES};
use crate::domain::Service;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = f64, example = 60.0)]
    pub price: Decimal,
    pub duration_minutes: i32,
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Service> for ServiceDto {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            price: s.price,
            duration_minutes: s.duration_minutes,
            category: s.category,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    pub description: Option<String>,
    /// Non-negative price in the shop currency
    #[schema(value_type = f64, example = 60.0)]
    pub price: Decimal,
    /// Defaults to 60
    #[validate(range(min = 1, message = "must be positive"))]
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
}

impl From<CreateServiceRequest> for NewService {
    fn from(r: CreateServiceRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            price: r.price,
            duration_minutes: r.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
            category: r.category,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    #[validate(range(min = 1, message = "must be positive"))]
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateServiceRequest> for UpdateServiceDto {
    fn from(r: UpdateServiceRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            price: r.price,
            duration_minutes: r.duration_minutes,
            category: r.category,
            is_active: r.is_active,
        }
    }
}
