pub mod appointment;
pub mod catalog;
pub mod notification;
pub mod repositories;
pub mod setting;
pub mod user;
pub mod vehicle;
pub mod vehicle_type;

// Re-export commonly used types
pub use appointment::{Appointment, AppointmentStatus, AppointmentView};
pub use catalog::Service;
pub use notification::Notification;
pub use repositories::RepositoryProvider;
pub use setting::{Setting, ShopSettings};
pub use user::{User, UserRole};
pub use vehicle::Vehicle;
pub use vehicle_type::VehicleType;

pub use crate::shared::types::errors::{DomainError, DomainResult};
