//! Application layer: use cases orchestrating the domain repositories

pub mod identity;
pub mod services;

pub use identity::{AuthResult, AuthService, AuthenticatedUser};
pub use services::{
    AppointmentService, CatalogService, NotificationService, SearchService, SettingsService,
    UserAdminService, VehicleService, VehicleTypeService,
};
