//! Domain operations built on the repositories

pub mod appointments;
pub mod catalog;
pub mod notifications;
pub mod search;
pub mod settings;
pub mod users;
pub mod vehicle_types;
pub mod vehicles;

pub use appointments::{AppointmentService, AppointmentUpdate, BookAppointment};
pub use catalog::CatalogService;
pub use notifications::{BroadcastMessage, NotificationService};
pub use search::SearchService;
pub use settings::SettingsService;
pub use users::UserAdminService;
pub use vehicle_types::VehicleTypeService;
pub use vehicles::{VehicleDraft, VehicleService};

use crate::domain::{DomainError, DomainResult};

/// Trims the value and drops it when nothing is left.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trimmed value of a mandatory text field.
pub(crate) fn required(field: &str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}
