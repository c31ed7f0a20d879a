//! Repository access for the domain layer

use super::appointment::AppointmentRepository;
use super::catalog::ServiceRepository;
use super::notification::NotificationRepository;
use super::setting::SettingRepository;
use super::user::UserRepository;
use super::vehicle::VehicleRepository;
use super::vehicle_type::VehicleTypeRepository;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let vehicle = repos.vehicles().find_by_id(3).await?;
///     let service = repos.services().find_by_id(1).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn vehicle_types(&self) -> &dyn VehicleTypeRepository;
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn services(&self) -> &dyn ServiceRepository;
    fn appointments(&self) -> &dyn AppointmentRepository;
    fn notifications(&self) -> &dyn NotificationRepository;
    fn settings(&self) -> &dyn SettingRepository;
}
