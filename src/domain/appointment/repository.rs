use async_trait::async_trait;

use super::{Appointment, AppointmentChanges, AppointmentStatus, AppointmentView, NewAppointment};
use crate::domain::DomainResult;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Inserts with status `scheduled`.
    async fn create(&self, appointment: NewAppointment) -> DomainResult<Appointment>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Appointment>>;
    async fn find_view(&self, id: i32) -> DomainResult<Option<AppointmentView>>;

    /// Newest appointment date first.
    async fn list_for_user(
        &self,
        user_id: i32,
        status: Option<AppointmentStatus>,
    ) -> DomainResult<Vec<AppointmentView>>;
    async fn list_all(&self, status: Option<AppointmentStatus>) -> DomainResult<Vec<AppointmentView>>;

    async fn update(&self, id: i32, changes: AppointmentChanges) -> DomainResult<Option<Appointment>>;
    async fn delete(&self, id: i32) -> DomainResult<bool>;
    async fn search(&self, query: &str) -> DomainResult<Vec<AppointmentView>>;
}
