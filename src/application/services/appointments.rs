//! Appointment booking and lifecycle
//!
//! Every status change notifies the appointment owner. The booked price is
//! copied from the catalog once and never follows later price changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::non_blank;
use super::notifications::appointment_notice;
use super::settings::SettingsService;
use crate::application::identity::AuthenticatedUser;
use crate::domain::appointment::{AppointmentChanges, NewAppointment};
use crate::domain::{
    Appointment, AppointmentStatus, AppointmentView, DomainError, DomainResult,
    RepositoryProvider,
};

#[derive(Debug, Clone)]
pub struct BookAppointment {
    pub vehicle_id: i32,
    pub service_id: i32,
    pub appointment_date: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentUpdate {
    pub appointment_date: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
    pub technician_notes: Option<String>,
}

pub struct AppointmentService {
    repos: Arc<dyn RepositoryProvider>,
    settings: SettingsService,
}

impl AppointmentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            settings: SettingsService::new(repos.clone()),
            repos,
        }
    }

    /// Admins see every appointment, everyone else only their own.
    pub async fn list(
        &self,
        principal: &AuthenticatedUser,
        status: Option<AppointmentStatus>,
    ) -> DomainResult<Vec<AppointmentView>> {
        if principal.is_admin() {
            self.repos.appointments().list_all(status).await
        } else {
            self.repos
                .appointments()
                .list_for_user(principal.user_id, status)
                .await
        }
    }

    pub async fn get(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<AppointmentView> {
        let view = self.view(id).await?;
        principal.ensure_owner_or_admin(view.appointment.user_id)?;
        Ok(view)
    }

    pub async fn create(
        &self,
        principal: &AuthenticatedUser,
        booking: BookAppointment,
    ) -> DomainResult<AppointmentView> {
        if !self.settings.shop_settings().await?.booking_open() {
            return Err(DomainError::Validation(
                "Online booking is currently disabled".into(),
            ));
        }

        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(booking.vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", booking.vehicle_id))?;
        principal.ensure_owner_or_admin(vehicle.user_id)?;

        let service = self
            .repos
            .services()
            .find_by_id(booking.service_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Service", booking.service_id))?;
        if !service.is_active {
            return Err(DomainError::Validation(format!(
                "Service '{}' is not currently offered",
                service.name
            )));
        }

        // An admin booking on someone's behalf books for the vehicle owner.
        let created = self
            .repos
            .appointments()
            .create(NewAppointment {
                user_id: vehicle.user_id,
                vehicle_id: vehicle.id,
                service_id: service.id,
                appointment_date: booking.appointment_date,
                notes: non_blank(booking.notes),
                total_price: service.price,
            })
            .await?;

        self.repos
            .notifications()
            .create(appointment_notice(
                created.user_id,
                created.id,
                AppointmentStatus::Scheduled,
                &service.name,
            ))
            .await?;

        info!(
            appointment_id = created.id,
            user_id = created.user_id,
            service_id = service.id,
            "Appointment scheduled"
        );
        self.view(created.id).await
    }

    pub async fn update(
        &self,
        principal: &AuthenticatedUser,
        id: i32,
        update: AppointmentUpdate,
    ) -> DomainResult<AppointmentView> {
        let current = self.owned(principal, id).await?;
        if current.status.is_terminal() {
            return Err(DomainError::Validation(format!(
                "A {} appointment can no longer be changed",
                current.status
            )));
        }

        let mut changes = AppointmentChanges {
            appointment_date: update.appointment_date,
            notes: update.notes,
            technician_notes: update.technician_notes,
            ..Default::default()
        };
        if let Some(next) = update.status.filter(|s| *s != current.status) {
            changes.status = Some(current.status.transition_to(next)?);
            if next == AppointmentStatus::Completed {
                changes.completed_at = Some(Utc::now());
            }
        }

        self.apply(principal, &current, changes).await
    }

    /// Moves the appointment to `cancelled`.
    pub async fn cancel(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<AppointmentView> {
        let current = self.owned(principal, id).await?;
        let status = current.status.transition_to(AppointmentStatus::Cancelled)?;

        let changes = AppointmentChanges {
            status: Some(status),
            ..Default::default()
        };
        self.apply(principal, &current, changes).await
    }

    /// Removes the row outright. Admin housekeeping only.
    pub async fn delete(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        principal.ensure_admin()?;
        if !self.repos.appointments().delete(id).await? {
            return Err(DomainError::not_found("Appointment", id));
        }
        info!(appointment_id = id, "Appointment deleted");
        Ok(())
    }

    async fn apply(
        &self,
        principal: &AuthenticatedUser,
        current: &Appointment,
        changes: AppointmentChanges,
    ) -> DomainResult<AppointmentView> {
        if changes.is_empty() {
            return self.view(current.id).await;
        }
        let new_status = changes.status;

        self.repos
            .appointments()
            .update(current.id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", current.id))?;
        let view = self.view(current.id).await?;

        if let Some(status) = new_status {
            self.repos
                .notifications()
                .create(appointment_notice(
                    current.user_id,
                    current.id,
                    status,
                    &view.service_name,
                ))
                .await?;
            info!(
                appointment_id = current.id,
                from = %current.status,
                to = %status,
                by = principal.user_id,
                "Appointment status changed"
            );
        }

        Ok(view)
    }

    async fn owned(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<Appointment> {
        let appointment = self
            .repos
            .appointments()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", id))?;
        principal.ensure_owner_or_admin(appointment.user_id)?;
        Ok(appointment)
    }

    async fn view(&self, id: i32) -> DomainResult<AppointmentView> {
        self.repos
            .appointments()
            .find_view(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Duration;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::application::services::testing::{fixture, Fixture};
    use crate::application::services::{SettingsService, VehicleDraft, VehicleService};
    use crate::domain::catalog::{NewService, UpdateServiceDto};
    use crate::domain::notification::APPOINTMENT_NOTIFICATION_TYPE;

    struct Setup {
        f: Fixture,
        appointments: AppointmentService,
        vehicle_id: i32,
        service_id: i32,
    }

    async fn setup() -> Setup {
        let f = fixture().await;
        let vehicle = VehicleService::new(f.repos.clone())
            .create(
                &f.alice,
                VehicleDraft {
                    make: "Toyota".into(),
                    model: "Corolla".into(),
                    license_plate: Some("ZG-1234-AB".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let service = f
            .repos
            .services()
            .create(NewService {
                name: "Brake check".into(),
                description: None,
                price: Decimal::new(4550, 2),
                duration_minutes: 45,
                category: Some("Brakes".into()),
            })
            .await
            .unwrap();

        Setup {
            appointments: AppointmentService::new(f.repos.clone()),
            vehicle_id: vehicle.id,
            service_id: service.id,
            f,
        }
    }

    fn booking(s: &Setup) -> BookAppointment {
        BookAppointment {
            vehicle_id: s.vehicle_id,
            service_id: s.service_id,
            appointment_date: Utc::now() + Duration::days(2),
            notes: Some("Squeaks when braking".into()),
        }
    }

    #[tokio::test]
    async fn booking_snapshots_price_and_notifies() {
        let s = setup().await;
        let view = s.appointments.create(&s.f.alice, booking(&s)).await.unwrap();

        assert_eq!(view.appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(view.appointment.total_price, Decimal::new(4550, 2));
        assert_eq!(view.service_name, "Brake check");
        assert_eq!(view.license_plate.as_deref(), Some("ZG-1234-AB"));
        assert_eq!(view.owner_username, "alice");

        s.f.repos
            .services()
            .update(
                s.service_id,
                UpdateServiceDto {
                    price: Some(Decimal::from(99)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let reloaded = s.appointments.get(&s.f.alice, view.appointment.id).await.unwrap();
        assert_eq!(reloaded.appointment.total_price, Decimal::new(4550, 2));

        let inbox = s
            .f
            .repos
            .notifications()
            .list_for_user(s.f.alice.user_id, false)
            .await
            .unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].notification_type, APPOINTMENT_NOTIFICATION_TYPE);
        assert_eq!(inbox[0].related_appointment_id, Some(view.appointment.id));
    }

    #[tokio::test]
    async fn cannot_book_someone_elses_vehicle() {
        let s = setup().await;
        assert!(matches!(
            s.appointments.create(&s.f.mallory, booking(&s)).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn admin_books_on_behalf_of_owner() {
        let s = setup().await;
        let view = s.appointments.create(&s.f.admin, booking(&s)).await.unwrap();
        assert_eq!(view.appointment.user_id, s.f.alice.user_id);
    }

    #[tokio::test]
    async fn missing_or_inactive_references_are_rejected() {
        let s = setup().await;

        let mut ghost_vehicle = booking(&s);
        ghost_vehicle.vehicle_id = 9999;
        assert!(matches!(
            s.appointments.create(&s.f.alice, ghost_vehicle).await,
            Err(DomainError::NotFound { .. })
        ));

        s.f.repos
            .services()
            .update(
                s.service_id,
                UpdateServiceDto {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(matches!(
            s.appointments.create(&s.f.alice, booking(&s)).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn booking_can_be_switched_off() {
        let s = setup().await;
        let mut off = BTreeMap::new();
        off.insert("booking_enabled".to_string(), json!(false));
        SettingsService::new(s.f.repos.clone())
            .update(&s.f.admin, off)
            .await
            .unwrap();

        assert!(matches!(
            s.appointments.create(&s.f.alice, booking(&s)).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn lifecycle_follows_transition_table() {
        let s = setup().await;
        let id = s.appointments.create(&s.f.alice, booking(&s)).await.unwrap().appointment.id;

        let skip = AppointmentUpdate {
            status: Some(AppointmentStatus::Completed),
            ..Default::default()
        };
        assert!(matches!(
            s.appointments.update(&s.f.admin, id, skip.clone()).await,
            Err(DomainError::Validation(_))
        ));

        let start = AppointmentUpdate {
            status: Some(AppointmentStatus::InProgress),
            technician_notes: Some("Pads worn".into()),
            ..Default::default()
        };
        let started = s.appointments.update(&s.f.admin, id, start).await.unwrap();
        assert_eq!(started.appointment.status, AppointmentStatus::InProgress);
        assert!(started.appointment.completed_at.is_none());

        let done = s.appointments.update(&s.f.admin, id, skip).await.unwrap();
        assert_eq!(done.appointment.status, AppointmentStatus::Completed);
        assert!(done.appointment.completed_at.is_some());

        let late_edit = AppointmentUpdate {
            notes: Some("One more thing".into()),
            ..Default::default()
        };
        assert!(matches!(
            s.appointments.update(&s.f.alice, id, late_edit).await,
            Err(DomainError::Validation(_))
        ));

        // scheduled, in_progress, completed
        let unread = s
            .f
            .repos
            .notifications()
            .unread_count(s.f.alice.user_id)
            .await
            .unwrap();
        assert_eq!(unread, 3);
    }

    #[tokio::test]
    async fn only_owner_or_admin_may_change_or_cancel() {
        let s = setup().await;
        let id = s.appointments.create(&s.f.alice, booking(&s)).await.unwrap().appointment.id;

        let edit = AppointmentUpdate {
            notes: Some("Hijacked".into()),
            ..Default::default()
        };
        assert!(matches!(
            s.appointments.update(&s.f.mallory, id, edit).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            s.appointments.cancel(&s.f.mallory, id).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            s.appointments.get(&s.f.mallory, id).await,
            Err(DomainError::Forbidden(_))
        ));

        let cancelled = s.appointments.cancel(&s.f.alice, id).await.unwrap();
        assert_eq!(cancelled.appointment.status, AppointmentStatus::Cancelled);
        assert!(matches!(
            s.appointments.cancel(&s.f.alice, id).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn listing_is_scoped_to_caller() {
        let s = setup().await;
        s.appointments.create(&s.f.alice, booking(&s)).await.unwrap();

        assert_eq!(s.appointments.list(&s.f.alice, None).await.unwrap().len(), 1);
        assert!(s.appointments.list(&s.f.mallory, None).await.unwrap().is_empty());
        assert_eq!(s.appointments.list(&s.f.admin, None).await.unwrap().len(), 1);
        assert!(s
            .appointments
            .list(&s.f.admin, Some(AppointmentStatus::Cancelled))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn delete_is_admin_only() {
        let s = setup().await;
        let id = s.appointments.create(&s.f.alice, booking(&s)).await.unwrap().appointment.id;

        assert!(matches!(
            s.appointments.delete(&s.f.alice, id).await,
            Err(DomainError::Forbidden(_))
        ));
        s.appointments.delete(&s.f.admin, id).await.unwrap();
        assert!(matches!(
            s.appointments.get(&s.f.admin, id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
