//! SeaORM implementation of AppointmentRepository
//!
//! List and search queries join users, vehicles and services so callers get
//! display names in one round trip.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use super::{contains_pattern, db_err, APPOINTMENT_SEARCH_LIMIT};
use crate::domain::appointment::{
    Appointment, AppointmentChanges, AppointmentRepository, AppointmentStatus, AppointmentView,
    NewAppointment,
};
use crate::domain::catalog::{cents_to_price, price_to_cents};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{appointment, service, user, vehicle};

pub struct SeaOrmAppointmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAppointmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_views(&self, query: Select<appointment::Entity>) -> DomainResult<Vec<AppointmentView>> {
        let rows = query
            .order_by_desc(appointment::Column::AppointmentDate)
            .order_by_desc(appointment::Column::Id)
            .into_model::<AppointmentRow>()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        rows.into_iter().map(row_to_view).collect()
    }
}

/// One appointment plus the joined display columns.
#[derive(Debug, FromQueryResult)]
struct AppointmentRow {
    id: i32,
    user_id: i32,
    vehicle_id: i32,
    service_id: i32,
    appointment_date: DateTime<Utc>,
    status: String,
    notes: Option<String>,
    technician_notes: Option<String>,
    total_price_cents: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    service_name: String,
    vehicle_make: String,
    vehicle_model: String,
    license_plate: Option<String>,
    owner_username: String,
    owner_full_name: Option<String>,
}

fn view_query() -> Select<appointment::Entity> {
    appointment::Entity::find()
        .select_only()
        .columns([
            appointment::Column::Id,
            appointment::Column::UserId,
            appointment::Column::VehicleId,
            appointment::Column::ServiceId,
            appointment::Column::AppointmentDate,
            appointment::Column::Status,
            appointment::Column::Notes,
            appointment::Column::TechnicianNotes,
            appointment::Column::TotalPriceCents,
            appointment::Column::CreatedAt,
            appointment::Column::UpdatedAt,
            appointment::Column::CompletedAt,
        ])
        .column_as(service::Column::Name, "service_name")
        .column_as(vehicle::Column::Make, "vehicle_make")
        .column_as(vehicle::Column::Model, "vehicle_model")
        .column_as(vehicle::Column::LicensePlate, "license_plate")
        .column_as(user::Column::Username, "owner_username")
        .column_as(user::Column::FullName, "owner_full_name")
        .join(JoinType::InnerJoin, appointment::Relation::User.def())
        .join(JoinType::InnerJoin, appointment::Relation::Vehicle.def())
        .join(JoinType::InnerJoin, appointment::Relation::Service.def())
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: appointment::AppointmentStatus) -> AppointmentStatus {
    match status {
        appointment::AppointmentStatus::Scheduled => AppointmentStatus::Scheduled,
        appointment::AppointmentStatus::InProgress => AppointmentStatus::InProgress,
        appointment::AppointmentStatus::Completed => AppointmentStatus::Completed,
        appointment::AppointmentStatus::Cancelled => AppointmentStatus::Cancelled,
    }
}

fn domain_status_to_entity(status: AppointmentStatus) -> appointment::AppointmentStatus {
    match status {
        AppointmentStatus::Scheduled => appointment::AppointmentStatus::Scheduled,
        AppointmentStatus::InProgress => appointment::AppointmentStatus::InProgress,
        AppointmentStatus::Completed => appointment::AppointmentStatus::Completed,
        AppointmentStatus::Cancelled => appointment::AppointmentStatus::Cancelled,
    }
}

fn model_to_domain(m: appointment::Model) -> Appointment {
    Appointment {
        id: m.id,
        user_id: m.user_id,
        vehicle_id: m.vehicle_id,
        service_id: m.service_id,
        appointment_date: m.appointment_date,
        status: entity_status_to_domain(m.status),
        notes: m.notes,
        technician_notes: m.technician_notes,
        total_price: cents_to_price(m.total_price_cents),
        created_at: m.created_at,
        updated_at: m.updated_at,
        completed_at: m.completed_at,
    }
}

fn row_to_view(row: AppointmentRow) -> DomainResult<AppointmentView> {
    let status = appointment::AppointmentStatus::try_from_value(&row.status).map_err(db_err)?;

    Ok(AppointmentView {
        appointment: Appointment {
            id: row.id,
            user_id: row.user_id,
            vehicle_id: row.vehicle_id,
            service_id: row.service_id,
            appointment_date: row.appointment_date,
            status: entity_status_to_domain(status),
            notes: row.notes,
            technician_notes: row.technician_notes,
            total_price: cents_to_price(row.total_price_cents),
            created_at: row.created_at,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
        },
        service_name: row.service_name,
        vehicle_make: row.vehicle_make,
        vehicle_model: row.vehicle_model,
        license_plate: row.license_plate,
        owner_username: row.owner_username,
        owner_full_name: row.owner_full_name,
    })
}

// ── AppointmentRepository impl ──────────────────────────────────

#[async_trait]
impl AppointmentRepository for SeaOrmAppointmentRepository {
    async fn create(&self, dto: NewAppointment) -> DomainResult<Appointment> {
        let total_price_cents = price_to_cents(dto.total_price).ok_or_else(|| {
            DomainError::Validation(format!("Price {} is out of range", dto.total_price))
        })?;
        let now = Utc::now();

        let active = appointment::ActiveModel {
            user_id: Set(dto.user_id),
            vehicle_id: Set(dto.vehicle_id),
            service_id: Set(dto.service_id),
            appointment_date: Set(dto.appointment_date),
            status: Set(appointment::AppointmentStatus::Scheduled),
            notes: Set(dto.notes),
            technician_notes: Set(None),
            total_price_cents: Set(total_price_cents),
            created_at: Set(now),
            updated_at: Set(now),
            completed_at: Set(None),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Appointment>> {
        let model = appointment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn find_view(&self, id: i32) -> DomainResult<Option<AppointmentView>> {
        let query = view_query().filter(appointment::Column::Id.eq(id));
        Ok(self.fetch_views(query).await?.into_iter().next())
    }

    async fn list_for_user(
        &self,
        user_id: i32,
        status: Option<AppointmentStatus>,
    ) -> DomainResult<Vec<AppointmentView>> {
        let mut query = view_query().filter(appointment::Column::UserId.eq(user_id));
        if let Some(status) = status {
            query = query.filter(appointment::Column::Status.eq(domain_status_to_entity(status)));
        }
        self.fetch_views(query).await
    }

    async fn list_all(&self, status: Option<AppointmentStatus>) -> DomainResult<Vec<AppointmentView>> {
        let mut query = view_query();
        if let Some(status) = status {
            query = query.filter(appointment::Column::Status.eq(domain_status_to_entity(status)));
        }
        self.fetch_views(query).await
    }

    async fn update(&self, id: i32, changes: AppointmentChanges) -> DomainResult<Option<Appointment>> {
        let Some(existing) = appointment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(model_to_domain(existing)));
        }

        let mut active: appointment::ActiveModel = existing.into();

        if let Some(date) = changes.appointment_date {
            active.appointment_date = Set(date);
        }
        if let Some(status) = changes.status {
            active.status = Set(domain_status_to_entity(status));
        }
        if let Some(notes) = changes.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(technician_notes) = changes.technician_notes {
            active.technician_notes = Set(Some(technician_notes));
        }
        if let Some(completed_at) = changes.completed_at {
            active.completed_at = Set(Some(completed_at));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = appointment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn search(&self, query: &str) -> DomainResult<Vec<AppointmentView>> {
        let pattern = contains_pattern(query.trim());
        let query = view_query()
            .filter(
                Condition::any()
                    .add(vehicle::Column::LicensePlate.like(pattern.clone()))
                    .add(vehicle::Column::Make.like(pattern.clone()))
                    .add(vehicle::Column::Model.like(pattern.clone()))
                    .add(user::Column::Username.like(pattern.clone()))
                    .add(user::Column::FullName.like(pattern.clone()))
                    .add(appointment::Column::Status.like(pattern.clone()))
                    .add(service::Column::Name.like(pattern.clone())),
            )
            .limit(APPOINTMENT_SEARCH_LIMIT);

        self.fetch_views(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::{
        insert_service, insert_user, insert_vehicle, test_connection,
    };
    use chrono::Duration;
    use rust_decimal::Decimal;

    struct Fixture {
        repo: SeaOrmAppointmentRepository,
        user_id: i32,
        vehicle_id: i32,
        service_id: i32,
    }

    async fn fixture() -> Fixture {
        let db = test_connection().await;
        let user_id = insert_user(&db, "ana").await;
        let vehicle_id = insert_vehicle(&db, user_id, "ZG-1234-AB").await;
        let service_id = insert_service(&db, "Brake pads", 12000).await;
        Fixture {
            repo: SeaOrmAppointmentRepository::new(db),
            user_id,
            vehicle_id,
            service_id,
        }
    }

    fn booking(f: &Fixture, days_ahead: i64) -> NewAppointment {
        NewAppointment {
            user_id: f.user_id,
            vehicle_id: f.vehicle_id,
            service_id: f.service_id,
            appointment_date: Utc::now() + Duration::days(days_ahead),
            notes: Some("Squeaking front left".into()),
            total_price: Decimal::from(120),
        }
    }

    #[tokio::test]
    async fn create_starts_scheduled() {
        let f = fixture().await;
        let created = f.repo.create(booking(&f, 1)).await.unwrap();
        assert_eq!(created.status, AppointmentStatus::Scheduled);
        assert_eq!(created.total_price, Decimal::from(120));
        assert!(created.completed_at.is_none());
    }

    #[tokio::test]
    async fn view_carries_joined_names() {
        let f = fixture().await;
        let created = f.repo.create(booking(&f, 1)).await.unwrap();

        let view = f.repo.find_view(created.id).await.unwrap().unwrap();
        assert_eq!(view.service_name, "Brake pads");
        assert_eq!(view.vehicle_make, "Toyota");
        assert_eq!(view.license_plate.as_deref(), Some("ZG-1234-AB"));
        assert_eq!(view.owner_username, "ana");
        assert_eq!(view.appointment.id, created.id);

        assert!(f.repo.find_view(created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lists_filter_by_status_newest_first() {
        let f = fixture().await;
        let early = f.repo.create(booking(&f, 1)).await.unwrap();
        let late = f.repo.create(booking(&f, 5)).await.unwrap();
        f.repo
            .update(
                early.id,
                AppointmentChanges {
                    status: Some(AppointmentStatus::Cancelled),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let mine = f.repo.list_for_user(f.user_id, None).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].appointment.id, late.id);

        let cancelled = f
            .repo
            .list_all(Some(AppointmentStatus::Cancelled))
            .await
            .unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].appointment.id, early.id);

        assert!(f.repo.list_for_user(f.user_id + 1, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_matches_plate_owner_and_service() {
        let f = fixture().await;
        f.repo.create(booking(&f, 1)).await.unwrap();

        assert_eq!(f.repo.search("zg-1234").await.unwrap().len(), 1);
        assert_eq!(f.repo.search("ANA").await.unwrap().len(), 1);
        assert_eq!(f.repo.search("brake").await.unwrap().len(), 1);
        assert_eq!(f.repo.search("sched").await.unwrap().len(), 1);
        assert!(f.repo.search("volvo").await.unwrap().is_empty());
    }
}
