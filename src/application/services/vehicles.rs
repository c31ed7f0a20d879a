//! Vehicle operations

use std::sync::Arc;

use tracing::info;

use super::{non_blank, required};
use crate::application::identity::AuthenticatedUser;
use crate::domain::vehicle::{NewVehicle, UpdateVehicleDto};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, Vehicle};

/// Vehicle fields supplied by a client. The owner is always the caller.
#[derive(Debug, Clone, Default)]
pub struct VehicleDraft {
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

pub struct VehicleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VehicleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list_own(&self, principal: &AuthenticatedUser) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().list_by_owner(principal.user_id).await
    }

    pub async fn create(
        &self,
        principal: &AuthenticatedUser,
        draft: VehicleDraft,
    ) -> DomainResult<Vehicle> {
        if draft.mileage.is_some_and(|m| m < 0) {
            return Err(DomainError::Validation("Mileage cannot be negative".into()));
        }

        let vehicle = NewVehicle {
            user_id: principal.user_id,
            make: required("Make", &draft.make)?,
            model: required("Model", &draft.model)?,
            year: draft.year,
            vin: non_blank(draft.vin),
            license_plate: non_blank(draft.license_plate),
            color: non_blank(draft.color),
            engine_type: non_blank(draft.engine_type),
            mileage: draft.mileage,
            notes: non_blank(draft.notes),
        };

        let created = self.repos.vehicles().create(vehicle).await?;
        info!(vehicle_id = created.id, user_id = principal.user_id, "Vehicle added");
        Ok(created)
    }

    pub async fn get(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<Vehicle> {
        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", id))?;

        principal.ensure_owner_or_admin(vehicle.user_id)?;
        Ok(vehicle)
    }

    pub async fn update(
        &self,
        principal: &AuthenticatedUser,
        id: i32,
        mut dto: UpdateVehicleDto,
    ) -> DomainResult<Vehicle> {
        self.get(principal, id).await?;

        if let Some(make) = dto.make.as_deref() {
            dto.make = Some(required("Make", make)?);
        }
        if let Some(model) = dto.model.as_deref() {
            dto.model = Some(required("Model", model)?);
        }
        if dto.mileage.is_some_and(|m| m < 0) {
            return Err(DomainError::Validation("Mileage cannot be negative".into()));
        }

        self.repos
            .vehicles()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", id))
    }

    /// Removes the vehicle together with its appointments.
    pub async fn delete(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        self.get(principal, id).await?;

        if !self.repos.vehicles().delete(id).await? {
            return Err(DomainError::not_found("Vehicle", id));
        }
        info!(vehicle_id = id, user_id = principal.user_id, "Vehicle deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::fixture;

    fn corolla() -> VehicleDraft {
        VehicleDraft {
            make: "Toyota".into(),
            model: "Corolla".into(),
            license_plate: Some("".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn owner_adds_and_lists_vehicle() {
        let f = fixture().await;
        let vehicles = VehicleService::new(f.repos.clone());

        let created = vehicles.create(&f.alice, corolla()).await.unwrap();
        assert_eq!(created.user_id, f.alice.user_id);
        assert_eq!(created.license_plate, None);

        let mine = vehicles.list_own(&f.alice).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert!(vehicles.list_own(&f.mallory).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn make_and_model_are_required() {
        let f = fixture().await;
        let vehicles = VehicleService::new(f.repos.clone());

        let mut draft = corolla();
        draft.model = "  ".into();
        assert!(matches!(
            vehicles.create(&f.alice, draft).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn other_users_cannot_touch_vehicle() {
        let f = fixture().await;
        let vehicles = VehicleService::new(f.repos.clone());
        let created = vehicles.create(&f.alice, corolla()).await.unwrap();

        assert!(matches!(
            vehicles.get(&f.mallory, created.id).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            vehicles.delete(&f.mallory, created.id).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(vehicles.get(&f.admin, created.id).await.is_ok());
    }

    #[tokio::test]
    async fn owner_updates_and_deletes() {
        let f = fixture().await;
        let vehicles = VehicleService::new(f.repos.clone());
        let created = vehicles.create(&f.alice, corolla()).await.unwrap();

        let updated = vehicles
            .update(
                &f.alice,
                created.id,
                UpdateVehicleDto {
                    mileage: Some(120_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.mileage, Some(120_000));

        vehicles.delete(&f.alice, created.id).await.unwrap();
        assert!(matches!(
            vehicles.get(&f.alice, created.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
