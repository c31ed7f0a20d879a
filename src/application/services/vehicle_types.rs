//! Vehicle type operations

use std::sync::Arc;

use tracing::info;

use super::{non_blank, required};
use crate::application::identity::AuthenticatedUser;
use crate::domain::vehicle_type::NewVehicleType;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, VehicleType};

pub struct VehicleTypeService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VehicleTypeService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<VehicleType>> {
        self.repos.vehicle_types().list().await
    }

    /// Adds a custom type owned by the caller.
    pub async fn create(
        &self,
        principal: &AuthenticatedUser,
        name: &str,
        description: Option<String>,
        icon: Option<String>,
    ) -> DomainResult<VehicleType> {
        let created = self
            .repos
            .vehicle_types()
            .create(NewVehicleType {
                name: required("Name", name)?,
                description: non_blank(description),
                icon: non_blank(icon),
                created_by: Some(principal.user_id),
            })
            .await?;

        info!(vehicle_type_id = created.id, user_id = principal.user_id, "Vehicle type created");
        Ok(created)
    }

    pub async fn delete(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        let vehicle_type = self
            .repos
            .vehicle_types()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle type", id))?;

        if vehicle_type.is_system {
            return Err(DomainError::Forbidden(
                "System vehicle types cannot be deleted".into(),
            ));
        }
        if !vehicle_type.can_be_deleted_by(principal.user_id, principal.is_admin()) {
            return Err(DomainError::Forbidden(
                "Only the creator or an admin can delete this vehicle type".into(),
            ));
        }

        self.repos.vehicle_types().delete(id).await?;
        info!(vehicle_type_id = id, user_id = principal.user_id, "Vehicle type deleted");
        Ok(())
    }
}
