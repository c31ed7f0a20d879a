//! Service catalog operations

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use super::{non_blank, required};
use crate::application::identity::AuthenticatedUser;
use crate::domain::catalog::{NewService, UpdateServiceDto};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, Service};

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Offerings currently bookable.
    pub async fn list_active(&self) -> DomainResult<Vec<Service>> {
        self.repos.services().list(true).await
    }

    /// Every offering, retired ones included.
    pub async fn list_all(&self, principal: &AuthenticatedUser) -> DomainResult<Vec<Service>> {
        principal.ensure_admin()?;
        self.repos.services().list(false).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Service> {
        self.repos
            .services()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Service", id))
    }

    pub async fn create(
        &self,
        principal: &AuthenticatedUser,
        service: NewService,
    ) -> DomainResult<Service> {
        principal.ensure_admin()?;
        validate_price(service.price)?;
        validate_duration(service.duration_minutes)?;

        let service = NewService {
            name: required("Name", &service.name)?,
            description: non_blank(service.description),
            category: non_blank(service.category),
            ..service
        };

        let created = self.repos.services().create(service).await?;
        info!(service_id = created.id, name = %created.name, "Service created");
        Ok(created)
    }

    pub async fn update(
        &self,
        principal: &AuthenticatedUser,
        id: i32,
        mut dto: UpdateServiceDto,
    ) -> DomainResult<Service> {
        principal.ensure_admin()?;
        if let Some(price) = dto.price {
            validate_price(price)?;
        }
        if let Some(duration) = dto.duration_minutes {
            validate_duration(duration)?;
        }
        if let Some(name) = dto.name.as_deref() {
            dto.name = Some(required("Name", name)?);
        }

        self.repos
            .services()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Service", id))
    }

    /// Fails with `Conflict` while appointments reference the service;
    /// deactivate it instead.
    pub async fn delete(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        principal.ensure_admin()?;
        if !self.repos.services().delete(id).await? {
            return Err(DomainError::not_found("Service", id));
        }
        info!(service_id = id, "Service deleted");
        Ok(())
    }
}

fn validate_price(price: Decimal) -> DomainResult<()> {
    if price < Decimal::ZERO {
        return Err(DomainError::Validation("Price cannot be negative".into()));
    }
    Ok(())
}

fn validate_duration(minutes: i32) -> DomainResult<()> {
    if minutes <= 0 {
        return Err(DomainError::Validation(
            "Duration must be a positive number of minutes".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::fixture;
    use crate::domain::catalog::DEFAULT_DURATION_MINUTES;

    fn oil_change(price: i64) -> NewService {
        NewService {
            name: " Oil Change ".into(),
            description: Some(String::new()),
            price: Decimal::from(price),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            category: Some("Maintenance".into()),
        }
    }

    #[tokio::test]
    async fn admin_creates_and_lists_service() {
        let f = fixture().await;
        let catalog = CatalogService::new(f.repos.clone());

        let created = catalog.create(&f.admin, oil_change(60)).await.unwrap();
        assert_eq!(created.name, "Oil Change");
        assert_eq!(created.description, None);
        assert_eq!(created.price, Decimal::from(60));

        let listed = catalog.list_active().await.unwrap();
        assert!(listed.iter().any(|s| s.id == created.id));
    }

    #[tokio::test]
    async fn regular_user_cannot_manage_catalog() {
        let f = fixture().await;
        let catalog = CatalogService::new(f.repos.clone());

        assert!(matches!(
            catalog.create(&f.alice, oil_change(60)).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            catalog.delete(&f.alice, 1).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn negative_price_and_zero_duration_are_rejected() {
        let f = fixture().await;
        let catalog = CatalogService::new(f.repos.clone());

        assert!(matches!(
            catalog.create(&f.admin, oil_change(-1)).await,
            Err(DomainError::Validation(_))
        ));

        let mut instant = oil_change(10);
        instant.duration_minutes = 0;
        assert!(matches!(
            catalog.create(&f.admin, instant).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn deactivated_service_leaves_active_list() {
        let f = fixture().await;
        let catalog = CatalogService::new(f.repos.clone());
        let created = catalog.create(&f.admin, oil_change(60)).await.unwrap();

        catalog
            .update(
                &f.admin,
                created.id,
                UpdateServiceDto {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!catalog
            .list_active()
            .await
            .unwrap()
            .iter()
            .any(|s| s.id == created.id));
        assert!(catalog
            .list_all(&f.admin)
            .await
            .unwrap()
            .iter()
            .any(|s| s.id == created.id));
    }

    #[tokio::test]
    async fn missing_service_is_not_found() {
        let f = fixture().await;
        let catalog = CatalogService::new(f.repos.clone());

        assert!(matches!(
            catalog.get(9999).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            catalog.delete(&f.admin, 9999).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
