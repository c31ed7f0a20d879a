//! SeaORM implementation of ServiceRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::{contains_pattern, db_err, write_err, SERVICE_SEARCH_LIMIT};
use crate::domain::catalog::{
    cents_to_price, price_to_cents, NewService, Service, ServiceRepository, UpdateServiceDto,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::service;

pub struct SeaOrmServiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: service::Model) -> Service {
    Service {
        id: m.id,
        name: m.name,
        description: m.description,
        price: cents_to_price(m.price_cents),
        duration_minutes: m.duration_minutes,
        category: m.category,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn cents(price: rust_decimal::Decimal) -> DomainResult<i64> {
    price_to_cents(price)
        .ok_or_else(|| DomainError::Validation(format!("Price {} is out of range", price)))
}

// ── ServiceRepository impl ──────────────────────────────────────

#[async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn create(&self, dto: NewService) -> DomainResult<Service> {
        let now = Utc::now();
        let active = service::ActiveModel {
            name: Set(dto.name),
            description: Set(dto.description),
            price_cents: Set(cents(dto.price)?),
            duration_minutes: Set(dto.duration_minutes),
            category: Set(dto.category),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Service>> {
        let model = service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn list(&self, active_only: bool) -> DomainResult<Vec<Service>> {
        let mut query = service::Entity::find();
        if active_only {
            query = query.filter(service::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(service::Column::Category)
            .order_by_asc(service::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, id: i32, dto: UpdateServiceDto) -> DomainResult<Option<Service>> {
        let Some(existing) = service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: service::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(description) = dto.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = dto.price {
            active.price_cents = Set(cents(price)?);
        }
        if let Some(duration) = dto.duration_minutes {
            active.duration_minutes = Set(duration);
        }
        if let Some(category) = dto.category {
            active.category = Set(Some(category));
        }
        if let Some(is_active) = dto.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = service::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_err(e, "Service is still referenced by appointments"))?;

        Ok(result.rows_affected > 0)
    }

    async fn search(&self, query: &str) -> DomainResult<Vec<Service>> {
        let pattern = contains_pattern(query.trim());
        let models = service::Entity::find()
            .filter(
                Condition::any()
                    .add(service::Column::Name.like(pattern.clone()))
                    .add(service::Column::Category.like(pattern.clone()))
                    .add(service::Column::Description.like(pattern.clone())),
            )
            .order_by_asc(service::Column::Name)
            .limit(SERVICE_SEARCH_LIMIT)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::test_connection;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn oil_change(price: &str) -> NewService {
        NewService {
            name: "Oil Change".into(),
            description: Some("Synthetic oil and filter".into()),
            price: Decimal::from_str(price).unwrap(),
            duration_minutes: 40,
            category: Some("Maintenance".into()),
        }
    }

    #[tokio::test]
    async fn price_survives_cents_storage() {
        let repo = SeaOrmServiceRepository::new(test_connection().await);
        let created = repo.create(oil_change("59.90")).await.unwrap();

        let loaded = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(loaded.price, Decimal::from_str("59.90").unwrap());
        assert!(loaded.is_active);
    }

    #[tokio::test]
    async fn inactive_services_hidden_from_active_list() {
        let repo = SeaOrmServiceRepository::new(test_connection().await);
        let a = repo.create(oil_change("60")).await.unwrap();
        repo.create(oil_change("80")).await.unwrap();

        repo.update(
            a.id,
            UpdateServiceDto {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(repo.list(true).await.unwrap().len(), 1);
        assert_eq!(repo.list(false).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_looks_at_category_and_description() {
        let repo = SeaOrmServiceRepository::new(test_connection().await);
        repo.create(oil_change("60")).await.unwrap();

        assert_eq!(repo.search("maint").await.unwrap().len(), 1);
        assert_eq!(repo.search("SYNTHETIC").await.unwrap().len(), 1);
        assert!(repo.search("brake").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_matches_wildcards_literally() {
        let repo = SeaOrmServiceRepository::new(test_connection().await);
        repo.create(oil_change("60")).await.unwrap();
        repo.create(NewService {
            name: "100% Check_Up".into(),
            description: None,
            price: Decimal::from(30),
            duration_minutes: 20,
            category: None,
        })
        .await
        .unwrap();

        for q in ["%", "_", "0%", "k_U"] {
            let found = repo.search(q).await.unwrap();
            assert_eq!(found.len(), 1, "{q}");
            assert_eq!(found[0].name, "100% Check_Up");
        }
        assert!(repo.search("\\").await.unwrap().is_empty());
    }
}
