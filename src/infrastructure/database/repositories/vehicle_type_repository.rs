//! SeaORM implementation of VehicleTypeRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use super::{db_err, write_err};
use crate::domain::vehicle_type::{
    NewVehicleType, VehicleType, VehicleTypeRepository, DEFAULT_ICON,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{user, vehicle_type};

pub struct SeaOrmVehicleTypeRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_with_creator(
        &self,
        id: Option<i32>,
    ) -> DomainResult<Vec<(vehicle_type::Model, Option<user::Model>)>> {
        let mut query = vehicle_type::Entity::find()
            .join(JoinType::LeftJoin, vehicle_type::Relation::Creator.def())
            .select_also(user::Entity);

        if let Some(id) = id {
            query = query.filter(vehicle_type::Column::Id.eq(id));
        }

        query
            .order_by_desc(vehicle_type::Column::IsSystem)
            .order_by_asc(vehicle_type::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: vehicle_type::Model, creator: Option<user::Model>) -> VehicleType {
    VehicleType {
        id: m.id,
        name: m.name,
        description: m.description,
        icon: m.icon,
        is_system: m.is_system,
        created_by: m.created_by,
        creator_name: creator.map(|u| u.username),
        created_at: m.created_at,
    }
}

// ── VehicleTypeRepository impl ──────────────────────────────────

#[async_trait]
impl VehicleTypeRepository for SeaOrmVehicleTypeRepository {
    async fn list(&self) -> DomainResult<Vec<VehicleType>> {
        Ok(self
            .find_with_creator(None)
            .await?
            .into_iter()
            .map(|(m, creator)| model_to_domain(m, creator))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<VehicleType>> {
        Ok(self
            .find_with_creator(Some(id))
            .await?
            .into_iter()
            .next()
            .map(|(m, creator)| model_to_domain(m, creator)))
    }

    async fn create(&self, dto: NewVehicleType) -> DomainResult<VehicleType> {
        let active = vehicle_type::ActiveModel {
            name: Set(dto.name),
            description: Set(dto.description),
            icon: Set(dto.icon.unwrap_or_else(|| DEFAULT_ICON.to_string())),
            is_system: Set(false),
            created_by: Set(dto.created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, "A vehicle type with this name already exists"))?;

        let created = self.find_by_id(model.id).await?;
        Ok(created.unwrap_or_else(|| model_to_domain(model, None)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = vehicle_type::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::infrastructure::database::test_support::{
        insert_user, seeded_connection, test_connection,
    };

    fn custom(name: &str, created_by: Option<i32>) -> NewVehicleType {
        NewVehicleType {
            name: name.into(),
            description: None,
            icon: None,
            created_by,
        }
    }

    #[tokio::test]
    async fn create_records_creator_and_default_icon() {
        let db = test_connection().await;
        let creator = insert_user(&db, "ana").await;
        let repo = SeaOrmVehicleTypeRepository::new(db);

        let vt = repo.create(custom("Tractor", Some(creator))).await.unwrap();
        assert!(!vt.is_system);
        assert_eq!(vt.icon, DEFAULT_ICON);
        assert_eq!(vt.created_by, Some(creator));
        assert_eq!(vt.creator_name.as_deref(), Some("ana"));
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() {
        let repo = SeaOrmVehicleTypeRepository::new(test_connection().await);
        repo.create(custom("Tractor", None)).await.unwrap();
        let dup = repo.create(custom("Tractor", None)).await;
        assert!(matches!(dup, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn list_puts_system_types_first() {
        let db = seeded_connection().await;
        let repo = SeaOrmVehicleTypeRepository::new(db);
        repo.create(custom("AAA custom", None)).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 13);
        assert!(all[0].is_system);
        assert_eq!(all.last().map(|vt| vt.name.as_str()), Some("AAA custom"));
    }
}
