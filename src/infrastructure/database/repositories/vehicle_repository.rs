//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use super::{contains_pattern, db_err, write_err, VEHICLE_SEARCH_LIMIT};
use crate::domain::vehicle::{
    NewVehicle, UpdateVehicleDto, Vehicle, VehicleRepository, VehicleWithOwner,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{user, vehicle};

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: vehicle::Model) -> Vehicle {
    Vehicle {
        id: m.id,
        user_id: m.user_id,
        make: m.make,
        model: m.model,
        year: m.year,
        vin: m.vin,
        license_plate: m.license_plate,
        color: m.color,
        engine_type: m.engine_type,
        mileage: m.mileage,
        notes: m.notes,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

const DUPLICATE_VIN: &str = "A vehicle with this VIN already exists";

// ── VehicleRepository impl ──────────────────────────────────────

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn create(&self, v: NewVehicle) -> DomainResult<Vehicle> {
        let now = Utc::now();
        let active = vehicle::ActiveModel {
            user_id: Set(v.user_id),
            make: Set(v.make),
            model: Set(v.model),
            year: Set(v.year),
            vin: Set(v.vin),
            license_plate: Set(v.license_plate),
            color: Set(v.color),
            engine_type: Set(v.engine_type),
            mileage: Set(v.mileage),
            notes: Set(v.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, DUPLICATE_VIN))?;

        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn list_by_owner(&self, user_id: i32) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .filter(vehicle::Column::UserId.eq(user_id))
            .order_by_desc(vehicle::Column::CreatedAt)
            .order_by_desc(vehicle::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, id: i32, dto: UpdateVehicleDto) -> DomainResult<Option<Vehicle>> {
        let Some(existing) = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: vehicle::ActiveModel = existing.into();

        if let Some(make) = dto.make {
            active.make = Set(make);
        }
        if let Some(model) = dto.model {
            active.model = Set(model);
        }
        if let Some(year) = dto.year {
            active.year = Set(Some(year));
        }
        if let Some(vin) = dto.vin {
            active.vin = Set(Some(vin));
        }
        if let Some(plate) = dto.license_plate {
            active.license_plate = Set(Some(plate));
        }
        if let Some(color) = dto.color {
            active.color = Set(Some(color));
        }
        if let Some(engine_type) = dto.engine_type {
            active.engine_type = Set(Some(engine_type));
        }
        if let Some(mileage) = dto.mileage {
            active.mileage = Set(Some(mileage));
        }
        if let Some(notes) = dto.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| write_err(e, DUPLICATE_VIN))?;

        Ok(Some(model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = vehicle::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn search(&self, query: &str) -> DomainResult<Vec<VehicleWithOwner>> {
        let pattern = contains_pattern(query.trim());
        let rows = vehicle::Entity::find()
            .join(JoinType::InnerJoin, vehicle::Relation::Owner.def())
            .select_also(user::Entity)
            .filter(
                Condition::any()
                    .add(vehicle::Column::LicensePlate.like(pattern.clone()))
                    .add(vehicle::Column::Make.like(pattern.clone()))
                    .add(vehicle::Column::Model.like(pattern.clone()))
                    .add(vehicle::Column::Vin.like(pattern.clone())),
            )
            .order_by_asc(vehicle::Column::LicensePlate)
            .limit(VEHICLE_SEARCH_LIMIT)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(v, owner)| {
                let (owner_username, owner_full_name) = owner
                    .map(|u| (u.username, u.full_name))
                    .unwrap_or_default();
                VehicleWithOwner {
                    vehicle: model_to_domain(v),
                    owner_username,
                    owner_full_name,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::infrastructure::database::test_support::{insert_user, test_connection};

    fn corolla(user_id: i32, vin: Option<&str>) -> NewVehicle {
        NewVehicle {
            user_id,
            make: "Toyota".into(),
            model: "Corolla".into(),
            year: Some(2016),
            vin: vin.map(str::to_string),
            license_plate: Some("ZG-1234-AB".into()),
            color: None,
            engine_type: Some("diesel".into()),
            mileage: Some(120_000),
            notes: None,
        }
    }

    #[tokio::test]
    async fn vin_is_unique_but_optional() {
        let db = test_connection().await;
        let owner = insert_user(&db, "ana").await;
        let repo = SeaOrmVehicleRepository::new(db);

        repo.create(corolla(owner, None)).await.unwrap();
        repo.create(corolla(owner, None)).await.unwrap();
        repo.create(corolla(owner, Some("JTDBR32E720123456"))).await.unwrap();

        let dup = repo.create(corolla(owner, Some("JTDBR32E720123456"))).await;
        assert!(matches!(dup, Err(DomainError::Conflict(_))));
        assert_eq!(repo.list_by_owner(owner).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let db = test_connection().await;
        let owner = insert_user(&db, "ana").await;
        let repo = SeaOrmVehicleRepository::new(db);
        let created = repo.create(corolla(owner, None)).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateVehicleDto {
                    mileage: Some(130_500),
                    color: Some("red".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.mileage, Some(130_500));
        assert_eq!(updated.color.as_deref(), Some("red"));
        assert_eq!(updated.make, "Toyota");
        assert_eq!(updated.engine_type.as_deref(), Some("diesel"));
    }

    #[tokio::test]
    async fn search_returns_owner_name() {
        let db = test_connection().await;
        let owner = insert_user(&db, "ana").await;
        let repo = SeaOrmVehicleRepository::new(db);
        repo.create(corolla(owner, None)).await.unwrap();

        let hits = repo.search("zg-12").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].owner_username, "ana");
        assert!(repo.search("Volvo").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let db = test_connection().await;
        let owner = insert_user(&db, "ana").await;
        let repo = SeaOrmVehicleRepository::new(db);
        let created = repo.create(corolla(owner, None)).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }
}
