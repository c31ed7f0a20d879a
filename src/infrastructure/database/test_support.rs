//! Fixtures shared by repository and service tests

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use super::entities::{service, user, vehicle};
use super::migrator::Migrator;
use super::{init_database, seed, DatabaseConfig, DefaultAccounts};
use crate::infrastructure::crypto::{PasswordHasher, MIN_COST};

pub fn test_hasher() -> PasswordHasher {
    PasswordHasher::new(MIN_COST)
}

/// Fresh in-memory database with the schema but no rows.
pub async fn test_connection() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

/// Fresh in-memory database with the default accounts, vehicle types and catalog.
pub async fn seeded_connection() -> DatabaseConnection {
    let db = test_connection().await;
    seed::seed_defaults(&db, &DefaultAccounts::default(), &test_hasher())
        .await
        .expect("seed");
    db
}

pub async fn insert_user(db: &DatabaseConnection, username: &str) -> i32 {
    user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(format!("{}@example.com", username)),
        password_hash: Set("x".to_string()),
        full_name: Set(None),
        phone: Set(None),
        role: Set(user::UserRole::User),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        last_login_at: Set(None),
        reset_token: Set(None),
        reset_token_expires_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user")
    .id
}

pub async fn insert_vehicle(db: &DatabaseConnection, user_id: i32, plate: &str) -> i32 {
    let now = Utc::now();
    vehicle::ActiveModel {
        user_id: Set(user_id),
        make: Set("Toyota".to_string()),
        model: Set("Corolla".to_string()),
        year: Set(Some(2016)),
        vin: Set(None),
        license_plate: Set(Some(plate.to_string())),
        color: Set(None),
        engine_type: Set(None),
        mileage: Set(None),
        notes: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert vehicle")
    .id
}

pub async fn insert_service(db: &DatabaseConnection, name: &str, price_cents: i64) -> i32 {
    let now = Utc::now();
    service::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        price_cents: Set(price_cents),
        duration_minutes: Set(60),
        category: Set(None),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert service")
    .id
}
