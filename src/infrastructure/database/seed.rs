//! Default data written on first start
//!
//! Each group is only inserted when its table is empty, and everything runs
//! inside one transaction.

use chrono::Utc;
use sea_orm::{
    ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set,
    TransactionTrait,
};
use tracing::info;

use super::entities::{service, user, vehicle_type};
use crate::infrastructure::crypto::PasswordHasher;

/// Login seeded for one of the two default accounts.
#[derive(Debug, Clone)]
pub struct SeedAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone)]
pub struct DefaultAccounts {
    pub admin: SeedAccount,
    pub user: SeedAccount,
}

impl Default for DefaultAccounts {
    fn default() -> Self {
        Self {
            admin: SeedAccount {
                username: "admin".into(),
                email: "admin@autoservis.com".into(),
                password: "admin123".into(),
                full_name: "Administrator".into(),
            },
            user: SeedAccount {
                username: "user".into(),
                email: "user@autoservis.com".into(),
                password: "user123".into(),
                full_name: "Test User".into(),
            },
        }
    }
}

/// (name, description, icon)
const SYSTEM_VEHICLE_TYPES: [(&str, &str, &str); 12] = [
    ("Passenger car", "Standard car with 4-5 seats", "🚗"),
    ("SUV / Off-road", "Sport utility and off-road vehicles with raised ground clearance", "🚙"),
    ("Van / Estate", "Vehicles with an extended cargo area", "🚐"),
    ("Pick-up", "Light trucks with an open cargo bed", "🛻"),
    ("Truck", "Heavy goods vehicles", "🚚"),
    ("Motorcycle", "Two-wheelers: motorcycles, scooters, quads", "🏍️"),
    ("Trailer", "Towed vehicles without their own drive", "🚜"),
    ("Delivery van", "Commercial vehicles used for deliveries", "🚐"),
    ("Sports car", "High-performance cars", "🏎️"),
    ("Luxury car", "Premium vehicles in the upper price range", "💎"),
    ("Hybrid / Electric", "Hybrid and fully electric vehicles", "⚡"),
    ("Oldtimer / Classic", "Historic vehicles older than 30 years", "🕰️"),
];

/// (name, description, price in cents, duration in minutes, category)
const DEFAULT_SERVICES: [(&str, &str, i64, i32, &str); 30] = [
    ("Regular service - Small", "Engine oil and oil filter change, fluid level check, visual inspection of brakes and lights, service indicator reset.", 8000, 60, "Maintenance"),
    ("Regular service - Large", "Oil, oil filter, air filter and cabin filter change, brake and suspension check, electronics diagnostics, service interval reset.", 15000, 120, "Maintenance"),
    ("Oil and filter change", "Drain old oil, replace the oil filter and refill with synthetic oil to the manufacturer's specification.", 6000, 40, "Maintenance"),
    ("Engine diagnostics", "Computer diagnostics of all vehicle systems, fault memory readout and a detailed condition report.", 5000, 60, "Diagnostics"),
    ("Brake pads - front", "Replace front brake pads, clean and grease the calipers, check disc thickness, test drive.", 12000, 90, "Brakes"),
    ("Brake pads - rear", "Replace rear pads or shoes, adjust the handbrake, check the hydraulic system.", 10000, 100, "Brakes"),
    ("Brake disc replacement", "Fit new brake discs and pads on one axle, centre and test under braking.", 25000, 150, "Brakes"),
    ("A/C recharge", "Evacuate the A/C system, recharge with refrigerant and UV dye, check compressor and condenser.", 7000, 75, "Air conditioning"),
    ("A/C full service", "Refrigerant replacement, drier filter change, leak check, ozone disinfection and cabin filter change.", 15000, 140, "Air conditioning"),
    ("Shock absorber set", "Replace all four shock absorbers with mounts, followed by wheel alignment.", 40000, 240, "Suspension"),
    ("3D wheel alignment", "Camber, caster and toe adjustment on a 3D alignment rig with a before/after report.", 5000, 75, "Suspension"),
    ("Wheel balancing - set", "Balance all four wheels and check rim runout.", 3000, 45, "Tyres"),
    ("Seasonal tyre change", "Swap summer/winter tyres, balance all four wheels, check pressure and valves.", 4000, 60, "Tyres"),
    ("Puncture repair", "Locate the damage, repair from the inside with a vulcanising patch, balance and refit.", 2500, 45, "Tyres"),
    ("Bulb replacement", "Replace a headlight or tail light bulb and adjust the beam.", 3000, 40, "Electrical"),
    ("Battery charge / replacement", "Test battery voltage and capacity, charge or replace, check the alternator.", 15000, 60, "Electrical"),
    ("Timing belt replacement", "Replace the timing belt kit with idler and tensioner and verify timing.", 35000, 360, "Engine"),
    ("Spark plug replacement", "Replace spark plugs at the specified torque and test engine running.", 8000, 75, "Engine"),
    ("Exhaust system repair", "Replace corroded or damaged exhaust parts: catalytic converter, middle or rear silencer.", 20000, 180, "Exhaust"),
    ("Ozone disinfection", "Treat the interior and ventilation system with an ozone generator to remove bacteria and odours.", 4000, 60, "Air conditioning"),
    ("Headlight polishing", "Three-stage sanding and polishing of cloudy headlights with a UV protective coat.", 7000, 90, "Polishing"),
    ("Interior detailing", "Deep vacuuming, plastics cleaning and protection, upholstery extraction cleaning.", 10000, 180, "Detailing"),
    ("Full detailing", "Interior deep clean, exterior foam wash, two-stage paint polish, wax and tyre shine.", 25000, 360, "Detailing"),
    ("Fuel filter replacement", "Replace the diesel or petrol fuel filter and check fuel pressure.", 6000, 60, "Fuel system"),
    ("DPF cleaning", "Remove and machine-clean the diesel particulate filter, refit and reset the counter.", 20000, 240, "Fuel system"),
    ("Steering rack replacement", "Replace the hydraulic or electric steering rack, centre and align.", 45000, 300, "Steering"),
    ("EGR valve replacement", "Replace the EGR valve, clean the intake passages and reset adaptation.", 18000, 120, "Engine"),
    ("Turbocharger replacement", "Fit a new or remanufactured turbocharger with oil and filter change.", 80000, 420, "Engine"),
    ("Clutch kit replacement", "Remove the gearbox and replace clutch disc, pressure plate and release bearing.", 50000, 480, "Transmission"),
    ("Automatic gearbox service", "Drain ATF, clean the pan and filter, refill and reset adaptation.", 20000, 180, "Transmission"),
];

/// Insert the default users, vehicle types and service catalog where missing.
pub async fn seed_defaults(
    db: &DatabaseConnection,
    accounts: &DefaultAccounts,
    hasher: &PasswordHasher,
) -> Result<(), DbErr> {
    let hash = |password: &str| {
        hasher
            .hash(password)
            .map_err(|e| DbErr::Custom(format!("Failed to hash seed password: {}", e)))
    };

    let txn = db.begin().await?;
    let now = Utc::now();

    if user::Entity::find().count(&txn).await? == 0 {
        let seed_user = |account: &SeedAccount, role: user::UserRole| -> Result<user::ActiveModel, DbErr> {
            Ok(user::ActiveModel {
                id: NotSet,
                username: Set(account.username.clone()),
                email: Set(account.email.clone()),
                password_hash: Set(hash(&account.password)?),
                full_name: Set(Some(account.full_name.clone())),
                phone: Set(None),
                role: Set(role),
                is_active: Set(true),
                created_at: Set(now),
                last_login_at: Set(None),
                reset_token: Set(None),
                reset_token_expires_at: Set(None),
            })
        };

        user::Entity::insert_many([
            seed_user(&accounts.admin, user::UserRole::Admin)?,
            seed_user(&accounts.user, user::UserRole::User)?,
        ])
        .exec(&txn)
        .await?;
        info!(
            admin = %accounts.admin.username,
            user = %accounts.user.username,
            "👤 Seeded default accounts"
        );
    }

    if vehicle_type::Entity::find().count(&txn).await? == 0 {
        let rows = SYSTEM_VEHICLE_TYPES.iter().map(|(name, description, icon)| {
            vehicle_type::ActiveModel {
                id: NotSet,
                name: Set(name.to_string()),
                description: Set(Some(description.to_string())),
                icon: Set(icon.to_string()),
                is_system: Set(true),
                created_by: Set(None),
                created_at: Set(now),
            }
        });
        vehicle_type::Entity::insert_many(rows).exec(&txn).await?;
        info!(count = SYSTEM_VEHICLE_TYPES.len(), "🚗 Seeded system vehicle types");
    }

    if service::Entity::find().count(&txn).await? == 0 {
        let rows = DEFAULT_SERVICES.iter().map(
            |(name, description, price_cents, duration_minutes, category)| service::ActiveModel {
                id: NotSet,
                name: Set(name.to_string()),
                description: Set(Some(description.to_string())),
                price_cents: Set(*price_cents),
                duration_minutes: Set(*duration_minutes),
                category: Set(Some(category.to_string())),
                is_active: Set(true),
                created_at: Set(now),
                updated_at: Set(now),
            },
        );
        service::Entity::insert_many(rows).exec(&txn).await?;
        info!(count = DEFAULT_SERVICES.len(), "🔧 Seeded service catalog");
    }

    txn.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::{test_connection, test_hasher};

    #[tokio::test]
    async fn seeding_twice_does_not_duplicate() {
        let db = test_connection().await;
        let hasher = test_hasher();
        let accounts = DefaultAccounts::default();

        seed_defaults(&db, &accounts, &hasher).await.unwrap();
        seed_defaults(&db, &accounts, &hasher).await.unwrap();

        assert_eq!(user::Entity::find().count(&db).await.unwrap(), 2);
        assert_eq!(vehicle_type::Entity::find().count(&db).await.unwrap(), 12);
        assert_eq!(
            service::Entity::find().count(&db).await.unwrap(),
            DEFAULT_SERVICES.len() as u64
        );
    }

    #[tokio::test]
    async fn seeded_admin_password_is_hashed() {
        let db = test_connection().await;
        let hasher = test_hasher();
        seed_defaults(&db, &DefaultAccounts::default(), &hasher)
            .await
            .unwrap();

        let admin = user::Entity::find_by_id(1).one(&db).await.unwrap().unwrap();
        assert_eq!(admin.role, user::UserRole::Admin);
        assert!(hasher.verify("admin123", &admin.password_hash));
    }
}
