//! SeaORM implementation of SettingRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::db_err;
use crate::domain::setting::{Setting, SettingRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::setting;

pub struct SeaOrmSettingRepository {
    db: DatabaseConnection,
}

impl SeaOrmSettingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: setting::Model) -> Setting {
    Setting {
        key: m.key,
        value: m.value,
        description: m.description,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl SettingRepository for SeaOrmSettingRepository {
    async fn get(&self, key: &str) -> DomainResult<Option<Setting>> {
        let model = setting::Entity::find()
            .filter(setting::Column::Key.eq(key))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn set(&self, key: &str, value: &str, description: Option<String>) -> DomainResult<Setting> {
        let keep_description = description.is_none();
        let row = setting::ActiveModel {
            key: Set(key.to_string()),
            value: Set(Some(value.to_string())),
            description: Set(description),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        let mut on_conflict = OnConflict::column(setting::Column::Key);
        if keep_description {
            on_conflict.update_columns([setting::Column::Value, setting::Column::UpdatedAt]);
        } else {
            on_conflict.update_columns([
                setting::Column::Value,
                setting::Column::Description,
                setting::Column::UpdatedAt,
            ]);
        }

        setting::Entity::insert(row)
            .on_conflict(on_conflict)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        self.get(key)
            .await?
            .ok_or_else(|| DomainError::Unavailable(format!("Setting '{}' vanished after upsert", key)))
    }

    async fn list(&self) -> DomainResult<Vec<Setting>> {
        let models = setting::Entity::find()
            .order_by_asc(setting::Column::Key)
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

    #[tokio::test]
    async fn set_is_an_upsert() {
        let repo = SeaOrmSettingRepository::new(test_connection().await);

        repo.set("shop_name", "Garage", Some("Shown on invoices".into()))
            .await
            .unwrap();
        let updated = repo.set("shop_name", "Garage Ivić", None).await.unwrap();

        assert_eq!(updated.value.as_deref(), Some("Garage Ivić"));
        assert_eq!(updated.description.as_deref(), Some("Shown on invoices"));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let repo = SeaOrmSettingRepository::new(test_connection().await);
        assert!(repo.get("nope").await.unwrap().is_none());
    }
}
