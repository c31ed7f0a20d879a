//! Shop settings operations

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::application::identity::AuthenticatedUser;
use crate::domain::setting::encode_value;
use crate::domain::{DomainResult, RepositoryProvider, ShopSettings};

pub struct SettingsService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SettingsService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Every setting with its decoded value.
    pub async fn all(&self) -> DomainResult<BTreeMap<String, Value>> {
        let settings = self.repos.settings().list().await?;
        Ok(settings
            .into_iter()
            .map(|s| {
                let value = s.decoded();
                (s.key, value)
            })
            .collect())
    }

    pub async fn get(&self, key: &str) -> DomainResult<Option<Value>> {
        Ok(self.repos.settings().get(key).await?.map(|s| s.decoded()))
    }

    /// Upserts each entry. Every entry is validated before anything is
    /// written. Returns the full map afterwards.
    pub async fn update(
        &self,
        principal: &AuthenticatedUser,
        entries: BTreeMap<String, Value>,
    ) -> DomainResult<BTreeMap<String, Value>> {
        principal.ensure_admin()?;
        for (key, value) in &entries {
            ShopSettings::validate_entry(key, value)?;
        }

        for (key, value) in &entries {
            self.repos
                .settings()
                .set(key.trim(), &encode_value(value), None)
                .await?;
        }

        info!(count = entries.len(), user_id = principal.user_id, "Settings updated");
        self.all().await
    }

    pub async fn shop_settings(&self) -> DomainResult<ShopSettings> {
        let settings = self.repos.settings().list().await?;
        Ok(ShopSettings::from_settings(&settings))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::services::testing::fixture;
    use crate::domain::DomainError;

    fn entries(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn structured_values_round_trip() {
        let f = fixture().await;
        let settings = SettingsService::new(f.repos.clone());

        settings
            .update(&f.admin, entries(&[("x", json!({"a": 1}))]))
            .await
            .unwrap();
        assert_eq!(settings.get("x").await.unwrap(), Some(json!({"a": 1})));
    }

    #[tokio::test]
    async fn json_looking_strings_read_back_as_strings() {
        let f = fixture().await;
        let settings = SettingsService::new(f.repos.clone());

        let all = settings
            .update(
                &f.admin,
                entries(&[("shop_phone", json!("385911234")), ("x", json!("true"))]),
            )
            .await
            .unwrap();
        assert_eq!(all.get("shop_phone"), Some(&json!("385911234")));
        assert_eq!(all.get("x"), Some(&json!("true")));

        let shop = settings.shop_settings().await.unwrap();
        assert_eq!(shop.shop_phone.as_deref(), Some("385911234"));
    }

    #[tokio::test]
    async fn known_keys_are_validated_before_writing() {
        let f = fixture().await;
        let settings = SettingsService::new(f.repos.clone());

        let err = settings
            .update(
                &f.admin,
                entries(&[("shop_name", json!("Garage")), ("tax_rate", json!(250))]),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(settings.get("shop_name").await.unwrap(), None);
    }

    #[tokio::test]
    async fn typed_view_reflects_updates() {
        let f = fixture().await;
        let settings = SettingsService::new(f.repos.clone());
        assert!(settings.shop_settings().await.unwrap().booking_open());

        let all = settings
            .update(
                &f.admin,
                entries(&[
                    ("shop_name", json!("Garage Kovač")),
                    ("booking_enabled", json!(false)),
                ]),
            )
            .await
            .unwrap();
        assert_eq!(all.get("shop_name"), Some(&json!("Garage Kovač")));

        let shop = settings.shop_settings().await.unwrap();
        assert_eq!(shop.shop_name.as_deref(), Some("Garage Kovač"));
        assert!(!shop.booking_open());
    }

    #[tokio::test]
    async fn only_admins_update() {
        let f = fixture().await;
        let settings = SettingsService::new(f.repos.clone());
        assert!(matches!(
            settings
                .update(&f.alice, entries(&[("shop_name", json!("Mine"))]))
                .await,
            Err(DomainError::Forbidden(_))
        ));
    }
}
