//! Key/value shop settings
//!
//! Values are stored as text. Strings are kept verbatim unless the text
//! would itself parse as JSON, in which case they are stored quoted.
//! Anything else is written as JSON. Reading parses JSON and falls back to
//! the raw string.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Setting {
    pub fn decoded(&self) -> Value {
        self.value.as_deref().map(decode_value).unwrap_or(Value::Null)
    }
}

pub fn encode_value(value: &Value) -> String {
    match value {
        Value::String(s) if serde_json::from_str::<Value>(s).is_err() => s.clone(),
        other => other.to_string(),
    }
}

pub fn decode_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Typed view over the settings the shop itself understands. Keys not
/// listed here are stored without checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopSettings {
    pub shop_name: Option<String>,
    pub shop_phone: Option<String>,
    pub shop_email: Option<String>,
    pub working_hours: Option<String>,
    pub currency: Option<String>,
    pub tax_rate: Option<f64>,
    pub booking_enabled: Option<bool>,
}

const STRING_KEYS: [&str; 5] = ["shop_name", "shop_phone", "shop_email", "working_hours", "currency"];
const MAX_KEY_LEN: usize = 100;

impl ShopSettings {
    pub fn validate_entry(key: &str, value: &Value) -> DomainResult<()> {
        let key = key.trim();
        if key.is_empty() || key.len() > MAX_KEY_LEN {
            return Err(DomainError::Validation(format!(
                "Setting keys must be 1-{} characters",
                MAX_KEY_LEN
            )));
        }

        match key {
            k if STRING_KEYS.contains(&k) && !value.is_string() => Err(DomainError::Validation(
                format!("Setting '{}' must be a string", k),
            )),
            "tax_rate" => match value.as_f64() {
                Some(rate) if (0.0..=100.0).contains(&rate) => Ok(()),
                _ => Err(DomainError::Validation(
                    "Setting 'tax_rate' must be a number between 0 and 100".to_string(),
                )),
            },
            "booking_enabled" if !value.is_boolean() => Err(DomainError::Validation(
                "Setting 'booking_enabled' must be true or false".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Builds the typed view, skipping entries that fail validation.
    pub fn from_settings(settings: &[Setting]) -> Self {
        let mut shop = Self::default();
        for setting in settings {
            let value = setting.decoded();
            if Self::validate_entry(&setting.key, &value).is_err() {
                continue;
            }
            match setting.key.as_str() {
                "shop_name" => shop.shop_name = value.as_str().map(str::to_string),
                "shop_phone" => shop.shop_phone = value.as_str().map(str::to_string),
                "shop_email" => shop.shop_email = value.as_str().map(str::to_string),
                "working_hours" => shop.working_hours = value.as_str().map(str::to_string),
                "currency" => shop.currency = value.as_str().map(str::to_string),
                "tax_rate" => shop.tax_rate = value.as_f64(),
                "booking_enabled" => shop.booking_enabled = value.as_bool(),
                _ => {}
            }
        }
        shop
    }

    /// Online booking is open unless explicitly switched off.
    pub fn booking_open(&self) -> bool {
        self.booking_enabled.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setting(key: &str, raw: &str) -> Setting {
        Setting {
            key: key.into(),
            value: Some(raw.into()),
            description: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn strings_are_stored_verbatim() {
        assert_eq!(encode_value(&json!("Auto Servis")), "Auto Servis");
        assert_eq!(encode_value(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(encode_value(&json!(true)), "true");
    }

    #[test]
    fn json_looking_strings_stay_strings() {
        for text in ["385911234", "true", "null", "[1]", "\"quoted\"", "17.5"] {
            let value = json!(text);
            assert_eq!(decode_value(&encode_value(&value)), value, "{text}");
        }
        assert_eq!(encode_value(&json!("385911234")), "\"385911234\"");
    }

    #[test]
    fn numeric_phone_survives_typed_view() {
        let raw = encode_value(&json!("385911234"));
        let shop = ShopSettings::from_settings(&[setting("shop_phone", &raw)]);
        assert_eq!(shop.shop_phone.as_deref(), Some("385911234"));
    }

    #[test]
    fn decoding_falls_back_to_raw_text() {
        assert_eq!(decode_value(r#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(decode_value("Mon-Fri 8-16"), json!("Mon-Fri 8-16"));
        assert_eq!(decode_value("17.5"), json!(17.5));
    }

    #[test]
    fn known_keys_are_type_checked() {
        assert!(ShopSettings::validate_entry("shop_name", &json!("Garage")).is_ok());
        assert!(ShopSettings::validate_entry("shop_name", &json!(5)).is_err());
        assert!(ShopSettings::validate_entry("tax_rate", &json!(25)).is_ok());
        assert!(ShopSettings::validate_entry("tax_rate", &json!(150)).is_err());
        assert!(ShopSettings::validate_entry("booking_enabled", &json!("no")).is_err());
        assert!(ShopSettings::validate_entry("anything_else", &json!([1, 2])).is_ok());
        assert!(ShopSettings::validate_entry("  ", &json!("x")).is_err());
    }

    #[test]
    fn typed_view_reads_decoded_values() {
        let shop = ShopSettings::from_settings(&[
            setting("shop_name", "Garage Ivić"),
            setting("tax_rate", "17"),
            setting("booking_enabled", "false"),
            setting("currency", "42"),
        ]);
        assert_eq!(shop.shop_name.as_deref(), Some("Garage Ivić"));
        assert_eq!(shop.tax_rate, Some(17.0));
        assert!(!shop.booking_open());
        // "42" decodes to a number and is not a valid currency
        assert_eq!(shop.currency, None);
    }
}
