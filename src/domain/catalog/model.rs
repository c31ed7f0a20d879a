//! Service catalog entity
//!
//! Prices are persisted as integer cents and handled as `Decimal` everywhere
//! else.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_DURATION_MINUTES: i32 = 60;

/// A catalog offering (oil change, diagnostics, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateServiceDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

/// Converts a price to whole cents, rounding half away from zero.
/// Returns `None` when the value does not fit in an `i64`.
pub fn price_to_cents(price: Decimal) -> Option<i64> {
    price
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

pub fn cents_to_price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
