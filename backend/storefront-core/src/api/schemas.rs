//! Wire shapes for every backend endpoint.
//!
//! Responses are decoded into these structs and nothing else; a body that
//! does not fit is reported as [`ApiError::Schema`](crate::error::ApiError::Schema).
//! Unknown fields are ignored so backend additions do not break the client.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `POST /oauth2/token`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// `POST /oauth2/validate_auth_cookie`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
}

/// `POST /stripe/create-checkout-session?return_type=json`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionResponse {
    pub url: String,
}

/// One entry of the checkout request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

/// `GET /stripe/products`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Id of the price object this product sells at.
    #[serde(default)]
    pub default_price: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// `GET /stripe/prices`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Price {
    pub id: String,
    pub product: String,
    pub currency: String,
    /// Amount in minor units (cents).
    #[serde(default)]
    pub unit_amount: Option<i64>,
}

/// `GET /stripe/product-popularity`, already ranked most popular first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RankedProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub quantity: u64,
}

/// `GET /stripe/current-user-past-purchases`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PastPurchase {
    pub quantity: u32,
    /// Unix seconds.
    pub created: i64,
    pub currency: String,
    pub product: String,
    /// Minor units.
    pub unit_amount: i64,
    pub details: PurchaseDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PurchaseDetails {
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl PastPurchase {
    pub fn unit_price(&self) -> Decimal {
        Decimal::new(self.unit_amount, 2)
    }

    /// Unit price times quantity.
    pub fn spend(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}
