//! Product listings shown on the storefront pages.

use crate::api::StorefrontClient;
use crate::api::schemas::{PastPurchase, Price, Product, RankedProduct};
use crate::cart::{CartItem, ProductId};
use crate::error::ApiError;
use crate::session::SessionState;

use std::collections::HashMap;

use log::{debug, info, warn};
use rust_decimal::Decimal;

/// A product joined with the price it sells at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub product: Product,
    /// Price object id, when the product's default price was found.
    pub price_id: Option<String>,
    pub unit_price: Option<Decimal>,
}

impl CatalogEntry {
    pub fn product_id(&self) -> ProductId {
        ProductId::new(self.product.id.clone())
    }

    /// `None` when the product has no usable price and cannot be bought.
    pub fn cart_item(&self) -> Option<CartItem> {
        Some(CartItem {
            product_id: self.product_id(),
            display_name: self.product.name.clone(),
            thumbnail: self.product.images.first().cloned(),
            price_id: self.price_id.clone()?,
            unit_price: self.unit_price?,
        })
    }
}

/// Convert minor units (cents) to a two-decimal amount.
pub fn from_minor_units(amount: i64) -> Decimal {
    Decimal::new(amount, 2)
}

/// Join products to prices through `default_price`. Inactive products are dropped.
pub fn join_prices(products: Vec<Product>, prices: &[Price]) -> Vec<CatalogEntry> {
    let by_id: HashMap<&str, &Price> = prices.iter().map(|price| (price.id.as_str(), price)).collect();

    products
        .into_iter()
        .filter(|product| product.active)
        .map(|product| {
            let price = product
                .default_price
                .as_deref()
                .and_then(|id| by_id.get(id).copied());

            if price.is_none() {
                debug!("Product {} has no resolvable price", product.id);
            }

            CatalogEntry {
                price_id: price.map(|price| price.id.clone()),
                unit_price: price.and_then(|price| price.unit_amount).map(from_minor_units),
                product,
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct CatalogService {
    client: StorefrontClient,
}

impl CatalogService {
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    pub async fn load_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        let products = self.client.list_products().await?;
        let prices = self.client.list_prices().await?;
        let entries = join_prices(products, &prices);
        info!("Catalog loaded: {} product(s)", entries.len());
        Ok(entries)
    }

    /// Most popular first, as ranked by the backend.
    pub async fn popular(&self) -> Result<Vec<RankedProduct>, ApiError> {
        self.client.product_popularity().await
    }

    /// Purchases of the logged-in user.
    ///
    /// Empty without a network call unless `session` is authorized; empty on
    /// any failure.
    pub async fn past_purchases(&self, session: SessionState) -> Vec<PastPurchase> {
        if !session.is_authorized() {
            debug!("Past purchases skipped: session is {session}");
            return Vec::new();
        }

        match self.client.past_purchases().await {
            Ok(purchases) => purchases,
            Err(e) => {
                warn!("Failed to load past purchases ({}): {e}", e.error_category());
                Vec::new()
            }
        }
    }
}
