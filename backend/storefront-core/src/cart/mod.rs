//! Shopping cart.
//!
//! A [`Cart`] is an immutable map from product id to line. [`CartEngine`]
//! holds the current snapshot and swaps in a new map on every mutation, so a
//! reader holding an `Arc<Cart>` never sees a half-applied change.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What the cart needs to know about a product when it is first added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: ProductId,
    pub display_name: String,
    pub thumbnail: Option<String>,
    pub price_id: String,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Always at least 1.
    pub quantity: u32,
    pub unit_price: Decimal,
    pub price_id: String,
    pub display_name: String,
    pub thumbnail: Option<String>,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: BTreeMap<ProductId, CartLine>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        !self.lines.values().any(|line| line.quantity > 0)
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.lines.get(product_id).map_or(0, |line| line.quantity)
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.get(product_id)
    }

    /// Lines in product id order.
    pub fn lines(&self) -> impl Iterator<Item = (&ProductId, &CartLine)> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Items in the cart, `None` when there are none.
    pub fn total_quantity(&self) -> Option<u32> {
        let total = self
            .lines
            .values()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity));
        (total > 0).then_some(total)
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines.values().map(CartLine::line_total).sum()
    }

    fn incremented(&self, item: &CartItem) -> Cart {
        let mut lines = self.lines.clone();
        lines
            .entry(item.product_id.clone())
            .and_modify(|line| line.quantity = line.quantity.saturating_add(1))
            .or_insert_with(|| CartLine {
                quantity: 1,
                unit_price: item.unit_price,
                price_id: item.price_id.clone(),
                display_name: item.display_name.clone(),
                thumbnail: item.thumbnail.clone(),
            });
        Cart { lines }
    }

    fn decremented(&self, product_id: &ProductId) -> Option<Cart> {
        let line = self.lines.get(product_id)?;

        let mut lines = self.lines.clone();
        if line.quantity > 1 {
            if let Some(line) = lines.get_mut(product_id) {
                line.quantity -= 1;
            }
        } else {
            lines.remove(product_id);
        }
        Some(Cart { lines })
    }
}

#[derive(Debug, Default)]
pub struct CartEngine {
    current: RwLock<Arc<Cart>>,
}

impl CartEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one of `item`. Display fields and price are cached on first add.
    pub fn increment(&self, item: &CartItem) -> u32 {
        let next = self.replace(|cart| Some(cart.incremented(item)));
        let quantity = next.quantity_of(&item.product_id);
        debug!("Cart: {} x{}", item.product_id, quantity);
        quantity
    }

    /// Remove one of `product_id`; the line goes away at zero.
    pub fn decrement(&self, product_id: &ProductId) -> u32 {
        let next = self.replace(|cart| cart.decremented(product_id));
        let quantity = next.quantity_of(product_id);
        debug!("Cart: {} x{}", product_id, quantity);
        quantity
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.snapshot().quantity_of(product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn total_quantity(&self) -> Option<u32> {
        self.snapshot().total_quantity()
    }

    pub fn subtotal(&self) -> Decimal {
        self.snapshot().subtotal()
    }

    pub fn snapshot(&self) -> Arc<Cart> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn clear(&self) {
        self.replace(|cart| (!cart.lines.is_empty()).then(Cart::default));
    }

    /// Swap in the cart `change` returns; `None` keeps the current one.
    fn replace(&self, change: impl FnOnce(&Cart) -> Option<Cart>) -> Arc<Cart> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = change(&current) {
            *current = Arc::new(next);
        }
        Arc::clone(&current)
    }
}
