use crate::error::StorefrontAppError;

use storefront_core::Storefront;
use storefront_core::checkout::CheckoutOutcome;
use storefront_core::error::CoreError;

use clap::Args;
use log::debug;

/// Largest quantity of one product accepted on the command line.
pub(crate) const MAX_ITEM_QUANTITY: u32 = 999;

#[derive(Debug, Args)]
pub struct CheckoutCommand {
    /// Products to buy, as `PRODUCT_ID` or `PRODUCT_ID=QUANTITY` (at most 999 each).
    #[arg(value_parser = parse_item)]
    items: Vec<(String, u32)>,
}

impl CheckoutCommand {
    pub async fn execute(self, storefront: &Storefront) -> Result<(), StorefrontAppError> {
        storefront.mount().await;

        if !self.items.is_empty() {
            let catalog = storefront
                .catalog()
                .load_catalog()
                .await
                .map_err(CoreError::from)?;

            for (product_id, quantity) in &self.items {
                let item = catalog
                    .iter()
                    .find(|entry| &entry.product.id == product_id)
                    .ok_or_else(|| StorefrontAppError::product(format!("Unknown product '{product_id}'")))?
                    .cart_item()
                    .ok_or_else(|| {
                        StorefrontAppError::product(format!("Product '{product_id}' has no price"))
                    })?;

                for _ in 0..*quantity {
                    storefront.cart().increment(&item);
                }
                debug!("Added {product_id} x{quantity}");
            }
        }

        match storefront.checkout().await? {
            CheckoutOutcome::EmptyCart => println!("Cart is empty, nothing to check out"),
            CheckoutOutcome::Redirected { .. } => {
                println!("Subtotal: {}", storefront.cart().subtotal())
            }
        }
        Ok(())
    }
}

/// `id` or `id=quantity`, quantity between 1 and [`MAX_ITEM_QUANTITY`].
pub(crate) fn parse_item(value: &str) -> Result<(String, u32), String> {
    let (id, quantity) = match value.split_once('=') {
        Some((id, quantity)) => {
            let quantity: u32 = quantity
                .trim()
                .parse()
                .map_err(|e| format!("invalid quantity '{quantity}': {e}"))?;
            (id.trim(), quantity)
        }
        None => (value.trim(), 1),
    };

    if id.is_empty() {
        return Err("product id cannot be empty".to_string());
    }
    if quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }
    if quantity > MAX_ITEM_QUANTITY {
        return Err(format!("quantity must be at most {MAX_ITEM_QUANTITY}"));
    }
    Ok((id.to_string(), quantity))
}
