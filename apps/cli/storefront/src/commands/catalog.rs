use crate::error::StorefrontAppError;

use storefront_core::Storefront;
use storefront_core::error::CoreError;

use clap::Args;
use humantime::format_rfc3339_seconds;
use std::time::{Duration, UNIX_EPOCH};

#[derive(Debug, Args)]
pub struct CatalogCommand {}

impl CatalogCommand {
    pub async fn execute(self, storefront: &Storefront) -> Result<(), StorefrontAppError> {
        let entries = storefront
            .catalog()
            .load_catalog()
            .await
            .map_err(CoreError::from)?;

        for entry in entries {
            let price = entry
                .unit_price
                .map_or_else(|| "n/a".to_string(), |price| price.to_string());
            println!("{:<24} {:>10}  {}", entry.product.id, price, entry.product.name);
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct PopularCommand {
    /// Show only the top N products.
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

impl PopularCommand {
    pub async fn execute(self, storefront: &Storefront) -> Result<(), StorefrontAppError> {
        let ranked = storefront
            .catalog()
            .popular()
            .await
            .map_err(CoreError::from)?;

        for (rank, product) in ranked
            .iter()
            .take(self.limit.unwrap_or(usize::MAX))
            .enumerate()
        {
            println!("{:>3}. {:<32} {:>6} sold", rank + 1, product.name, product.quantity);
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct PurchasesCommand {}

impl PurchasesCommand {
    pub async fn execute(self, storefront: &Storefront) -> Result<(), StorefrontAppError> {
        let state = storefront.mount().await;
        if !state.is_authorized() {
            println!("Log in to view past purchases");
            return Ok(());
        }

        let purchases = storefront.catalog().past_purchases(state).await;
        if purchases.is_empty() {
            println!("No past purchases");
        }

        for purchase in purchases {
            let created = UNIX_EPOCH + Duration::from_secs(purchase.created.max(0) as u64);
            println!(
                "{}  {:>3} x {:<32} {:>10} {}",
                format_rfc3339_seconds(created),
                purchase.quantity,
                purchase.details.name,
                purchase.spend(),
                purchase.currency.to_uppercase()
            );
        }
        Ok(())
    }
}
