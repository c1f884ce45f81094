//! One subcommand per storefront operation.

mod catalog;
mod checkout;
mod page;
mod session;

#[cfg(test)]
pub(crate) use checkout::{MAX_ITEM_QUANTITY, parse_item};

use crate::error::StorefrontAppError;

use storefront_core::Storefront;

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the session for the current address and show the result.
    Session(session::ShowCommand),
    /// Print (and "open") the login address for an identity provider.
    Login(session::LoginCommand),
    /// Log out of the current session.
    Logout(session::LogoutCommand),
    /// List products with their prices.
    Catalog(catalog::CatalogCommand),
    /// List products by popularity.
    Popular(catalog::PopularCommand),
    /// List the logged-in user's past purchases.
    Purchases(catalog::PurchasesCommand),
    /// Show or select the current page.
    Page(page::PageCommand),
    /// Fill a cart and start checkout.
    Checkout(checkout::CheckoutCommand),
}

impl Command {
    pub async fn execute(self, storefront: &Storefront) -> Result<(), StorefrontAppError> {
        match self {
            Self::Session(cmd) => cmd.execute(storefront).await,
            Self::Login(cmd) => cmd.execute(storefront),
            Self::Logout(cmd) => cmd.execute(storefront).await,
            Self::Catalog(cmd) => cmd.execute(storefront).await,
            Self::Popular(cmd) => cmd.execute(storefront).await,
            Self::Purchases(cmd) => cmd.execute(storefront).await,
            Self::Page(cmd) => cmd.execute(storefront).await,
            Self::Checkout(cmd) => cmd.execute(storefront).await,
        }
    }
}
