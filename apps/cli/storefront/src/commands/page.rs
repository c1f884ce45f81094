use crate::error::StorefrontAppError;

use storefront_core::Storefront;
use storefront_core::router::Page;

use clap::Args;

#[derive(Debug, Args)]
pub struct PageCommand {
    /// Page to select (Products, Popular, Recent). Omit to show the current one.
    #[arg()]
    page: Option<Page>,
}

impl PageCommand {
    pub async fn execute(self, storefront: &Storefront) -> Result<(), StorefrontAppError> {
        storefront.mount().await;

        if let Some(page) = self.page {
            storefront.router().select(page);
        }

        println!("page: {}", storefront.router().current());
        println!("view: {:?}", storefront.view().await);
        Ok(())
    }
}
