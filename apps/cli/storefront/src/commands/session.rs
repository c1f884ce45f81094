use crate::error::StorefrontAppError;

use storefront_core::Storefront;
use storefront_core::session::IdentityProvider;

use clap::Args;
use log::info;

#[derive(Debug, Args)]
pub struct ShowCommand {}

impl ShowCommand {
    pub async fn execute(self, storefront: &Storefront) -> Result<(), StorefrontAppError> {
        let state = storefront.mount().await;

        println!("session: {state}");
        if storefront.session().logged_out() {
            println!("(arrived from a completed logout)");
        }
        println!("view:    {:?}", storefront.view().await);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Identity provider (Facebook, Google, LoginWithAmazon, SignInWithApple).
    /// Defaults to the configured provider.
    #[arg()]
    provider: Option<IdentityProvider>,
}

impl LoginCommand {
    pub fn execute(self, storefront: &Storefront) -> Result<(), StorefrontAppError> {
        let provider = self.provider.unwrap_or(storefront.default_provider());

        storefront
            .session()
            .begin_login(provider)
            .map_err(|e| StorefrontAppError::storefront(format!("Cannot build login address: {e}")))?;
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(self, storefront: &Storefront) -> Result<(), StorefrontAppError> {
        storefront.mount().await;
        storefront.session().logout().await?;
        info!("Logout complete");
        println!("Logged out");
        Ok(())
    }
}
