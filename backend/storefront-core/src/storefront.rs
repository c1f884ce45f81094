use crate::api::StorefrontClient;
use crate::cart::CartEngine;
use crate::catalog::CatalogService;
use crate::checkout::{CheckoutCoordinator, CheckoutOutcome};
use crate::config::StorefrontConfig;
use crate::error::{CheckoutError, CoreError};
use crate::navigation::Navigator;
use crate::preferences::PreferenceStore;
use crate::router::{View, ViewRouter};
use crate::session::{IdentityProvider, SessionController, SessionState};

use std::sync::Arc;

use log::info;

/// Application state for one storefront tab.
///
/// Owns the session, cart and page selection. Components receive it by
/// reference and mutate only through its operations. Cheap to clone; clones
/// share state.
#[derive(Clone)]
pub struct Storefront {
    session: Arc<SessionController>,
    cart: Arc<CartEngine>,
    router: Arc<ViewRouter>,
    checkout: Arc<CheckoutCoordinator>,
    catalog: CatalogService,
    default_provider: IdentityProvider,
}

impl Storefront {
    pub fn new(
        config: &StorefrontConfig,
        navigator: Arc<dyn Navigator>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let client = StorefrontClient::from_config(config)?;
        let base_url = config.base_url()?;

        Ok(Self {
            session: Arc::new(SessionController::new(
                client.clone(),
                Arc::clone(&navigator),
                base_url.clone(),
            )),
            cart: Arc::new(CartEngine::new()),
            router: Arc::new(ViewRouter::new(preferences)),
            checkout: Arc::new(CheckoutCoordinator::new(client.clone(), navigator, base_url)),
            catalog: CatalogService::new(client),
            default_provider: config.login.default_provider,
        })
    }

    /// Resolve the session for this page load and restore the last page.
    pub async fn mount(&self) -> SessionState {
        let page = self.router.restore();
        let state = self.session.resolve().await;
        info!("Storefront mounted: session {state}, page {page}");
        state
    }

    /// Start a fresh page load and mount it.
    ///
    /// The in-memory cart is emptied. Preferences and consumed codes survive.
    pub async fn reload(&self) -> SessionState {
        self.session.unmount();
        self.session.begin_page_load().await;
        self.cart.clear();
        self.mount().await
    }

    pub fn unmount(&self) {
        self.session.unmount();
    }

    pub async fn view(&self) -> View {
        self.router.view(self.session.state().await)
    }

    pub async fn checkout(&self) -> Result<CheckoutOutcome, CheckoutError> {
        let cart = self.cart.snapshot();
        self.checkout.initiate_checkout(&cart).await
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn cart(&self) -> &CartEngine {
        &self.cart
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn checkout_coordinator(&self) -> &CheckoutCoordinator {
        &self.checkout
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    /// Provider used when a login does not name one.
    pub fn default_provider(&self) -> IdentityProvider {
        self.default_provider
    }
}
