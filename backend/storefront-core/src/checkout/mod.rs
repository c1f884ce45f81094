//! Hand-off from the cart to the hosted payment flow.

use crate::api::StorefrontClient;
use crate::api::schemas::CheckoutLine;
use crate::cart::Cart;
use crate::error::CheckoutError;
use crate::navigation::Navigator;

use std::sync::Arc;

use log::{error, info};
use url::Url;

pub const SUCCESS_PARAM: &str = "success";
pub const CANCELED_PARAM: &str = "canceled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Nothing to buy; no request was made.
    EmptyCart,
    /// The navigator was sent to the payment page.
    Redirected { url: Url },
}

pub struct CheckoutCoordinator {
    client: StorefrontClient,
    navigator: Arc<dyn Navigator>,
    base_url: Url,
}

impl CheckoutCoordinator {
    pub fn new(client: StorefrontClient, navigator: Arc<dyn Navigator>, base_url: Url) -> Self {
        Self {
            client,
            navigator,
            base_url,
        }
    }

    /// Request body for `cart`, one entry per line in product id order.
    pub fn build_request(cart: &Cart) -> Vec<CheckoutLine> {
        cart.lines()
            .filter(|(_, line)| line.quantity > 0)
            .map(|(_, line)| CheckoutLine {
                price: line.unit_price,
                quantity: line.quantity,
            })
            .collect()
    }

    pub fn success_url(&self) -> Url {
        with_flag(&self.base_url, SUCCESS_PARAM)
    }

    pub fn cancel_url(&self) -> Url {
        with_flag(&self.base_url, CANCELED_PARAM)
    }

    /// Submit `cart` and navigate to the payment page.
    ///
    /// The cart is never modified here. On any failure nothing navigates and
    /// the call is not retried.
    pub async fn initiate_checkout(&self, cart: &Cart) -> Result<CheckoutOutcome, CheckoutError> {
        if cart.is_empty() {
            info!("Checkout requested with an empty cart");
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let lines = Self::build_request(cart);
        info!("Submitting checkout with {} line(s)", lines.len());

        let redirect = self
            .client
            .create_checkout_session(&lines, &self.success_url(), &self.cancel_url())
            .await
            .map_err(|e| {
                error!("Checkout submission failed ({}): {e}", e.error_category());
                CheckoutError::submit(e)
            })?;

        let url = parse_redirect(&redirect)?;

        info!("Redirecting to checkout at {}", url.host_str().unwrap_or_default());
        self.navigator.navigate(url.clone());
        Ok(CheckoutOutcome::Redirected { url })
    }
}

fn with_flag(base_url: &Url, name: &str) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut().append_pair(name, "true");
    url
}

fn parse_redirect(redirect: &str) -> Result<Url, CheckoutError> {
    let url = Url::parse(redirect).map_err(|e| {
        error!("Checkout returned an unusable address: {e}");
        CheckoutError::invalid_redirect(redirect, e.to_string())
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => {
            error!("Checkout returned a '{scheme}' address");
            Err(CheckoutError::invalid_redirect(
                redirect,
                format!("unsupported scheme '{scheme}'"),
            ))
        }
    }
}
