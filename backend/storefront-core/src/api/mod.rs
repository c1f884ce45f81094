//! HTTP client for the storefront backend.
//!
//! One method per endpoint. Requests carry the ambient session cookie through
//! the client's cookie store. Only the idempotent catalog reads are retried;
//! token exchange, validation, logout and checkout are attempted once.

pub mod schemas;

use crate::config::StorefrontConfig;
use crate::error::{ApiError, CoreError};
use crate::session::{AuthorizationCode, IdentityProvider};

use schemas::{
    CheckoutLine, CheckoutSessionResponse, PastPurchase, Price, Product, RankedProduct,
    TokenResponse, ValidationResponse,
};

use common::RedactedToken;

use std::time::Duration;

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, trace, warn};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio::time::sleep as TokioSleep;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const RETRY_INITIAL_INTERVAL: Duration = Duration::from_millis(200);

const TOKEN_ENDPOINT: &str = "oauth2/token";
const VALIDATE_ENDPOINT: &str = "oauth2/validate_auth_cookie";
const LOGOUT_ENDPOINT: &str = "oauth2/logout";
const AUTHORIZE_ENDPOINT: &str = "oauth2/authorize";
const CHECKOUT_ENDPOINT: &str = "stripe/create-checkout-session";
const PRODUCTS_ENDPOINT: &str = "stripe/products";
const PRICES_ENDPOINT: &str = "stripe/prices";
const POPULARITY_ENDPOINT: &str = "stripe/product-popularity";
const PAST_PURCHASES_ENDPOINT: &str = "stripe/current-user-past-purchases";

const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";

#[derive(Clone)]
pub struct StorefrontClient {
    endpoint_url: Url,
    client: Client,
    catalog_retry_budget: Duration,
}

impl StorefrontClient {
    pub fn new(endpoint_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::from_reqwest("client", &e))?;

        Ok(Self {
            endpoint_url: with_trailing_slash(endpoint_url),
            client,
            catalog_retry_budget: Duration::ZERO,
        })
    }

    pub fn from_config(config: &StorefrontConfig) -> Result<Self, CoreError> {
        let client = Self::new(config.endpoint_url()?, config.request_timeout())?
            .with_catalog_retry(config.catalog_retry_budget());
        Ok(client)
    }

    /// Client with the default timeout and no retries.
    pub fn with_endpoint(endpoint_url: &str) -> Result<Self, ApiError> {
        Self::new(Url::parse(endpoint_url)?, DEFAULT_TIMEOUT_DURATION)
    }

    pub fn with_catalog_retry(mut self, budget: Duration) -> Self {
        self.catalog_retry_budget = budget;
        self
    }

    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.endpoint_url.join(path)?)
    }

    /// Exchange a one-time authorization code for an access token.
    ///
    /// The backend also sets the session cookie on success. A 2xx answer
    /// without a usable `access_token` is a schema error.
    pub async fn exchange_code(
        &self,
        code: &AuthorizationCode,
        redirect_uri: &Url,
    ) -> Result<RedactedToken, ApiError> {
        let url = self.endpoint(TOKEN_ENDPOINT)?;
        let form = [
            ("grant_type", GRANT_TYPE_AUTHORIZATION_CODE),
            ("code", code.expose()),
            ("redirect_uri", redirect_uri.as_str()),
        ];

        let response: TokenResponse = self
            .send_json(TOKEN_ENDPOINT, self.client.post(url).form(&form))
            .await?;

        let token = RedactedToken::new(response.access_token);
        if token.is_empty() {
            return Err(ApiError::schema(TOKEN_ENDPOINT, "access_token is empty"));
        }

        debug!(
            "Token exchange succeeded ({} chars, type {:?}, expires in {:?}s)",
            token.len(),
            response.token_type,
            response.expires_in
        );
        Ok(token)
    }

    /// Ask the backend whether the ambient session cookie is still valid.
    pub async fn validate_session(&self) -> Result<bool, ApiError> {
        let url = self.endpoint(VALIDATE_ENDPOINT)?;
        let response: ValidationResponse = self
            .send_json(VALIDATE_ENDPOINT, self.client.post(url))
            .await?;
        Ok(response.valid)
    }

    /// Terminate the server-side session.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint(LOGOUT_ENDPOINT)?;
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(LOGOUT_ENDPOINT, &e))?;

        if !response.status().is_success() {
            return Err(ApiError::from_http_response(
                LOGOUT_ENDPOINT,
                response.status().as_u16(),
                response.text().await.unwrap_or_default(),
            ));
        }
        Ok(())
    }

    /// Address the browser is sent to in order to log in with `provider`.
    pub fn authorize_url(
        &self,
        provider: IdentityProvider,
        redirect_uri: &Url,
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint(AUTHORIZE_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("identity_provider", provider.as_str())
            .append_pair("redirect_uri", redirect_uri.as_str());
        Ok(url)
    }

    /// Create a payment-processor checkout session and return its address.
    pub async fn create_checkout_session(
        &self,
        lines: &[CheckoutLine],
        success_url: &Url,
        cancel_url: &Url,
    ) -> Result<String, ApiError> {
        let mut url = self.endpoint(CHECKOUT_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("return_type", "json")
            .append_pair("success_url", success_url.as_str())
            .append_pair("cancel_url", cancel_url.as_str());

        let response: CheckoutSessionResponse = self
            .send_json(CHECKOUT_ENDPOINT, self.client.post(url).json(lines))
            .await?;
        Ok(response.url)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_with_retry(PRODUCTS_ENDPOINT).await
    }

    pub async fn list_prices(&self) -> Result<Vec<Price>, ApiError> {
        self.get_with_retry(PRICES_ENDPOINT).await
    }

    pub async fn product_popularity(&self) -> Result<Vec<RankedProduct>, ApiError> {
        self.get_with_retry(POPULARITY_ENDPOINT).await
    }

    /// Purchases of the user owning the session cookie. Not retried.
    pub async fn past_purchases(&self) -> Result<Vec<PastPurchase>, ApiError> {
        let url = self.endpoint(PAST_PURCHASES_ENDPOINT)?;
        self.send_json(PAST_PURCHASES_ENDPOINT, self.client.get(url))
            .await
    }

    async fn get_with_retry<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(endpoint)?;

        if self.catalog_retry_budget.is_zero() {
            return self.send_json(endpoint, self.client.get(url)).await;
        }

        let mut backoff = ExponentialBackoff {
            initial_interval: RETRY_INITIAL_INTERVAL,
            current_interval: RETRY_INITIAL_INTERVAL,
            max_elapsed_time: Some(self.catalog_retry_budget),
            ..Default::default()
        };

        loop {
            match self.send_json(endpoint, self.client.get(url.clone())).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => match backoff.next_backoff() {
                    Some(duration) => {
                        warn!("GET {endpoint} failed ({}), retrying after {duration:?}", e.error_category());
                        TokioSleep(duration).await;
                    }
                    None => {
                        warn!("GET {endpoint} retry budget exhausted");
                        return Err(e);
                    }
                },
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        trace!("Sending request to {endpoint}");

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(endpoint, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_http_response(
                endpoint,
                status.as_u16(),
                response.text().await.unwrap_or_default(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(endpoint, &e))?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("Response from {endpoint} did not match its schema: {e}");
            ApiError::schema(endpoint, e.to_string())
        })
    }
}

/// `Url::join` replaces the last path segment unless the base ends in `/`.
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
