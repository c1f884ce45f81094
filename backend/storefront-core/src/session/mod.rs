//! Authorization lifecycle for one storefront tab.
//!
//! The controller turns whatever the address bar and the session cookie say
//! into a single [`SessionState`] per page load.
//!
//! # State machine
//!
//! - **Start**: read `code` and `logout` from the address, strip both.
//! - **Exchanging** (code present, not yet consumed by this tab): one token
//!   exchange. Success → `Authorized`, failure → `Unauthorized`. Never retried.
//! - **Validating** (no fresh code): ask the backend about the cookie.
//!   `valid` → `Authorized`, anything else → `Unauthorized` plus a logout
//!   call so the cookie does not linger.
//! - **Re-validate** (from `Authorized`): validate again, same failure rule.
//! - **Logout** (explicit, from `Authorized`): terminate and reload to
//!   `<base>?logout=true`, or leave the state alone if the call fails.
//!
//! # Concurrency
//!
//! Results are applied through attempt ids. An attempt that was superseded
//! (a later re-validation, a new page load, an explicit logout) or that
//! finishes after [`SessionController::unmount`] is discarded. Readers only
//! ever see the last applied state.

mod latch;

pub use latch::ExchangeLatch;

use crate::api::StorefrontClient;
use crate::error::{ApiError, ParseNameError, SessionError};
use crate::navigation::{CODE_PARAM, LOGOUT_PARAM, Navigator, query_param, strip_params};

use common::RedactedToken;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Initial resolution has not completed.
    #[default]
    Unknown,
    Authorized,
    Unauthorized,
}

impl SessionState {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unknown)
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, SessionState::Authorized)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Unknown => write!(f, "unknown"),
            SessionState::Authorized => write!(f, "authorized"),
            SessionState::Unauthorized => write!(f, "unauthorized"),
        }
    }
}

/// One-time code the identity provider appends to the return address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCode(RedactedToken);

impl AuthorizationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(RedactedToken::new(code))
    }

    pub fn expose(&self) -> &str {
        self.0.expose()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `code` parameter of `url`, if present and non-blank.
    pub fn from_url(url: &Url) -> Option<Self> {
        query_param(url, CODE_PARAM)
            .map(AuthorizationCode::new)
            .filter(|code| !code.is_empty())
    }
}

/// Identity providers the backend can federate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdentityProvider {
    #[default]
    Facebook,
    Google,
    LoginWithAmazon,
    SignInWithApple,
}

impl IdentityProvider {
    pub const ALL: [IdentityProvider; 4] = [
        IdentityProvider::Facebook,
        IdentityProvider::Google,
        IdentityProvider::LoginWithAmazon,
        IdentityProvider::SignInWithApple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityProvider::Facebook => "Facebook",
            IdentityProvider::Google => "Google",
            IdentityProvider::LoginWithAmazon => "LoginWithAmazon",
            IdentityProvider::SignInWithApple => "SignInWithApple",
        }
    }
}

impl fmt::Display for IdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentityProvider {
    type Err = ParseNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        IdentityProvider::ALL
            .into_iter()
            .find(|provider| provider.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                ParseNameError::new(
                    "identity provider",
                    value,
                    "Facebook, Google, LoginWithAmazon, SignInWithApple",
                )
            })
    }
}

/// Monotonic id of one resolution or re-validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AttemptId(u64);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Address a successful logout reloads to.
pub fn logout_landing_url(base_url: &Url) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut().append_pair(LOGOUT_PARAM, "true");
    url
}

pub struct SessionController {
    client: StorefrontClient,
    navigator: Arc<dyn Navigator>,
    /// Storefront address: OAuth `redirect_uri` and logout landing base.
    base_url: Url,
    state: RwLock<SessionState>,
    /// One-shot per page load.
    resolution_started: AtomicBool,
    /// Per tab; survives page loads.
    exchange_latch: ExchangeLatch,
    latest_attempt: AtomicU64,
    mounted: AtomicBool,
    logged_out: AtomicBool,
}

impl SessionController {
    pub fn new(client: StorefrontClient, navigator: Arc<dyn Navigator>, base_url: Url) -> Self {
        Self {
            client,
            navigator,
            base_url,
            state: RwLock::new(SessionState::Unknown),
            resolution_started: AtomicBool::new(false),
            exchange_latch: ExchangeLatch::new(),
            latest_attempt: AtomicU64::new(0),
            mounted: AtomicBool::new(true),
            logged_out: AtomicBool::new(false),
        }
    }

    /// Last resolved state.
    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    /// Whether this page load arrived with the `logout=true` marker.
    pub fn logged_out(&self) -> bool {
        self.logged_out.load(Ordering::SeqCst)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn exchange_latch(&self) -> &ExchangeLatch {
        &self.exchange_latch
    }

    /// Establish the session state for this page load.
    ///
    /// Runs at most once per page load; later calls perform no network
    /// traffic and return the current state. Never fails: every error
    /// resolves to [`SessionState::Unauthorized`].
    pub async fn resolve(&self) -> SessionState {
        if self.resolution_started.swap(true, Ordering::SeqCst) {
            debug!("Session resolution already started for this page load");
            return self.state().await;
        }

        let attempt = self.begin_attempt();
        let address = self.navigator.current_url();

        if query_param(&address, LOGOUT_PARAM).is_some() {
            info!("Page loaded after a completed logout");
            self.logged_out.store(true, Ordering::SeqCst);
        }

        let code = AuthorizationCode::from_url(&address);

        // Consumed from the address before any request so a reload mid-flight
        // cannot pick the code up again
        strip_params(self.navigator.as_ref(), &[CODE_PARAM, LOGOUT_PARAM]);

        let next = match code {
            Some(code) if self.exchange_latch.claim(&code) => self.exchange(&code).await,
            Some(_) => {
                debug!("Authorization code already consumed in this tab, validating session instead");
                self.validate_or_terminate(attempt).await
            }
            None => self.validate_or_terminate(attempt).await,
        };

        self.apply(attempt, next).await
    }

    /// Re-run validation from `Authorized`. Any other state is returned unchanged.
    pub async fn revalidate(&self) -> SessionState {
        let current = self.state().await;
        if !current.is_authorized() {
            debug!("Re-validation skipped: session is {current}");
            return current;
        }

        let attempt = self.begin_attempt();
        let next = self.validate_or_terminate(attempt).await;
        self.apply(attempt, next).await
    }

    /// Explicit user logout.
    ///
    /// On success the state becomes `Unauthorized` and the navigator reloads
    /// to `<base>?logout=true`. On failure nothing changes and the caller may
    /// retry.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let current = self.state().await;
        if !current.is_authorized() {
            return Err(SessionError::not_authorized(current));
        }

        if let Err(e) = self.client.logout().await {
            error!("Logout failed ({}), session left {current}: {e}", e.error_category());
            return Err(SessionError::logout(e));
        }

        // Supersedes any re-validation still in flight
        self.begin_attempt();
        {
            let mut state = self.state.write().await;
            *state = SessionState::Unauthorized;
        }
        info!("Logged out, reloading storefront");

        self.navigator.navigate(logout_landing_url(&self.base_url));
        Ok(())
    }

    /// Address that starts a login with `provider`.
    pub fn login_url(&self, provider: IdentityProvider) -> Result<Url, ApiError> {
        self.client.authorize_url(provider, &self.base_url)
    }

    /// Send the browser to the identity provider.
    pub fn begin_login(&self, provider: IdentityProvider) -> Result<Url, ApiError> {
        let url = self.login_url(provider)?;
        info!("Starting login with {provider}");
        self.navigator.navigate(url.clone());
        Ok(url)
    }

    /// Start a new page load: state back to `Unknown`, resolution re-armed.
    ///
    /// Codes consumed by earlier page loads stay consumed.
    pub async fn begin_page_load(&self) {
        self.begin_attempt();
        {
            let mut state = self.state.write().await;
            *state = SessionState::Unknown;
        }
        self.logged_out.store(false, Ordering::SeqCst);
        self.mounted.store(true, Ordering::SeqCst);
        self.resolution_started.store(false, Ordering::SeqCst);
        debug!("Session controller re-armed for a new page load");
    }

    /// Results of calls still in flight will be discarded.
    pub fn unmount(&self) {
        if self.mounted.swap(false, Ordering::SeqCst) {
            debug!("Session controller unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    async fn exchange(&self, code: &AuthorizationCode) -> SessionState {
        info!("Exchanging authorization code");
        match self.client.exchange_code(code, &self.base_url).await {
            Ok(_token) => {
                info!("Authorization code exchanged");
                SessionState::Authorized
            }
            Err(e) => {
                error!("Token exchange failed ({}): {e}", e.error_category());
                SessionState::Unauthorized
            }
        }
    }

    async fn validate_or_terminate(&self, attempt: AttemptId) -> SessionState {
        let valid = match self.client.validate_session().await {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Session validation failed ({}): {e}", e.error_category());
                false
            }
        };

        if valid {
            return SessionState::Authorized;
        }

        if self.is_current(attempt) {
            self.terminate_residual_session().await;
        }
        SessionState::Unauthorized
    }

    /// Best-effort server-side logout after a failed validation. No navigation.
    async fn terminate_residual_session(&self) {
        info!("Session invalid, terminating residual session");
        if let Err(e) = self.client.logout().await {
            warn!("Residual session termination failed ({}): {e}", e.error_category());
        }
    }

    fn begin_attempt(&self) -> AttemptId {
        AttemptId(self.latest_attempt.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn is_current(&self, attempt: AttemptId) -> bool {
        self.mounted.load(Ordering::SeqCst)
            && self.latest_attempt.load(Ordering::SeqCst) == attempt.0
    }

    async fn apply(&self, attempt: AttemptId, next: SessionState) -> SessionState {
        let mut state = self.state.write().await;

        if !self.is_current(attempt) {
            info!("Discarding stale session result '{next}' from attempt {attempt}");
            return *state;
        }

        if *state != next {
            info!("Session state {} -> {} (attempt {attempt})", *state, next);
        }
        *state = next;
        next
    }
}
