//! Which page the storefront shows, remembered across reloads.

use crate::error::ParseNameError;
use crate::preferences::PreferenceStore;
use crate::session::SessionState;

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Preference key holding the last selected page.
pub const CURRENT_PAGE_KEY: &str = "currentPage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Products,
    Popular,
    Recent,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Products, Page::Popular, Page::Recent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Products => "Products",
            Page::Popular => "Popular",
            Page::Recent => "Recent",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = ParseNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseNameError::new("page", value, "Products, Popular, Recent"))
    }
}

/// What should be rendered right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Loading,
    Products,
    Popular,
    Recent,
    /// Recent purchases while nobody is logged in.
    RecentLoginRequired,
}

pub struct ViewRouter {
    preferences: Arc<dyn PreferenceStore>,
    current: RwLock<Page>,
}

impl ViewRouter {
    pub fn new(preferences: Arc<dyn PreferenceStore>) -> Self {
        Self {
            preferences,
            current: RwLock::new(Page::default()),
        }
    }

    /// Reload the persisted page. Anything unusable falls back to `Products`.
    pub fn restore(&self) -> Page {
        let page = match self.preferences.get(CURRENT_PAGE_KEY) {
            Ok(Some(stored)) => stored.parse::<Page>().unwrap_or_else(|e| {
                warn!("Ignoring stored page: {e}");
                Page::default()
            }),
            Ok(None) => {
                debug!("No stored page, showing {}", Page::default());
                Page::default()
            }
            Err(e) => {
                warn!("Failed to read stored page: {e}");
                Page::default()
            }
        };

        self.set_current(page);
        page
    }

    /// Switch to `page` and persist it.
    ///
    /// The switch applies even when persisting fails.
    pub fn select(&self, page: Page) {
        self.set_current(page);
        info!("Page selected: {page}");

        if let Err(e) = self.preferences.set(CURRENT_PAGE_KEY, page.as_str()) {
            warn!("Failed to persist page selection: {e}");
        }
    }

    pub fn current(&self) -> Page {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn view(&self, session: SessionState) -> View {
        match (session, self.current()) {
            (SessionState::Unknown, _) => View::Loading,
            (_, Page::Products) => View::Products,
            (_, Page::Popular) => View::Popular,
            (SessionState::Authorized, Page::Recent) => View::Recent,
            (SessionState::Unauthorized, Page::Recent) => View::RecentLoginRequired,
        }
    }

    fn set_current(&self, page: Page) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = page;
    }
}
