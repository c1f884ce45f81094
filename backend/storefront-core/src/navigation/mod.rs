//! Address bar and history abstraction.
//!
//! The core never touches a real browser. Anything that can report the
//! current address, replace the current history entry and perform a full
//! navigation implements [`Navigator`]. [`AddressBar`] is the in-memory
//! implementation used by tests and by the command-line shell.

use std::sync::{Mutex, PoisonError};

use log::{debug, info};
use url::Url;

/// Inbound authorization code parameter.
pub const CODE_PARAM: &str = "code";
/// Marker set on the base address after a successful logout.
pub const LOGOUT_PARAM: &str = "logout";

pub trait Navigator: Send + Sync {
    /// Address currently shown.
    fn current_url(&self) -> Url;

    /// Replace the current history entry without navigating (`history.replaceState`).
    fn replace_url(&self, url: Url);

    /// Leave the page: full navigation or reload to `url`.
    fn navigate(&self, url: Url);
}

/// Value of the first query parameter named `name`.
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Copy of `url` with every query parameter named in `names` removed.
///
/// Other parameters keep their order; an emptied query is dropped entirely
/// so the address does not end in a bare `?`.
pub fn without_params(url: &Url, names: &[&str]) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !names.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut stripped = url.clone();
    if kept.is_empty() {
        stripped.set_query(None);
    } else {
        stripped.query_pairs_mut().clear().extend_pairs(kept);
    }
    stripped
}

/// Remove `names` from the visible address if any are present.
///
/// Returns true when the address was rewritten.
pub fn strip_params(navigator: &dyn Navigator, names: &[&str]) -> bool {
    let current = navigator.current_url();
    let stripped = without_params(&current, names);
    if stripped == current {
        return false;
    }
    debug!("Stripping {:?} from the address bar", names);
    navigator.replace_url(stripped);
    true
}

#[derive(Debug)]
struct AddressBarInner {
    current: Url,
    history_replacements: usize,
    navigations: Vec<Url>,
}

/// In-memory [`Navigator`].
///
/// `navigate` records the target and moves the address there, which is
/// what a reload would show.
#[derive(Debug)]
pub struct AddressBar {
    inner: Mutex<AddressBarInner>,
}

impl AddressBar {
    pub fn new(initial: Url) -> Self {
        Self {
            inner: Mutex::new(AddressBarInner {
                current: initial,
                history_replacements: 0,
                navigations: Vec::new(),
            }),
        }
    }

    /// Every full navigation performed so far, oldest first.
    pub fn navigations(&self) -> Vec<Url> {
        self.lock().navigations.clone()
    }

    pub fn last_navigation(&self) -> Option<Url> {
        self.lock().navigations.last().cloned()
    }

    pub fn history_replacements(&self) -> usize {
        self.lock().history_replacements
    }

    /// Simulate the user typing an address (no navigation recorded).
    pub fn set_current(&self, url: Url) {
        self.lock().current = url;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AddressBarInner> {
        // Plain data; recover from poisoning
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for AddressBar {
    fn current_url(&self) -> Url {
        self.lock().current.clone()
    }

    fn replace_url(&self, url: Url) {
        let mut inner = self.lock();
        inner.current = url;
        inner.history_replacements += 1;
    }

    fn navigate(&self, url: Url) {
        info!("Navigating to {}", url);
        let mut inner = self.lock();
        inner.navigations.push(url.clone());
        inner.current = url;
    }
}
