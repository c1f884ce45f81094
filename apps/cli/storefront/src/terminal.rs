//! [`Navigator`] for a terminal: navigations are printed for the user to open.

use storefront_core::navigation::{AddressBar, Navigator};

use log::debug;
use url::Url;

pub struct TerminalNavigator {
    address_bar: AddressBar,
}

impl TerminalNavigator {
    /// `initial` is the address the storefront was "opened" at, e.g. the
    /// identity provider's return address carrying `?code=...`.
    pub fn new(initial: Url) -> Self {
        Self {
            address_bar: AddressBar::new(initial),
        }
    }

    pub fn navigations(&self) -> Vec<Url> {
        self.address_bar.navigations()
    }
}

impl Navigator for TerminalNavigator {
    fn current_url(&self) -> Url {
        self.address_bar.current_url()
    }

    fn replace_url(&self, url: Url) {
        debug!("Address is now {url}");
        self.address_bar.replace_url(url);
    }

    fn navigate(&self, url: Url) {
        println!("Open in browser: {url}");
        self.address_bar.navigate(url);
    }
}
