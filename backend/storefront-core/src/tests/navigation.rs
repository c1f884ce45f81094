// Unit tests for address helpers and the in-memory address bar

use crate::navigation::{AddressBar, CODE_PARAM, LOGOUT_PARAM, Navigator, query_param, strip_params, without_params};

use url::Url;

fn url(value: &str) -> Url {
    Url::parse(value).expect("test URL should parse")
}

/// **VALUE**: Stripping the code must not take unrelated parameters with it.
///
/// **BUG THIS CATCHES**: Would catch a `set_query(None)` shortcut that drops
/// `?ref=ad` along with `code`.
#[test]
fn given_code_and_other_params_when_stripped_then_others_survive() {
    // GIVEN: An address carrying a code between two unrelated parameters
    let address = url("https://shop.test/?ref=ad&code=abc&lang=en");

    // WHEN: Removing the code
    let stripped = without_params(&address, &[CODE_PARAM]);

    // THEN: The other parameters keep their order
    assert_eq!(stripped.as_str(), "https://shop.test/?ref=ad&lang=en");
}

#[test]
fn given_only_stripped_params_when_removed_then_query_is_dropped() {
    let address = url("https://shop.test/?code=abc&logout=true");

    let stripped = without_params(&address, &[CODE_PARAM, LOGOUT_PARAM]);

    assert_eq!(stripped.as_str(), "https://shop.test/");
    assert_eq!(stripped.query(), None);
}

#[test]
fn given_param_when_queried_then_returns_decoded_value() {
    let address = url("https://shop.test/?code=a%2Fb");

    assert_eq!(query_param(&address, CODE_PARAM).as_deref(), Some("a/b"));
    assert_eq!(query_param(&address, LOGOUT_PARAM), None);
}

/// **VALUE**: A clean address must not produce a history entry replacement.
#[test]
fn given_clean_address_when_strip_params_then_history_untouched() {
    let bar = AddressBar::new(url("https://shop.test/"));

    let rewritten = strip_params(&bar, &[CODE_PARAM]);

    assert!(!rewritten);
    assert_eq!(bar.history_replacements(), 0);
}

#[test]
fn given_code_in_address_when_strip_params_then_replaces_history_entry() {
    let bar = AddressBar::new(url("https://shop.test/?code=abc"));

    let rewritten = strip_params(&bar, &[CODE_PARAM]);

    assert!(rewritten);
    assert_eq!(bar.history_replacements(), 1);
    assert_eq!(bar.current_url().as_str(), "https://shop.test/");
    assert!(bar.navigations().is_empty(), "Stripping must not navigate");
}

#[test]
fn given_address_bar_when_navigate_then_records_and_moves() {
    let bar = AddressBar::new(url("https://shop.test/"));

    bar.navigate(url("https://pay.test/session"));

    assert_eq!(bar.last_navigation(), Some(url("https://pay.test/session")));
    assert_eq!(bar.current_url(), url("https://pay.test/session"));
}
