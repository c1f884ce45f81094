use storefront::terminal::TerminalNavigator;

use storefront_core::navigation::{CODE_PARAM, Navigator, strip_params};

use url::Url;

/// **VALUE**: The terminal navigator behaves like an address bar: stripping
/// rewrites the address without counting as a navigation.
#[test]
fn given_return_address_when_code_stripped_then_no_navigation_recorded() {
    let navigator = TerminalNavigator::new(
        Url::parse("https://shop.test/?code=abc").expect("valid url"),
    );

    assert!(strip_params(&navigator, &[CODE_PARAM]));

    assert_eq!(navigator.current_url().as_str(), "https://shop.test/");
    assert!(navigator.navigations().is_empty());
}

#[test]
fn given_navigation_when_performed_then_recorded() {
    let navigator = TerminalNavigator::new(Url::parse("https://shop.test/").expect("valid url"));
    let target = Url::parse("https://pay.test/c/1").expect("valid url");

    navigator.navigate(target.clone());

    assert_eq!(navigator.navigations(), vec![target.clone()]);
    assert_eq!(navigator.current_url(), target);
}
