// Unit tests for joining products to prices

use crate::api::schemas::{Price, Product};
use crate::catalog::{from_minor_units, join_prices};

use rust_decimal::Decimal;

fn product(id: &str, default_price: Option<&str>, active: bool) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        images: vec![format!("https://img.test/{id}.png")],
        description: None,
        default_price: default_price.map(str::to_string),
        active,
    }
}

fn price(id: &str, product: &str, unit_amount: Option<i64>) -> Price {
    Price {
        id: id.to_string(),
        product: product.to_string(),
        currency: "usd".to_string(),
        unit_amount,
    }
}

/// **VALUE**: Prices arrive in cents and must be shown as two-decimal amounts.
///
/// **BUG THIS CATCHES**: Would catch `Decimal::from(1999)` showing $1999.
#[test]
fn given_priced_product_when_joined_then_unit_price_in_major_units() {
    let entries = join_prices(
        vec![product("mug", Some("price_mug"), true)],
        &[price("price_mug", "mug", Some(1999))],
    );

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].unit_price, Some(Decimal::new(1999, 2)));
    assert_eq!(entries[0].price_id.as_deref(), Some("price_mug"));

    let item = entries[0].cart_item().expect("priced product is buyable");
    assert_eq!(item.thumbnail.as_deref(), Some("https://img.test/mug.png"));
}

#[test]
fn given_missing_or_unknown_price_when_joined_then_not_buyable() {
    let entries = join_prices(
        vec![
            product("no_price", None, true),
            product("dangling", Some("price_gone"), true),
            product("free_text", Some("price_custom"), true),
        ],
        &[price("price_custom", "free_text", None)],
    );

    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|entry| entry.unit_price.is_none()));
    assert!(entries.iter().all(|entry| entry.cart_item().is_none()));
}

#[test]
fn given_inactive_product_when_joined_then_dropped() {
    let entries = join_prices(vec![product("old", Some("p"), false)], &[price("p", "old", Some(100))]);

    assert!(entries.is_empty());
}

#[test]
fn given_minor_units_when_converted_then_scale_is_two() {
    assert_eq!(from_minor_units(500).to_string(), "5.00");
    assert_eq!(from_minor_units(5).to_string(), "0.05");
}
