use crate::helpers::cart_item;

use storefront_core::cart::{CartEngine, ProductId};
use storefront_core::checkout::CheckoutCoordinator;

use rust_decimal::Decimal;

/// **VALUE**: Checks the increment/decrement law across several products at
/// once, through the public API only.
///
/// **BUG THIS CATCHES**: Would catch a decrement on one product touching
/// another product's line.
#[test]
fn given_interleaved_products_when_mutated_then_each_quantity_independent() {
    let cart = CartEngine::new();
    let a = cart_item("a", 100);
    let b = cart_item("b", 200);

    for _ in 0..3 {
        cart.increment(&a);
    }
    cart.increment(&b);
    cart.decrement(&a.product_id);
    cart.decrement(&b.product_id);
    cart.decrement(&b.product_id);

    assert_eq!(cart.quantity_of(&a.product_id), 2);
    assert_eq!(cart.quantity_of(&b.product_id), 0);
    assert!(cart.snapshot().line(&b.product_id).is_none());
    assert_eq!(cart.total_quantity(), Some(2));
}

#[test]
fn given_cart_when_request_built_then_lines_follow_product_order() {
    let cart = CartEngine::new();
    cart.increment(&cart_item("c", 150));
    cart.increment(&cart_item("a", 500));

    let lines = CheckoutCoordinator::build_request(&cart.snapshot());

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].price, Decimal::new(500, 2));
    assert_eq!(lines[1].price, Decimal::new(150, 2));
    assert!(lines.iter().all(|line| line.quantity == 1));
}

#[test]
fn given_unknown_product_when_queried_then_zero() {
    let cart = CartEngine::new();

    assert_eq!(cart.quantity_of(&ProductId::new("nope")), 0);
    assert!(cart.is_empty());
}
