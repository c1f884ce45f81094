// Unit tests for cart snapshots and quantity arithmetic

use crate::cart::{CartEngine, CartItem, ProductId};

use rust_decimal::Decimal;
use std::sync::Arc;

fn item(id: &str, cents: i64) -> CartItem {
    CartItem {
        product_id: ProductId::new(id),
        display_name: format!("Product {id}"),
        thumbnail: None,
        price_id: format!("price_{id}"),
        unit_price: Decimal::new(cents, 2),
    }
}

/// **VALUE**: Quantity always equals increments minus decrements, clamped at
/// zero, and a zero line is gone.
///
/// **WHY THIS MATTERS**: A retained zero line would be submitted to checkout
/// as `quantity: 0` and show up in the badge count.
///
/// **BUG THIS CATCHES**: Would catch decrement underflow, or removal only
/// happening on the next increment.
#[test]
fn given_mixed_sequence_when_applied_then_quantity_is_clamped_difference() {
    let engine = CartEngine::new();
    let hat = item("hat", 500);
    let id = hat.product_id.clone();

    // +1 +1 -1 -1 -1 +1 -1 -1
    let steps = [true, true, false, false, false, true, false, false];
    let mut expected: u32 = 0;

    for step in steps {
        let quantity = if step {
            expected += 1;
            engine.increment(&hat)
        } else {
            expected = expected.saturating_sub(1);
            engine.decrement(&id)
        };

        assert_eq!(quantity, expected);
        assert_eq!(engine.quantity_of(&id), expected);
        assert_eq!(engine.snapshot().line(&id).is_some(), expected > 0);
    }

    assert!(engine.is_empty());
}

#[test]
fn given_absent_product_when_decremented_then_cart_unchanged() {
    let engine = CartEngine::new();
    let before = engine.snapshot();

    let quantity = engine.decrement(&ProductId::new("ghost"));

    assert_eq!(quantity, 0);
    assert!(Arc::ptr_eq(&before, &engine.snapshot()), "No-op must not replace the cart");
}

/// **VALUE**: Readers holding a snapshot are never affected by later changes.
#[test]
fn given_snapshot_when_cart_mutated_then_snapshot_is_unchanged() {
    let engine = CartEngine::new();
    engine.increment(&item("mug", 300));
    let snapshot = engine.snapshot();

    engine.increment(&item("mug", 300));
    engine.increment(&item("hat", 500));

    assert_eq!(snapshot.quantity_of(&ProductId::new("mug")), 1);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(engine.quantity_of(&ProductId::new("mug")), 2);
}

#[test]
fn given_price_change_when_incremented_again_then_cached_price_kept() {
    let engine = CartEngine::new();
    engine.increment(&item("mug", 300));

    engine.increment(&item("mug", 999));

    let line = engine
        .snapshot()
        .line(&ProductId::new("mug"))
        .cloned()
        .expect("line should exist");
    assert_eq!(line.unit_price, Decimal::new(300, 2));
    assert_eq!(line.quantity, 2);
}

#[test]
fn given_lines_when_totalled_then_counts_and_subtotal_match() {
    let engine = CartEngine::new();
    assert_eq!(engine.total_quantity(), None);

    engine.increment(&item("a", 500));
    engine.increment(&item("a", 500));
    engine.increment(&item("b", 300));

    assert_eq!(engine.total_quantity(), Some(3));
    assert_eq!(engine.subtotal(), Decimal::new(1300, 2));

    engine.clear();
    assert!(engine.is_empty());
    assert_eq!(engine.total_quantity(), None);
}

#[test]
fn given_insertion_order_when_listed_then_lines_ordered_by_product_id() {
    let engine = CartEngine::new();
    engine.increment(&item("zebra", 100));
    engine.increment(&item("apple", 100));

    let snapshot = engine.snapshot();
    let ids: Vec<&str> = snapshot.lines().map(|(id, _)| id.as_str()).collect();

    assert_eq!(ids, vec!["apple", "zebra"]);
}
