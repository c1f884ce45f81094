// Unit tests for checkout item parsing

use crate::commands::{MAX_ITEM_QUANTITY, parse_item};

#[test]
fn given_bare_id_when_parsed_then_quantity_one() {
    assert_eq!(parse_item("prod_mug"), Ok(("prod_mug".to_string(), 1)));
}

#[test]
fn given_id_with_quantity_when_parsed_then_split() {
    assert_eq!(parse_item("prod_mug=3"), Ok(("prod_mug".to_string(), 3)));
}

#[test]
fn given_bad_items_when_parsed_then_rejected() {
    assert!(parse_item("prod_mug=0").is_err());
    assert!(parse_item("prod_mug=lots").is_err());
    assert!(parse_item("=2").is_err());
}

/// **VALUE**: A huge quantity is refused at parse time instead of adding
/// billions of units one by one.
///
/// **BUG THIS CATCHES**: Would catch the upper bound being dropped, letting
/// `id=4000000000` stall the command.
#[test]
fn given_quantity_above_limit_when_parsed_then_rejected() {
    assert_eq!(
        parse_item("prod_mug=999"),
        Ok(("prod_mug".to_string(), MAX_ITEM_QUANTITY))
    );

    let err = parse_item("prod_mug=4000000000").expect_err("too many");

    assert!(err.contains("at most 999"));
    assert!(parse_item("prod_mug=1000").is_err());
}
