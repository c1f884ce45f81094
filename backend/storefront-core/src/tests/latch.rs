// Unit tests for the authorization code latch

use crate::session::{AuthorizationCode, ExchangeLatch};

use std::sync::Arc;
use std::thread;

/// **VALUE**: The latch is the only thing standing between a reload and a
/// second token exchange for the same code.
///
/// **BUG THIS CATCHES**: Would catch a check-then-insert split across two
/// lock acquisitions, which lets two callers both see "not consumed".
#[test]
fn given_many_threads_when_claiming_same_code_then_exactly_one_wins() {
    // GIVEN: A shared latch and one code
    let latch = Arc::new(ExchangeLatch::new());

    // WHEN: Eight threads race to claim it
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let latch = Arc::clone(&latch);
            thread::spawn(move || latch.claim(&AuthorizationCode::new("race-code")))
        })
        .collect();
    let winners = handles
        .into_iter()
        .map(|handle| handle.join().expect("claim thread panicked"))
        .filter(|won| *won)
        .count();

    // THEN: One claim succeeded
    assert_eq!(winners, 1);
    assert_eq!(latch.consumed_count(), 1);
}

#[test]
fn given_distinct_codes_when_claimed_then_each_claims_once() {
    let latch = ExchangeLatch::new();
    let first = AuthorizationCode::new("first");
    let second = AuthorizationCode::new("second");

    assert!(latch.claim(&first));
    assert!(latch.claim(&second));
    assert!(!latch.claim(&first));
    assert!(latch.is_consumed(&second));
}
