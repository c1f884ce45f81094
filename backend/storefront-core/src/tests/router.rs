// Unit tests for page names and view gating

use crate::preferences::MemoryPreferenceStore;
use crate::router::{Page, View, ViewRouter};
use crate::session::SessionState;

use std::sync::Arc;

#[test]
fn given_page_names_when_parsed_then_round_trip_case_insensitively() {
    for page in Page::ALL {
        assert_eq!(page.to_string().parse::<Page>().expect("parse"), page);
    }
    assert_eq!("popular".parse::<Page>().expect("parse"), Page::Popular);

    let err = "Checkout".parse::<Page>().expect_err("unknown page");
    assert!(err.to_string().contains("Unknown page"));
}

/// **VALUE**: Nothing page-specific renders before the session is known, and
/// purchase history needs a login.
///
/// **BUG THIS CATCHES**: Would catch rendering the Recent page (and firing its
/// request) while still `Unknown`.
#[test]
fn given_session_states_when_viewing_then_gates_apply() {
    let router = ViewRouter::new(Arc::new(MemoryPreferenceStore::new()));

    router.select(Page::Recent);
    assert_eq!(router.view(SessionState::Unknown), View::Loading);
    assert_eq!(router.view(SessionState::Unauthorized), View::RecentLoginRequired);
    assert_eq!(router.view(SessionState::Authorized), View::Recent);

    router.select(Page::Popular);
    assert_eq!(router.view(SessionState::Unauthorized), View::Popular);
}
