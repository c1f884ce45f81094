use crate::helpers::{
    address_bar, base_url, controller, delayed, mount_logout, mount_token, mount_validate,
    token_ok, valid, TOKEN_PATH, VALIDATE_PATH,
};

use storefront_core::api::StorefrontClient;
use storefront_core::error::SessionError;
use storefront_core::navigation::Navigator;
use storefront_core::session::{IdentityProvider, SessionController, SessionState};

use std::time::Duration;

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies a fresh authorization code is exchanged once and the
/// session becomes authorized.
///
/// **WHY THIS MATTERS**: Codes are single use. A second submission is
/// rejected by the provider and would flip a good session to unauthorized.
///
/// **BUG THIS CATCHES**: Would catch the one-shot guard being checked after
/// the request instead of before it.
#[tokio::test]
async fn given_code_when_resolved_twice_then_exchanges_once() {
    // GIVEN: The address carries a code and the backend accepts it
    let server = MockServer::start().await;
    mount_token(&server, token_ok(), 1).await;
    mount_validate(&server, valid(true), 0).await;
    let bar = address_bar("code=auth-code-1");
    let session = controller(&server, &bar);

    // WHEN: Resolution is requested twice
    let first = session.resolve().await;
    let second = session.resolve().await;

    // THEN: One exchange, both calls see Authorized
    assert_eq!(first, SessionState::Authorized);
    assert_eq!(second, SessionState::Authorized);
}

#[tokio::test]
async fn given_code_when_resolved_concurrently_then_exchanges_once() {
    let server = MockServer::start().await;
    mount_token(&server, delayed(token_ok()), 1).await;
    let bar = address_bar("code=auth-code-2");
    let session = controller(&server, &bar);

    let (first, second) = tokio::join!(session.resolve(), session.resolve());

    // The second call returns whatever was resolved so far
    assert_eq!(first, SessionState::Authorized);
    assert_eq!(second, SessionState::Unknown);
    assert_eq!(session.state().await, SessionState::Authorized);
}

/// **VALUE**: The code is gone from the address after a successful exchange.
///
/// **BUG THIS CATCHES**: Would catch a navigation (instead of a history
/// replacement) or leaving the code for a bookmark to capture.
#[tokio::test]
async fn given_successful_exchange_when_resolved_then_code_stripped_without_navigation() {
    let server = MockServer::start().await;
    mount_token(&server, token_ok(), 1).await;
    let bar = address_bar("code=auth-code-3&ref=mail");
    let session = controller(&server, &bar);

    session.resolve().await;

    let address = bar.current_url();
    assert!(!address.as_str().contains("code="), "code left in {address}");
    assert_eq!(address.as_str(), "https://shop.test/?ref=mail");
    assert!(bar.navigations().is_empty());
}

#[tokio::test]
async fn given_exchange_request_when_sent_then_posts_form_with_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code-4"))
        .and(body_string_contains("redirect_uri=https%3A%2F%2Fshop.test%2F"))
        .respond_with(token_ok())
        .expect(1)
        .mount(&server)
        .await;
    let bar = address_bar("code=auth-code-4");

    let state = controller(&server, &bar).resolve().await;

    assert_eq!(state, SessionState::Authorized);
}

/// **VALUE**: A rejected code fails closed and is never retried.
#[tokio::test]
async fn given_rejected_code_when_resolved_then_unauthorized_and_code_stripped() {
    let server = MockServer::start().await;
    mount_token(&server, ResponseTemplate::new(400), 1).await;
    mount_validate(&server, valid(true), 0).await;
    let bar = address_bar("code=bad-code");
    let session = controller(&server, &bar);

    let state = session.resolve().await;

    assert_eq!(state, SessionState::Unauthorized);
    assert_eq!(bar.current_url(), base_url());
}

#[tokio::test]
async fn given_token_response_without_access_token_when_resolved_then_unauthorized() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "token": "x" })),
        1,
    )
    .await;
    let bar = address_bar("code=auth-code-5");

    let state = controller(&server, &bar).resolve().await;

    assert_eq!(state, SessionState::Unauthorized);
}

/// **VALUE**: A reload that still shows an already-exchanged code validates
/// the cookie instead of submitting the code again.
///
/// **BUG THIS CATCHES**: Would catch the code latch being reset together with
/// the per-load resolution latch.
#[tokio::test]
async fn given_consumed_code_when_page_reloaded_then_validates_instead() {
    // GIVEN: A code already exchanged in this tab
    let server = MockServer::start().await;
    mount_token(&server, token_ok(), 1).await;
    mount_validate(&server, valid(true), 1).await;
    let bar = address_bar("code=auth-code-6");
    let session = controller(&server, &bar);
    session.resolve().await;

    // WHEN: The page is reloaded with the same code in the address
    bar.set_current(
        "https://shop.test/?code=auth-code-6"
            .parse()
            .expect("valid url"),
    );
    session.begin_page_load().await;
    assert_eq!(session.state().await, SessionState::Unknown);
    let state = session.resolve().await;

    // THEN: Validation decided the state and the code was stripped
    assert_eq!(state, SessionState::Authorized);
    assert_eq!(bar.current_url(), base_url());
    assert_eq!(session.exchange_latch().consumed_count(), 1);
}

#[tokio::test]
async fn given_no_code_and_valid_cookie_when_resolved_then_authorized() {
    let server = MockServer::start().await;
    mount_token(&server, token_ok(), 0).await;
    mount_validate(&server, valid(true), 1).await;
    mount_logout(&server, 200, 0).await;
    let bar = address_bar("");

    let state = controller(&server, &bar).resolve().await;

    assert_eq!(state, SessionState::Authorized);
}

/// **VALUE**: Verifies fail-closed handling of an invalid session.
///
/// **WHY THIS MATTERS**: A stale cookie that is not terminated keeps
/// producing "invalid" on every page load.
///
/// **BUG THIS CATCHES**: Would catch:
/// - Missing logout call after `valid: false`
/// - Navigating away during the background logout
#[tokio::test]
async fn given_invalid_cookie_when_resolved_then_unauthorized_and_logout_without_navigation() {
    let server = MockServer::start().await;
    mount_validate(&server, valid(false), 1).await;
    mount_logout(&server, 200, 1).await;
    let bar = address_bar("");

    let state = controller(&server, &bar).resolve().await;

    assert_eq!(state, SessionState::Unauthorized);
    assert!(bar.navigations().is_empty());
}

#[tokio::test]
async fn given_validation_server_error_when_resolved_then_unauthorized_and_logout_called() {
    let server = MockServer::start().await;
    mount_validate(&server, ResponseTemplate::new(500), 1).await;
    mount_logout(&server, 200, 1).await;
    let bar = address_bar("");

    let state = controller(&server, &bar).resolve().await;

    assert_eq!(state, SessionState::Unauthorized);
}

#[tokio::test]
async fn given_validation_schema_mismatch_when_resolved_then_unauthorized() {
    let server = MockServer::start().await;
    mount_validate(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "valid": "yes" })),
        1,
    )
    .await;
    mount_logout(&server, 200, 1).await;
    let bar = address_bar("");

    let state = controller(&server, &bar).resolve().await;

    assert_eq!(state, SessionState::Unauthorized);
}

#[tokio::test]
async fn given_unreachable_backend_when_resolved_then_unauthorized() {
    // Nothing listens on the discard port locally
    let bar = address_bar("");
    let client = StorefrontClient::new("http://127.0.0.1:9".parse().expect("valid url"), Duration::from_secs(2))
        .expect("client");
    let session = SessionController::new(client, bar.clone(), base_url());

    let state = session.resolve().await;

    assert_eq!(state, SessionState::Unauthorized);
}

/// **VALUE**: A failed logout leaves the user logged in so they can retry.
///
/// **BUG THIS CATCHES**: Would catch flipping to Unauthorized (or reloading)
/// before the backend confirmed the logout.
#[tokio::test]
async fn given_authorized_when_logout_fails_then_state_unchanged_and_error_returned() {
    let server = MockServer::start().await;
    mount_validate(&server, valid(true), 1).await;
    mount_logout(&server, 503, 1).await;
    let bar = address_bar("");
    let session = controller(&server, &bar);
    session.resolve().await;

    let result = session.logout().await;

    assert!(matches!(result, Err(SessionError::Logout { .. })));
    assert_eq!(session.state().await, SessionState::Authorized);
    assert!(bar.navigations().is_empty());
}

#[tokio::test]
async fn given_authorized_when_logout_succeeds_then_reloads_with_marker() {
    let server = MockServer::start().await;
    mount_validate(&server, valid(true), 1).await;
    mount_logout(&server, 200, 1).await;
    let bar = address_bar("");
    let session = controller(&server, &bar);
    session.resolve().await;

    session.logout().await.expect("logout should succeed");

    assert_eq!(session.state().await, SessionState::Unauthorized);
    assert_eq!(
        bar.last_navigation().map(|url| url.to_string()),
        Some("https://shop.test/?logout=true".to_string())
    );
}

#[tokio::test]
async fn given_unauthorized_when_logout_requested_then_rejected_without_call() {
    let server = MockServer::start().await;
    mount_validate(&server, valid(false), 1).await;
    // Only the background termination after the invalid validation
    mount_logout(&server, 200, 1).await;
    let bar = address_bar("");
    let session = controller(&server, &bar);
    session.resolve().await;

    let result = session.logout().await;

    assert!(matches!(
        result,
        Err(SessionError::NotAuthorized {
            state: SessionState::Unauthorized,
            ..
        })
    ));
}

#[tokio::test]
async fn given_logout_marker_when_resolved_then_recognised_and_stripped() {
    let server = MockServer::start().await;
    mount_validate(&server, valid(false), 1).await;
    mount_logout(&server, 200, 1).await;
    let bar = address_bar("logout=true");
    let session = controller(&server, &bar);
    assert!(!session.logged_out());

    session.resolve().await;

    assert!(session.logged_out());
    assert_eq!(bar.current_url(), base_url());
}

/// **VALUE**: Results arriving after unmount are dropped.
///
/// **BUG THIS CATCHES**: Would catch a late validation writing state into a
/// storefront that is already gone.
#[tokio::test]
async fn given_unmount_before_result_when_validation_lands_then_state_stays_unknown() {
    let server = MockServer::start().await;
    mount_validate(&server, delayed(valid(false)), 1).await;
    mount_logout(&server, 200, 0).await;
    let bar = address_bar("");
    let session = controller(&server, &bar);

    let (state, _) = tokio::join!(session.resolve(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.unmount();
    });

    assert_eq!(state, SessionState::Unknown);
    assert_eq!(session.state().await, SessionState::Unknown);
}

#[tokio::test]
async fn given_authorized_when_revalidation_finds_invalid_then_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VALIDATE_PATH))
        .respond_with(valid(true))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_validate(&server, valid(false), 1).await;
    mount_logout(&server, 200, 1).await;
    let bar = address_bar("");
    let session = controller(&server, &bar);
    assert_eq!(session.resolve().await, SessionState::Authorized);

    let state = session.revalidate().await;

    assert_eq!(state, SessionState::Unauthorized);
    assert!(bar.navigations().is_empty());
}

#[tokio::test]
async fn given_unknown_state_when_revalidated_then_no_call() {
    let server = MockServer::start().await;
    mount_validate(&server, valid(true), 0).await;
    let bar = address_bar("");
    let session = controller(&server, &bar);

    assert_eq!(session.revalidate().await, SessionState::Unknown);
}

/// **VALUE**: Re-validation in flight must not undo an explicit logout.
#[tokio::test]
async fn given_revalidation_in_flight_when_logout_succeeds_then_late_result_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VALIDATE_PATH))
        .respond_with(valid(true))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_validate(&server, delayed(valid(true)), 1).await;
    mount_logout(&server, 200, 1).await;
    let bar = address_bar("");
    let session = controller(&server, &bar);
    session.resolve().await;

    let (revalidated, logout) = tokio::join!(session.revalidate(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.logout().await
    });

    assert!(logout.is_ok());
    assert_eq!(revalidated, SessionState::Unauthorized);
    assert_eq!(session.state().await, SessionState::Unauthorized);
}

#[tokio::test]
async fn given_provider_when_login_begins_then_navigates_to_authorize() {
    let server = MockServer::start().await;
    let bar = address_bar("");
    let session = controller(&server, &bar);

    let url = session
        .begin_login(IdentityProvider::SignInWithApple)
        .expect("login url");

    assert_eq!(bar.last_navigation(), Some(url.clone()));
    assert!(url.as_str().starts_with(&format!("{}/oauth2/authorize?", server.uri())));
    assert!(url.as_str().contains("identity_provider=SignInWithApple"));
}

#[test]
fn given_provider_names_when_parsed_then_known_providers_accepted() {
    assert_eq!(
        "google".parse::<IdentityProvider>().expect("parse"),
        IdentityProvider::Google
    );
    assert!("MySpace".parse::<IdentityProvider>().is_err());
}
