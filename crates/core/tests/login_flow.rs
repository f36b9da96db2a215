//! Login flow scenarios driven through the page object against the fake
//! application - no browser involved.

mod support;

use std::time::Duration;

use support::{FAILURE_TEXT, FakeLoginApp, SUCCESS_TEXT, VALID_PASSWORD, VALID_USERNAME, test_config};
use wd::pages::{LoginPage, PageState};
use wd::wd_runtime::Method;
use wd::{Error, Fixture, expect};

#[tokio::test]
async fn valid_credentials_show_success_message() {
    let app = FakeLoginApp::new();
    let (transport, _log) = app.transport();
    let config = test_config();

    Fixture::run_with_transport(&config, transport, |session| {
        Box::pin(async move {
            let mut login = LoginPage::new(session);
            login.visit().await?;
            login.login_with(VALID_USERNAME, VALID_PASSWORD).await?;

            assert!(login.is_success_message_present().await?);
            assert!(!login.is_failure_message_present().await?);
            Ok(())
        })
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn invalid_credentials_show_failure_message() {
    let app = FakeLoginApp::new();
    let (transport, _log) = app.transport();
    let config = test_config();

    Fixture::run_with_transport(&config, transport, |session| {
        Box::pin(async move {
            let mut login = LoginPage::new(session);
            login.visit().await?;
            login.login_with(VALID_USERNAME, "bad password").await?;

            assert!(login.is_failure_message_present().await?);
            assert!(!login.is_success_message_present().await?);
            Ok(())
        })
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn page_state_advances_in_order() {
    let app = FakeLoginApp::new();
    let (transport, _log) = app.transport();
    let config = test_config();

    Fixture::run_with_transport(&config, transport, |session| {
        Box::pin(async move {
            let mut login = LoginPage::new(session);
            assert_eq!(login.state(), PageState::Initial);

            login.visit().await?;
            assert_eq!(login.state(), PageState::Initial);

            login.login_with(VALID_USERNAME, VALID_PASSWORD).await?;
            assert_eq!(login.state(), PageState::Submitted);

            login.is_success_message_present().await?;
            assert_eq!(login.state(), PageState::ResultShown);
            Ok(())
        })
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn empty_credentials_are_rejected_before_touching_the_page() {
    let app = FakeLoginApp::new();
    let (transport, log) = app.transport();
    let config = test_config();

    Fixture::run_with_transport(&config, transport, |session| {
        Box::pin(async move {
            let mut login = LoginPage::new(session);
            login.visit().await?;

            let err = login.login_with("", VALID_PASSWORD).await.unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));

            let err = login.login_with(VALID_USERNAME, "").await.unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
            Ok(())
        })
    })
    .await
    .unwrap();

    // Neither rejected attempt reached the form.
    assert_eq!(log.count_matching(Method::Post, "/value"), 0);
    assert_eq!(log.count_matching(Method::Post, "/click"), 0);
}

#[tokio::test]
async fn presence_checks_return_false_instead_of_throwing() {
    let app = FakeLoginApp::new();
    let (transport, _log) = app.transport();
    let config = test_config();

    Fixture::run_with_transport(&config, transport, |session| {
        Box::pin(async move {
            let mut login = LoginPage::new(session);
            login.visit().await?;

            // Nothing submitted yet: both status messages are absent, and
            // neither check is allowed to surface ElementNotFound.
            assert!(!login.is_success_message_present().await?);
            assert!(!login.is_failure_message_present().await?);
            Ok(())
        })
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn hidden_elements_are_present_but_not_visible() {
    let app = FakeLoginApp::new();
    let (transport, _log) = app.transport();
    let config = test_config();

    Fixture::run_with_transport(&config, transport, |session| {
        Box::pin(async move {
            session.goto("/login").await?;

            let hidden = session.locator("#hidden-banner");
            assert!(hidden.exists().await?);
            assert!(!hidden.is_visible().await?);

            // Bounded wait on a present-but-hidden element reports a
            // visibility timeout, not element-not-found.
            let err = hidden.wait_until_visible().await.unwrap_err();
            assert!(matches!(err, Error::Timeout { .. }));

            let absent = session.locator("#no-such-thing");
            assert!(!absent.exists().await?);
            let err = absent.wait_until_visible().await.unwrap_err();
            assert!(matches!(err, Error::ElementNotFound { .. }));
            Ok(())
        })
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn expect_api_retries_and_reports() {
    let app = FakeLoginApp::new();
    let (transport, _log) = app.transport();
    let config = test_config();

    Fixture::run_with_transport(&config, transport, |session| {
        Box::pin(async move {
            let mut login = LoginPage::new(session);
            login.visit().await?;
            login.login_with(VALID_USERNAME, VALID_PASSWORD).await?;

            expect(session.locator(".flash.success"))
                .to_be_visible()
                .await?;
            expect(session.locator(".flash.success"))
                .to_have_text(SUCCESS_TEXT)
                .await?;
            expect(session.locator(".flash.error")).to_be_hidden().await?;

            // And a failing assertion surfaces as AssertionFailed.
            let err = expect(session.locator(".flash.error"))
                .with_timeout(Duration::from_millis(50))
                .with_poll_interval(Duration::from_millis(10))
                .to_be_visible()
                .await
                .unwrap_err();
            assert!(matches!(err, Error::AssertionFailed(_)));
            Ok(())
        })
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn failure_message_text_matches() {
    let app = FakeLoginApp::new();
    let (transport, _log) = app.transport();
    let config = test_config();

    Fixture::run_with_transport(&config, transport, |session| {
        Box::pin(async move {
            let mut login = LoginPage::new(session);
            login.visit().await?;
            login.login_with("tomsmith", "bad password").await?;

            expect(session.locator(".flash.error"))
                .to_have_text(FAILURE_TEXT)
                .await?;
            Ok(())
        })
    })
    .await
    .unwrap();
}
