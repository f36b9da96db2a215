//! Fixture lifecycle guarantees: teardown on every exit path, idempotence,
//! and configuration failures firing before any session exists.

mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::json;
use support::{FakeLoginApp, test_config};
use wd::wd_runtime::{FakeTransport, Method, WireResponse};
use wd::{Config, Error, Fixture};

#[tokio::test]
async fn teardown_runs_on_normal_return() {
    let app = FakeLoginApp::new();
    let (transport, log) = app.transport();
    let config = test_config();

    Fixture::run_with_transport(&config, transport, |session| {
        Box::pin(async move {
            session.goto("/login").await?;
            Ok(())
        })
    })
    .await
    .unwrap();

    assert_eq!(log.count_matching(Method::Delete, "/session"), 1);
}

#[tokio::test]
async fn teardown_runs_when_the_body_fails() {
    let app = FakeLoginApp::new();
    let (transport, log) = app.transport();
    let config = test_config();

    let result: wd::Result<()> = Fixture::run_with_transport(&config, transport, |_session| {
        Box::pin(async move { Err(Error::AssertionFailed("expected mismatch".into())) })
    })
    .await;

    assert!(matches!(result, Err(Error::AssertionFailed(_))));
    assert_eq!(log.count_matching(Method::Delete, "/session"), 1);
}

#[tokio::test]
async fn teardown_runs_when_the_body_panics() {
    let app = FakeLoginApp::new();
    let (transport, log) = app.transport();
    let config = test_config();

    let handle = tokio::spawn(async move {
        Fixture::run_with_transport::<(), _>(&config, transport, |_session| {
            Box::pin(async move { panic!("boom") })
        })
        .await
    });

    let join = handle.await;
    assert!(join.is_err(), "the body's panic must propagate");
    assert!(join.unwrap_err().is_panic());
    assert_eq!(log.count_matching(Method::Delete, "/session"), 1);
}

#[tokio::test]
async fn teardown_is_idempotent() {
    let app = FakeLoginApp::new();
    let (transport, log) = app.transport();
    let config = test_config();

    let mut fixture = Fixture::setup_with_transport(&config, transport)
        .await
        .unwrap();
    fixture.teardown().await.unwrap();
    fixture.teardown().await.unwrap();

    assert_eq!(log.count_matching(Method::Delete, "/session"), 1);
}

#[tokio::test]
async fn setup_failure_skips_the_body() {
    let transport = FakeTransport::new(|_| {
        Ok(WireResponse::wire_error(
            500,
            "session not created",
            "grid has no capacity",
        ))
    });
    let config = test_config();

    let body_ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&body_ran);

    let result: wd::Result<()> =
        Fixture::run_with_transport(&config, Box::new(transport), move |_session| {
            flag.store(true, Ordering::SeqCst);
            Box::pin(async move { Ok(()) })
        })
        .await;

    assert!(matches!(result, Err(Error::SessionStart(_))));
    assert!(!body_ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn teardown_failure_never_masks_the_body_outcome() {
    let transport = FakeTransport::new(|command| {
        if command.method == Method::Delete {
            return Err(Error::TransportError("connection reset".into()));
        }
        Ok(WireResponse::ok_value(
            json!({"sessionId": "fake-session", "capabilities": {}}),
        ))
    });
    let config = test_config();

    let result = Fixture::run_with_transport(&config, Box::new(transport), |_session| {
        Box::pin(async move { Ok(42) })
    })
    .await;

    // The body's result survives; the teardown failure is only logged.
    assert_eq!(result.unwrap(), 42);
}

#[tokio::test]
async fn missing_browser_name_fails_before_any_session() {
    // host=localhost without browserName: the configuration is rejected
    // outright, so there is nothing to tear down and no wire traffic.
    let err = Config::from_json(r#"{"host": "localhost"}"#).unwrap_err();
    match err {
        Error::Configuration { field, .. } => assert_eq!(field, "browserName"),
        other => panic!("expected configuration error, got {other:?}"),
    }
}
