//! Test fixture: session lifecycle around a test body.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;

use futures_util::FutureExt;

use wd_runtime::{Result, Transport};

use crate::config::Config;
use crate::session::Session;

/// Owns one browser [`Session`] for the duration of one test case.
///
/// The fixture is the only owner of the session; page objects borrow it.
/// [`setup`](Fixture::setup) creates the session, [`teardown`](Fixture::teardown)
/// disposes it, and [`run`](Fixture::run) wraps both around a test body with
/// a teardown guarantee on every exit path.
pub struct Fixture {
    session: Session,
}

impl Fixture {
    /// Starts a session per `config` and wraps it in a fixture.
    ///
    /// Configuration must already be resolved - missing or unrecognized
    /// fields fail at [`Config`](crate::Config) resolution, before this is
    /// reachable. If session start fails, no fixture is produced and the
    /// test body must not run.
    pub async fn setup(config: &Config) -> Result<Self> {
        let session = Session::start(config).await?;
        Ok(Self { session })
    }

    /// Like [`setup`](Fixture::setup), over an externally supplied
    /// transport. The seam tests use to avoid spawning a browser.
    pub async fn setup_with_transport(
        config: &Config,
        transport: Box<dyn Transport>,
    ) -> Result<Self> {
        let session = Session::start_with_transport(config, transport).await?;
        Ok(Self { session })
    }

    /// The owned session. Valid for the lifetime of the fixture; after
    /// teardown, operations on it report `SessionClosed`.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Releases the session. Idempotent: the second and later calls are
    /// no-ops, and it is safe to call after a partial startup.
    pub async fn teardown(&mut self) -> Result<()> {
        self.session.close().await
    }

    /// Runs `body` between setup and a guaranteed teardown.
    ///
    /// Teardown executes on every exit path: normal return, `Err`, or
    /// panic (the panic is caught, teardown runs, then the panic resumes).
    /// A teardown failure is logged and never masks the body's outcome.
    ///
    /// ```ignore
    /// let succeeded = Fixture::run(&config, |session| {
    ///     Box::pin(async move {
    ///         let mut login = LoginPage::new(session);
    ///         login.visit().await?;
    ///         login.login_with("tomsmith", "SuperSecretPassword!").await?;
    ///         login.is_success_message_present().await
    ///     })
    /// })
    /// .await?;
    /// ```
    pub async fn run<T, F>(config: &Config, body: F) -> Result<T>
    where
        F: for<'s> FnOnce(&'s Session) -> Pin<Box<dyn Future<Output = Result<T>> + Send + 's>>,
    {
        let fixture = Self::setup(config).await?;
        Self::run_body(fixture, body).await
    }

    /// [`run`](Fixture::run) over an externally supplied transport.
    pub async fn run_with_transport<T, F>(
        config: &Config,
        transport: Box<dyn Transport>,
        body: F,
    ) -> Result<T>
    where
        F: for<'s> FnOnce(&'s Session) -> Pin<Box<dyn Future<Output = Result<T>> + Send + 's>>,
    {
        let fixture = Self::setup_with_transport(config, transport).await?;
        Self::run_body(fixture, body).await
    }

    async fn run_body<T, F>(mut fixture: Fixture, body: F) -> Result<T>
    where
        F: for<'s> FnOnce(&'s Session) -> Pin<Box<dyn Future<Output = Result<T>> + Send + 's>>,
    {
        let outcome = AssertUnwindSafe(body(&fixture.session)).catch_unwind().await;

        if let Err(e) = fixture.teardown().await {
            // Never mask the body's outcome with a teardown failure.
            tracing::warn!(target = "wd", error = %e, "teardown failed");
        }

        match outcome {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}
