//! Browser session ownership and lifecycle.

use std::time::Duration;

use wd_protocol::Capabilities;
use wd_runtime::{
    Connection, DriverServer, Error, HttpTransport, Result, Transport, resolve_driver_executable,
};

use crate::config::{Config, Target};
use crate::locator::Locator;

/// An active browser session.
///
/// A `Session` owns the wire connection, the remote session id, and - for
/// local targets - the driver child process. It is created by
/// [`Fixture::setup`](crate::Fixture::setup) and disposed by
/// [`Fixture::teardown`](crate::Fixture::teardown); page objects borrow it
/// for the duration of one test case and never own it.
pub struct Session {
    connection: Connection,
    session_id: Option<String>,
    driver: Option<DriverServer>,
    base_url: String,
    element_timeout: Duration,
    poll_interval: Duration,
}

impl Session {
    /// Starts a session per the resolved configuration target.
    ///
    /// Local targets resolve and spawn the driver binary; remote targets
    /// connect to the configured grid. Launch and new-session failures
    /// surface as [`Error::SessionStart`] (driver resolution failures keep
    /// their more specific variants).
    pub async fn start(config: &Config) -> Result<Self> {
        match &config.target {
            Target::Local {
                driver_path,
                browser,
                browser_version,
            } => {
                let executable =
                    resolve_driver_executable(driver_path.as_deref(), browser.driver_binary())?;
                let driver = DriverServer::launch(&executable).await?;
                let transport = HttpTransport::new(driver.endpoint())?;

                let mut capabilities = Capabilities::for_browser(browser.wire_name());
                capabilities.browser_version = browser_version.clone();

                Self::establish(config, Connection::new(Box::new(transport)), Some(driver), capabilities)
                    .await
            }
            Target::Remote {
                grid_url,
                capabilities,
            } => {
                let transport = HttpTransport::new(grid_url.clone())?;
                Self::establish(
                    config,
                    Connection::new(Box::new(transport)),
                    None,
                    capabilities.clone(),
                )
                .await
            }
        }
    }

    /// Starts a session over an externally supplied transport.
    ///
    /// This is the seam tests use to drive the harness against a fake
    /// remote end; no driver process is involved.
    pub async fn start_with_transport(
        config: &Config,
        transport: Box<dyn Transport>,
    ) -> Result<Self> {
        let capabilities = match &config.target {
            Target::Local {
                browser,
                browser_version,
                ..
            } => {
                let mut capabilities = Capabilities::for_browser(browser.wire_name());
                capabilities.browser_version = browser_version.clone();
                capabilities
            }
            Target::Remote { capabilities, .. } => capabilities.clone(),
        };
        Self::establish(config, Connection::new(transport), None, capabilities).await
    }

    async fn establish(
        config: &Config,
        connection: Connection,
        driver: Option<DriverServer>,
        capabilities: Capabilities,
    ) -> Result<Self> {
        match connection.new_session(capabilities).await {
            Ok(result) => {
                tracing::debug!(
                    target = "wd",
                    session_id = %result.session_id,
                    "session started"
                );
                Ok(Self {
                    connection,
                    session_id: Some(result.session_id),
                    driver,
                    base_url: config.base_url.clone(),
                    element_timeout: config.element_timeout,
                    poll_interval: config.poll_interval,
                })
            }
            Err(e) => {
                // The spawned driver must not outlive a failed start.
                if let Some(driver) = driver {
                    let _ = driver.shutdown().await;
                }
                Err(Error::SessionStart(e.to_string()))
            }
        }
    }

    /// True until [`close`](Self::close) has run.
    pub fn is_active(&self) -> bool {
        self.session_id.is_some()
    }

    pub(crate) fn active_session_id(&self, operation: &str) -> Result<&str> {
        self.session_id
            .as_deref()
            .ok_or_else(|| Error::SessionClosed(operation.to_string()))
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.connection
    }

    pub(crate) fn element_timeout(&self) -> Duration {
        self.element_timeout
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Navigates to `path_or_url`, resolving relative paths against the
    /// configured base URL.
    pub async fn goto(&self, path_or_url: &str) -> Result<()> {
        let session_id = self.active_session_id("navigate")?;
        let url = self.absolute_url(path_or_url);
        tracing::debug!(target = "wd", %url, "navigate");
        self.connection.navigate(session_id, &url).await
    }

    /// Current URL of the top-level browsing context.
    pub async fn current_url(&self) -> Result<String> {
        let session_id = self.active_session_id("read current URL")?;
        self.connection.current_url(session_id).await
    }

    /// Creates a [`Locator`] bound to this session.
    ///
    /// The locator inherits the configured bounded-wait timeout and poll
    /// interval; override per-locator with
    /// [`Locator::with_timeout`](crate::Locator::with_timeout).
    pub fn locator(&self, selector: &str) -> Locator<'_> {
        Locator::new(self, selector)
    }

    /// Releases the session: deletes the remote session and stops the
    /// driver process.
    ///
    /// Idempotent - a second call is a no-op - and safe to call even if the
    /// session never started cleanly. Both halves are always attempted; the
    /// first failure is reported after cleanup finishes.
    pub async fn close(&mut self) -> Result<()> {
        let session_id = self.session_id.take();
        let driver = self.driver.take();
        let mut first_error = None;

        if let Some(session_id) = session_id {
            tracing::debug!(target = "wd", %session_id, "deleting session");
            if let Err(e) = self.connection.delete_session(&session_id).await {
                tracing::warn!(target = "wd", error = %e, "failed to delete remote session");
                first_error = Some(e);
            }
        }

        if let Some(driver) = driver {
            if let Err(e) = driver.shutdown().await {
                tracing::warn!(target = "wd", error = %e, "failed to stop driver process");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn absolute_url(&self, path_or_url: &str) -> String {
        if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            path_or_url.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path_or_url.trim_start_matches('/')
            )
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.session_id.is_some() {
            // The driver child is registered kill_on_drop, so the OS process
            // cannot leak; the remote session record is left to the driver.
            tracing::warn!(target = "wd", "session dropped without teardown");
        }
    }
}
