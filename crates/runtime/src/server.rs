//! Driver process management.
//!
//! Spawns a WebDriver binary (chromedriver, geckodriver) on an ephemeral
//! port and tears it down again. The child is registered with
//! `kill_on_drop`, so even a fixture that never reaches its teardown phase
//! cannot leak a driver process past the test run.

use std::path::Path;
use std::time::Duration;

use tokio::process::{Child, Command};

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::transport::HttpTransport;

/// How long to poll `GET /status` before declaring the launch failed.
const READINESS_TIMEOUT: Duration = Duration::from_secs(10);
const READINESS_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Manages a WebDriver driver child process.
#[derive(Debug)]
pub struct DriverServer {
    process: Child,
    endpoint: String,
    port: u16,
}

impl DriverServer {
    /// Launch the driver executable on an ephemeral local port.
    ///
    /// This will:
    /// 1. Reserve a free port on the loopback interface
    /// 2. Spawn `<executable> --port=<port>`
    /// 3. Poll `GET /status` until the driver reports ready
    ///
    /// # Errors
    ///
    /// Returns [`Error::LaunchFailed`] if the process fails to spawn, exits
    /// immediately, or never becomes ready within the readiness window.
    pub async fn launch(executable: &Path) -> Result<Self> {
        let port = reserve_local_port()?;
        let endpoint = format!("http://127.0.0.1:{port}");

        tracing::debug!(
            target = "wd",
            executable = %executable.display(),
            port,
            "launching driver process"
        );

        let mut child = Command::new(executable)
            .arg(format!("--port={port}"))
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::LaunchFailed(format!("failed to spawn process: {e}")))?;

        // Catch immediate exits (bad flags, port clash) before polling.
        tokio::time::sleep(Duration::from_millis(100)).await;
        match child.try_wait() {
            Ok(Some(status)) => {
                return Err(Error::LaunchFailed(format!(
                    "driver process exited immediately with status: {status}"
                )));
            }
            Ok(None) => {}
            Err(e) => {
                return Err(Error::LaunchFailed(format!(
                    "failed to check process status: {e}"
                )));
            }
        }

        let server = Self {
            process: child,
            endpoint,
            port,
        };
        server.wait_until_ready().await?;
        Ok(server)
    }

    /// HTTP endpoint of the running driver.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn wait_until_ready(&self) -> Result<()> {
        let transport = HttpTransport::new(&self.endpoint)?;
        let connection = Connection::new(Box::new(transport));

        let readiness = async {
            loop {
                match connection.status().await {
                    Ok(status) if status.ready => return Ok(()),
                    Ok(_) | Err(_) => {
                        tokio::time::sleep(READINESS_POLL_INTERVAL).await;
                    }
                }
            }
        };

        match tokio::time::timeout(READINESS_TIMEOUT, readiness).await {
            Ok(result) => result,
            Err(_) => Err(Error::LaunchFailed(format!(
                "driver at {} not ready after {}s",
                self.endpoint,
                READINESS_TIMEOUT.as_secs()
            ))),
        }
    }

    /// Shut the driver process down.
    ///
    /// WebDriver binaries have no graceful-shutdown endpoint worth waiting
    /// on once the session is deleted; killing the child and reaping it is
    /// the supported path.
    pub async fn shutdown(mut self) -> Result<()> {
        self.process
            .kill()
            .await
            .map_err(|e| Error::LaunchFailed(format!("failed to kill driver process: {e}")))?;
        let _ = self.process.wait().await;
        Ok(())
    }
}

/// Reserve a free loopback port by binding and immediately releasing it.
fn reserve_local_port() -> Result<u16> {
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0))?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}
