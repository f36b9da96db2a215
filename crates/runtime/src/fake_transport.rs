//! Fake transport for unit testing the wire client and harness logic.
//!
//! Provides an in-memory transport so session and page-object code can be
//! exercised without a driver binary or a browser. Responses come from a
//! caller-supplied handler; every executed command is recorded for
//! inspection.
//!
//! # Example
//!
//! ```ignore
//! let fake = FakeTransport::new(|command| {
//!     Ok(match (command.method, command.path.as_str()) {
//!         (Method::Post, "/session") => {
//!             WireResponse::ok_value(json!({"sessionId": "s1", "capabilities": {}}))
//!         }
//!         _ => WireResponse::ok_value(Value::Null),
//!     })
//! });
//! let connection = Connection::new(Box::new(fake));
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::transport::{Method, Transport, WireCommand, WireResponse};

type Handler = dyn Fn(&WireCommand) -> Result<WireResponse> + Send + Sync;

/// In-memory transport with scripted responses and a recorded command log.
pub struct FakeTransport {
    handler: Box<Handler>,
    log: Arc<Mutex<Vec<WireCommand>>>,
}

impl FakeTransport {
    /// Creates a fake transport backed by `handler`.
    pub fn new(handler: impl Fn(&WireCommand) -> Result<WireResponse> + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a handle to the command log that stays valid after the
    /// transport has been boxed and handed to a connection.
    pub fn log_handle(&self) -> CommandLog {
        CommandLog {
            log: Arc::clone(&self.log),
        }
    }
}

impl Transport for FakeTransport {
    fn execute(
        &self,
        command: WireCommand,
    ) -> Pin<Box<dyn Future<Output = Result<WireResponse>> + Send + '_>> {
        self.log.lock().push(command.clone());
        let result = (self.handler)(&command);
        Box::pin(async move { result })
    }
}

/// Shared view of the commands a [`FakeTransport`] has executed.
#[derive(Clone)]
pub struct CommandLog {
    log: Arc<Mutex<Vec<WireCommand>>>,
}

impl CommandLog {
    /// All commands executed so far, in order.
    pub fn commands(&self) -> Vec<WireCommand> {
        self.log.lock().clone()
    }

    /// Number of commands matching a method and path fragment.
    pub fn count_matching(&self, method: Method, path_fragment: &str) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|c| c.method == method && c.path.contains(path_fragment))
            .count()
    }

    /// Clears the log.
    pub fn clear(&self) {
        self.log.lock().clear();
    }
}
