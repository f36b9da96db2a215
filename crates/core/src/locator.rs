//! Element location with bounded waits.
//!
//! Every lookup polls until the element is found or the timeout elapses;
//! nothing here blocks unboundedly. Timeouts come from the session's
//! configuration and can be overridden per locator.

use std::time::Duration;

use tokio::time::Instant;

use wd_protocol::FindElementParams;
use wd_runtime::{Error, Result};

use crate::session::Session;

/// A way to find an element within the bound session, by CSS selector.
///
/// Holds a non-owning reference to the [`Session`]; its lifetime is bounded
/// by the test case that created it.
pub struct Locator<'a> {
    session: &'a Session,
    selector: String,
    timeout: Duration,
    poll_interval: Duration,
}

impl<'a> Locator<'a> {
    pub(crate) fn new(session: &'a Session, selector: &str) -> Self {
        Self {
            session,
            selector: selector.to_string(),
            timeout: session.element_timeout(),
            poll_interval: session.poll_interval(),
        }
    }

    /// The CSS selector this locator queries.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Overrides the bounded-wait ceiling for this locator.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the poll interval for this locator.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Clicks the element.
    pub async fn click(&self) -> Result<()> {
        let session_id = self.session.active_session_id("click")?;
        let element_id = self.resolve().await?;
        self.session
            .connection()
            .element_click(session_id, &element_id)
            .await
    }

    /// Replaces the element's value with `text`.
    pub async fn fill(&self, text: &str) -> Result<()> {
        let session_id = self.session.active_session_id("fill")?;
        let element_id = self.resolve().await?;
        let connection = self.session.connection();
        connection.element_clear(session_id, &element_id).await?;
        connection
            .element_send_keys(session_id, &element_id, text)
            .await
    }

    /// Rendered text of the element.
    pub async fn text_content(&self) -> Result<String> {
        let session_id = self.session.active_session_id("read text")?;
        let element_id = self.resolve().await?;
        self.session
            .connection()
            .element_text(session_id, &element_id)
            .await
    }

    /// Single-probe visibility check.
    ///
    /// Semantics are explicit and consistent across the harness:
    /// - element absent from the DOM: `Ok(false)` - never an error
    /// - element present but not displayed: `Ok(false)`
    /// - element present and displayed: `Ok(true)`
    ///
    /// Transport and protocol faults still surface as errors; only the
    /// no-such-element case is translated.
    pub async fn is_visible(&self) -> Result<bool> {
        let session_id = self.session.active_session_id("check visibility")?;
        let connection = self.session.connection();
        match connection
            .find_element(session_id, FindElementParams::css(&self.selector))
            .await
        {
            Ok(element_id) => connection.element_displayed(session_id, &element_id).await,
            Err(e) if e.is_no_such_element() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Bounded wait until the element is present and displayed.
    ///
    /// # Errors
    ///
    /// [`Error::ElementNotFound`] if the element never appears within the
    /// timeout; [`Error::Timeout`] if it appears but never becomes
    /// displayed.
    pub async fn wait_until_visible(&self) -> Result<()> {
        let started = Instant::now();
        let mut found = false;
        loop {
            if self.is_visible().await? {
                return Ok(());
            }
            // Remember whether the element at least existed, to report the
            // right failure below.
            if !found {
                found = self.exists().await?;
            }
            if started.elapsed() >= self.timeout {
                return Err(if found {
                    Error::Timeout {
                        ms: self.timeout.as_millis() as u64,
                        condition: format!("element '{}' to become visible", self.selector),
                    }
                } else {
                    self.not_found()
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Single-probe existence check (DOM presence, ignoring displayedness).
    pub async fn exists(&self) -> Result<bool> {
        let session_id = self.session.active_session_id("check existence")?;
        match self
            .session
            .connection()
            .find_element(session_id, FindElementParams::css(&self.selector))
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_no_such_element() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Resolves the selector to an element id, polling until found or the
    /// timeout elapses.
    async fn resolve(&self) -> Result<String> {
        let session_id = self.session.active_session_id("locate element")?;
        let connection = self.session.connection();
        let started = Instant::now();
        loop {
            match connection
                .find_element(session_id, FindElementParams::css(&self.selector))
                .await
            {
                Ok(element_id) => return Ok(element_id),
                Err(e) if e.is_no_such_element() => {
                    if started.elapsed() >= self.timeout {
                        return Err(self.not_found());
                    }
                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn not_found(&self) -> Error {
        Error::ElementNotFound {
            selector: self.selector.clone(),
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }
}
