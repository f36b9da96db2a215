// Assertions - Auto-retry assertions for testing
//
// Provides an expect() API with auto-retry: an assertion keeps re-probing
// until it passes or its timeout elapses, so tests don't race page loads.

use std::time::Duration;

use tokio::time::Instant;

use wd_runtime::{Error, Result};

use crate::locator::Locator;

/// Default timeout for assertions.
const DEFAULT_ASSERTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Default polling interval for assertions.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Creates an expectation for a locator with auto-retry behavior.
///
/// ```ignore
/// expect(session.locator(".flash.success")).to_be_visible().await?;
/// expect(session.locator(".flash.error")).not().to_be_visible().await?;
/// ```
pub fn expect(locator: Locator<'_>) -> Expectation<'_> {
    Expectation::new(locator)
}

/// Wraps a locator and provides assertion methods with auto-retry.
pub struct Expectation<'a> {
    locator: Locator<'a>,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

impl<'a> Expectation<'a> {
    fn new(locator: Locator<'a>) -> Self {
        Self {
            locator,
            timeout: DEFAULT_ASSERTION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            negate: false,
        }
    }

    /// Sets a custom timeout for this assertion.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom poll interval for this assertion.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Asserts that the element is visible (present and displayed).
    pub async fn to_be_visible(self) -> Result<()> {
        let Self {
            locator,
            timeout,
            poll_interval,
            negate,
        } = self;
        // Probes are single-shot; the retry loop owns the waiting.
        let locator = locator.with_timeout(Duration::ZERO);

        let started = Instant::now();
        loop {
            let visible = locator.is_visible().await?;
            if visible != negate {
                return Ok(());
            }
            if started.elapsed() >= timeout {
                let expectation = if negate { "to be hidden" } else { "to be visible" };
                return Err(Error::AssertionFailed(format!(
                    "expected element '{}' {expectation} after {}ms",
                    locator.selector(),
                    timeout.as_millis()
                )));
            }
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Asserts that the element is hidden or absent.
    pub async fn to_be_hidden(self) -> Result<()> {
        self.not().to_be_visible().await
    }

    /// Asserts that the element's trimmed text equals `expected`.
    ///
    /// An absent element counts as a failing probe and keeps being retried,
    /// so the assertion tolerates the element appearing late.
    pub async fn to_have_text(self, expected: &str) -> Result<()> {
        let Self {
            locator,
            timeout,
            poll_interval,
            negate,
        } = self;
        let locator = locator.with_timeout(Duration::ZERO);

        let started = Instant::now();
        loop {
            let text = match locator.text_content().await {
                Ok(text) => Some(text),
                Err(e) if e.is_element_not_found() => None,
                Err(e) => return Err(e),
            };
            let matches = text
                .as_deref()
                .map(|t| t.trim() == expected)
                .unwrap_or(false);
            if matches != negate {
                return Ok(());
            }
            if started.elapsed() >= timeout {
                let qualifier = if negate { "not " } else { "" };
                return Err(Error::AssertionFailed(format!(
                    "expected element '{}' {qualifier}to have text \"{expected}\" after {}ms (last saw {:?})",
                    locator.selector(),
                    timeout.as_millis(),
                    text
                )));
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}
