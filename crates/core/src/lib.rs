//! wd: A browser-UI test harness over the WebDriver protocol.
//!
//! This crate provides the fixture and page-object layers that browser test
//! suites are built from: a [`Fixture`] owns one browser [`Session`]'s
//! lifecycle (create before the test body, dispose after it, on every exit
//! path), and page objects expose intention-revealing operations over that
//! session while hiding locators and DOM details.
//!
//! # Examples
//!
//! ## A complete login check
//!
//! ```ignore
//! use wd::{Config, Fixture, pages::LoginPage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("wd.json".as_ref())?;
//!
//!     let succeeded = Fixture::run(&config, |session| {
//!         Box::pin(async move {
//!             let mut login = LoginPage::new(session);
//!             login.visit().await?;
//!             login.login_with("tomsmith", "SuperSecretPassword!").await?;
//!             login.is_success_message_present().await
//!         })
//!     })
//!     .await?;
//!
//!     assert!(succeeded);
//!     Ok(())
//! }
//! ```
//!
//! ## Explicit fixture lifecycle
//!
//! ```ignore
//! use wd::{Config, Fixture};
//!
//! # #[tokio::main]
//! # async fn main() -> wd::Result<()> {
//! # let config = Config::local(wd::BrowserKind::Chrome);
//! let mut fixture = Fixture::setup(&config).await?;
//! let session = fixture.session();
//! session.goto("/login").await?;
//!
//! // ... drive the page ...
//!
//! fixture.teardown().await?; // idempotent; safe to call twice
//! # Ok(())
//! # }
//! ```
//!
//! ## Assertions (expect API)
//!
//! ```ignore
//! use wd::expect;
//!
//! # async fn demo(session: &wd::Session) -> wd::Result<()> {
//! expect(session.locator(".flash.success")).to_be_visible().await?;
//! expect(session.locator(".flash.error")).not().to_be_visible().await?;
//! # Ok(())
//! # }
//! ```

mod assertions;
mod config;
mod fixture;
mod locator;
mod session;

pub mod pages;

pub use assertions::{Expectation, expect};
pub use config::{BrowserKind, Config, DEFAULT_BASE_URL, RawConfig, Target};
pub use fixture::Fixture;
pub use locator::Locator;
pub use session::Session;

/// Default timeout in milliseconds for element-lookup operations.
pub const DEFAULT_TIMEOUT_MS: u64 = wd_protocol::DEFAULT_TIMEOUT_MS;

// Re-export the protocol and runtime layers for embedders and tests
pub use wd_protocol;
pub use wd_runtime;

// Re-export Error and Result from wd-runtime
pub use wd_runtime::{Error, Result};
