// Copyright 2024 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// LoginPage - page object for the login form of the application under test.

use wd_runtime::{Error, Result};

use crate::session::Session;

/// Route of the login page, relative to the configured base URL.
pub const LOGIN_PATH: &str = "/login";

const USERNAME_INPUT: &str = "#username";
const PASSWORD_INPUT: &str = "#password";
const SUBMIT_BUTTON: &str = "button[type='submit']";
const SUCCESS_MESSAGE: &str = ".flash.success";
const FAILURE_MESSAGE: &str = ".flash.error";

/// Where the login flow stands, as far as this page object has driven it.
///
/// The browser holds the real state; this enum mirrors it explicitly so
/// ordering assumptions are testable without a live browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// Navigated (or not yet navigated); no form submitted.
    #[default]
    Initial,
    /// Credentials submitted; result not yet observed.
    Submitted,
    /// A status-message observation has been made.
    ResultShown,
}

/// Page object for the login page.
///
/// Borrows the session; constructing one performs no I/O. Call
/// [`visit`](LoginPage::visit) to navigate.
pub struct LoginPage<'a> {
    session: &'a Session,
    state: PageState,
}

impl<'a> LoginPage<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            state: PageState::Initial,
        }
    }

    /// Navigates to the login page.
    pub async fn visit(&mut self) -> Result<()> {
        self.session.goto(LOGIN_PATH).await?;
        self.state = PageState::Initial;
        Ok(())
    }

    /// Fills the credential fields and submits the form.
    ///
    /// Both credentials must be non-empty. Missing controls (page not
    /// loaded, markup changed) surface as
    /// [`Error::ElementNotFound`](wd_runtime::Error::ElementNotFound) after
    /// the bounded wait.
    pub async fn login_with(&mut self, username: &str, password: &str) -> Result<()> {
        if username.is_empty() {
            return Err(Error::InvalidArgument("username must be non-empty".into()));
        }
        if password.is_empty() {
            return Err(Error::InvalidArgument("password must be non-empty".into()));
        }

        tracing::debug!(target = "wd", %username, "submitting login form");

        self.session.locator(USERNAME_INPUT).fill(username).await?;
        self.session.locator(PASSWORD_INPUT).fill(password).await?;
        self.session.locator(SUBMIT_BUTTON).click().await?;

        self.state = PageState::Submitted;
        Ok(())
    }

    /// Whether the success status message is showing.
    ///
    /// Pure observation with the harness's visibility semantics: the
    /// status element is looked up with the configured bounded wait, and
    /// "present" means found in the DOM *and* displayed. An element that
    /// never appears (or never becomes displayed) yields `Ok(false)` - this
    /// is the documented not-found-to-false translation, and the only place
    /// such errors are swallowed. Transport and protocol faults still
    /// propagate.
    pub async fn is_success_message_present(&mut self) -> Result<bool> {
        self.status_message_present(SUCCESS_MESSAGE).await
    }

    /// Whether the failure status message is showing. Same semantics as
    /// [`is_success_message_present`](LoginPage::is_success_message_present).
    pub async fn is_failure_message_present(&mut self) -> Result<bool> {
        self.status_message_present(FAILURE_MESSAGE).await
    }

    /// Current page-flow state as driven through this object.
    pub fn state(&self) -> PageState {
        self.state
    }

    async fn status_message_present(&mut self, selector: &str) -> Result<bool> {
        let present = match self.session.locator(selector).wait_until_visible().await {
            Ok(()) => true,
            Err(e) if e.is_timeout() => false,
            Err(e) => return Err(e),
        };
        self.state = PageState::ResultShown;
        Ok(present)
    }
}
