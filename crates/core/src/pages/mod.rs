//! Page objects.
//!
//! A page object wraps one logical page of the application under test and
//! exposes intention-revealing operations ("log in with these credentials",
//! "is the success indicator visible") while hiding locators and DOM
//! details. Page objects hold a non-owning reference to the
//! [`Session`](crate::Session) and live no longer than the test case that
//! created them; locator changes in the application break the page object,
//! never the fixture.

mod login;

pub use login::{LoginPage, PageState};
