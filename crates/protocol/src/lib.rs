//! Wire types for the W3C WebDriver protocol.
//!
//! This crate contains the serde-serializable types used for communication
//! with a WebDriver remote end (a local driver binary or a remote grid).
//! These types represent the "protocol layer" - the shapes of data as they
//! appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization/deserialization
//! - **1:1 with protocol**: Match the W3C WebDriver specification payloads
//! - **Stable**: Changes only when the wire protocol changes
//!
//! Higher-level ergonomic APIs are built on top of these types in `wd-rs`.

pub mod capabilities;
pub mod types;

pub use capabilities::*;
pub use types::*;

/// Default timeout in milliseconds for element-lookup operations.
///
/// Applied when the harness configuration does not specify
/// `elementTimeoutMs`. Matches Selenium's conventional explicit-wait default.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default poll interval in milliseconds for bounded waits.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;
