//! WebDriver Runtime - Driver lifecycle, transport, and wire client
//!
//! This crate provides the low-level runtime infrastructure for talking to a
//! WebDriver remote end (a local driver binary or a remote grid):
//!
//! - **Driver resolution**: Locating the driver executable
//! - **Driver server**: Spawning and stopping the driver process
//! - **Transport**: HTTP request/response plumbing (plus an in-memory fake)
//! - **Connection**: Typed WebDriver commands and wire-error mapping
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │    wd-rs    │  Session, Fixture, Locator, page objects
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  wd-runtime │  This crate
//! │  ┌────────┐ │
//! │  │ Conn   │ │  Typed commands, error mapping
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Trans  │ │  HTTP (or fake) transport
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Driver │ │  Process management
//! │  └────────┘ │
//! └─────────────┘
//! ```
//!
//! The `Transport` trait is the seam tests use: a `FakeTransport` stands in
//! for a live driver so session and page-object logic can be exercised
//! without a browser.

pub mod connection;
pub mod driver;
pub mod error;
pub mod fake_transport;
pub mod server;
pub mod transport;

// Re-export key types at crate root
pub use connection::Connection;
pub use driver::resolve_driver_executable;
pub use error::{Error, Result};
pub use fake_transport::FakeTransport;
pub use server::DriverServer;
pub use transport::{HttpTransport, Method, Transport, WireCommand, WireResponse};
