//! New-session capabilities payloads.
//!
//! Only the `alwaysMatch` form is emitted; the harness never negotiates
//! `firstMatch` alternatives.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Browser capabilities requested for a new session.
///
/// Unknown/vendor-prefixed entries travel through `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Browser name as the remote end expects it ("chrome", "firefox", ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_name: Option<String>,
    /// Requested browser version, if pinned by configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_version: Option<String>,
    /// Requested platform ("linux", "windows", ...), grid targets only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    /// Vendor-specific capability entries, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Capabilities {
    /// Creates capabilities for the given browser name.
    pub fn for_browser(browser_name: impl Into<String>) -> Self {
        Self {
            browser_name: Some(browser_name.into()),
            ..Default::default()
        }
    }

    /// Sets the requested browser version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.browser_version = Some(version.into());
        self
    }
}

/// Body of `POST /session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSessionParams {
    pub capabilities: CapabilitiesRequest,
}

impl NewSessionParams {
    /// Wraps capabilities in the `alwaysMatch` envelope.
    pub fn always_match(capabilities: Capabilities) -> Self {
        Self {
            capabilities: CapabilitiesRequest {
                always_match: capabilities,
            },
        }
    }
}

/// The `capabilities` object inside a new-session request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesRequest {
    pub always_match: Capabilities,
}

/// Successful `POST /session` response value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionResult {
    /// Opaque session identifier used in all subsequent command paths.
    pub session_id: String,
    /// Capabilities the remote end actually granted.
    #[serde(default)]
    pub capabilities: Value,
}
