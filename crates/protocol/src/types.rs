//! Core protocol types used across the wire.
//!
//! Every WebDriver response wraps its payload in a `{"value": ...}` envelope;
//! errors travel inside the same envelope with an `error` discriminator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The web element identifier key mandated by the W3C WebDriver spec.
///
/// Element references on the wire are objects with this single magic key.
pub const ELEMENT_IDENTIFIER: &str = "element-6066-11e4-a52e-4f735466cecf";

/// The `{"value": ...}` envelope wrapping every WebDriver response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireValue<T> {
    pub value: T,
}

/// Error payload reported by the remote end.
///
/// See <https://www.w3.org/TR/webdriver2/#errors> for the error code table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireError {
    /// Spec error code, e.g. "no such element", "invalid session id".
    pub error: String,
    /// Human-readable message from the driver.
    pub message: String,
    /// Driver-side stacktrace, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<String>,
}

/// Reference to an element held by the remote end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRef {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
    pub element_id: String,
}

/// Location strategy for element lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocatorStrategy {
    /// CSS selector (the harness default).
    #[serde(rename = "css selector")]
    CssSelector,
    /// XPath expression.
    #[serde(rename = "xpath")]
    XPath,
    /// Exact link text.
    #[serde(rename = "link text")]
    LinkText,
    /// Tag name.
    #[serde(rename = "tag name")]
    TagName,
}

/// Body of `POST /session/{id}/element`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindElementParams {
    pub using: LocatorStrategy,
    pub value: String,
}

impl FindElementParams {
    /// Find-element parameters for a CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            using: LocatorStrategy::CssSelector,
            value: selector.into(),
        }
    }
}

/// Body of `POST /session/{id}/url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigateParams {
    pub url: String,
}

/// Body of `POST /session/{id}/element/{eid}/value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendKeysParams {
    pub text: String,
}

/// `GET /status` response value, used for driver readiness polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverStatus {
    pub ready: bool,
    #[serde(default)]
    pub message: String,
}

/// Extracts the element id from a find-element response value.
///
/// Returns `None` when the payload is not an element reference.
pub fn element_id_from_value(value: &Value) -> Option<&str> {
    value.get(ELEMENT_IDENTIFIER)?.as_str()
}
