//! Transport layer for WebDriver commands.
//!
//! WebDriver is a plain HTTP request/response protocol, so the transport
//! seam is a single `execute` call. [`HttpTransport`] talks to a live remote
//! end; [`FakeTransport`](crate::fake_transport::FakeTransport) scripts
//! responses in memory for tests.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde_json::{Value, json};

use crate::error::{Error, Result};

/// HTTP method of a WebDriver endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// A single WebDriver wire command: method, session-relative path, JSON body.
#[derive(Debug, Clone)]
pub struct WireCommand {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl WireCommand {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    /// POST commands always carry a JSON body; WebDriver rejects empty ones.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Raw transport response: HTTP status plus the parsed JSON body.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub body: Value,
}

impl WireResponse {
    /// A 200 response wrapping `value` in the WebDriver envelope.
    pub fn ok_value(value: Value) -> Self {
        Self {
            status: 200,
            body: json!({ "value": value }),
        }
    }

    /// An error response in the WebDriver error envelope.
    pub fn wire_error(status: u16, code: &str, message: &str) -> Self {
        Self {
            status,
            body: json!({
                "value": {
                    "error": code,
                    "message": message,
                }
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes WebDriver wire commands against a remote end.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        command: WireCommand,
    ) -> Pin<Box<dyn Future<Output = Result<WireResponse>> + Send + '_>>;
}

/// HTTP transport to a local driver or remote grid endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport for the given endpoint, e.g.
    /// `http://127.0.0.1:9515` or a grid hub URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            // New-session includes browser startup; generous but bounded.
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::TransportError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        command: WireCommand,
    ) -> Pin<Box<dyn Future<Output = Result<WireResponse>> + Send + '_>> {
        let url = self.url_for(&command.path);
        Box::pin(async move {
            tracing::trace!(
                target = "wd",
                method = command.method.as_str(),
                %url,
                "wire command"
            );

            let request = match command.method {
                Method::Get => self.client.get(&url),
                Method::Post => self
                    .client
                    .post(&url)
                    .json(command.body.as_ref().unwrap_or(&json!({}))),
                Method::Delete => self.client.delete(&url),
            };

            let response = request.send().await?;
            let status = response.status().as_u16();
            let text = response.text().await?;
            let body = if text.is_empty() {
                json!({})
            } else {
                serde_json::from_str(&text).map_err(|e| {
                    Error::ProtocolError(format!("non-JSON response from remote end: {e}"))
                })?
            };

            Ok(WireResponse { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_constructors() {
        let get = WireCommand::get("/status");
        assert_eq!(get.method, Method::Get);
        assert!(get.body.is_none());

        let post = WireCommand::post("/session", json!({"capabilities": {}}));
        assert_eq!(post.method, Method::Post);
        assert_eq!(post.body.unwrap()["capabilities"], json!({}));

        let delete = WireCommand::delete("/session/abc");
        assert_eq!(delete.method.as_str(), "DELETE");
    }

    #[test]
    fn response_envelope_helpers() {
        let ok = WireResponse::ok_value(json!({"sessionId": "s1"}));
        assert!(ok.is_success());
        assert_eq!(ok.body["value"]["sessionId"], "s1");

        let err = WireResponse::wire_error(404, "no such element", "not there");
        assert!(!err.is_success());
        assert_eq!(err.body["value"]["error"], "no such element");
    }

    #[test]
    fn endpoint_trailing_slash_is_normalized() {
        let transport = HttpTransport::new("http://127.0.0.1:9515/").unwrap();
        assert_eq!(
            transport.url_for("/session"),
            "http://127.0.0.1:9515/session"
        );
    }
}
