//! Typed WebDriver wire client.
//!
//! `Connection` is the single choke point through which every command
//! reaches the remote end. It owns the transport, unwraps the
//! `{"value": ...}` envelope, and maps driver-reported error payloads to
//! [`Error::Wire`].

use serde_json::Value;

use wd_protocol::{
    Capabilities, DriverStatus, FindElementParams, NavigateParams, NewSessionParams,
    NewSessionResult, SendKeysParams, WireError, element_id_from_value,
};

use crate::error::{Error, Result};
use crate::transport::{Transport, WireCommand, WireResponse};

/// A connection to a WebDriver remote end.
pub struct Connection {
    transport: Box<dyn Transport>,
}

impl Connection {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Executes a raw command and unwraps the response envelope.
    pub async fn execute(&self, command: WireCommand) -> Result<Value> {
        let response = self.transport.execute(command).await?;
        unwrap_value(response)
    }

    /// `GET /status` - remote-end readiness.
    pub async fn status(&self) -> Result<DriverStatus> {
        let value = self.execute(WireCommand::get("/status")).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `POST /session` - start a browser session.
    pub async fn new_session(&self, capabilities: Capabilities) -> Result<NewSessionResult> {
        let params = NewSessionParams::always_match(capabilities);
        let value = self
            .execute(WireCommand::post("/session", serde_json::to_value(&params)?))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `DELETE /session/{id}` - stop a browser session.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.execute(WireCommand::delete(format!("/session/{session_id}")))
            .await?;
        Ok(())
    }

    /// `POST /session/{id}/url` - navigate the top-level browsing context.
    pub async fn navigate(&self, session_id: &str, url: &str) -> Result<()> {
        let params = NavigateParams { url: url.into() };
        self.execute(WireCommand::post(
            format!("/session/{session_id}/url"),
            serde_json::to_value(&params)?,
        ))
        .await?;
        Ok(())
    }

    /// `GET /session/{id}/url` - current URL.
    pub async fn current_url(&self, session_id: &str) -> Result<String> {
        let value = self
            .execute(WireCommand::get(format!("/session/{session_id}/url")))
            .await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::ProtocolError("current URL is not a string".into()))
    }

    /// `POST /session/{id}/element` - find an element, returning its id.
    pub async fn find_element(
        &self,
        session_id: &str,
        params: FindElementParams,
    ) -> Result<String> {
        let value = self
            .execute(WireCommand::post(
                format!("/session/{session_id}/element"),
                serde_json::to_value(&params)?,
            ))
            .await?;
        element_id_from_value(&value)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::ProtocolError("find-element response missing element identifier".into())
            })
    }

    /// `POST /session/{id}/element/{eid}/click`
    pub async fn element_click(&self, session_id: &str, element_id: &str) -> Result<()> {
        self.execute(WireCommand::post(
            format!("/session/{session_id}/element/{element_id}/click"),
            serde_json::json!({}),
        ))
        .await?;
        Ok(())
    }

    /// `POST /session/{id}/element/{eid}/clear`
    pub async fn element_clear(&self, session_id: &str, element_id: &str) -> Result<()> {
        self.execute(WireCommand::post(
            format!("/session/{session_id}/element/{element_id}/clear"),
            serde_json::json!({}),
        ))
        .await?;
        Ok(())
    }

    /// `POST /session/{id}/element/{eid}/value` - type into an element.
    pub async fn element_send_keys(
        &self,
        session_id: &str,
        element_id: &str,
        text: &str,
    ) -> Result<()> {
        let params = SendKeysParams { text: text.into() };
        self.execute(WireCommand::post(
            format!("/session/{session_id}/element/{element_id}/value"),
            serde_json::to_value(&params)?,
        ))
        .await?;
        Ok(())
    }

    /// `GET /session/{id}/element/{eid}/text` - rendered text.
    pub async fn element_text(&self, session_id: &str, element_id: &str) -> Result<String> {
        let value = self
            .execute(WireCommand::get(format!(
                "/session/{session_id}/element/{element_id}/text"
            )))
            .await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::ProtocolError("element text is not a string".into()))
    }

    /// `GET /session/{id}/element/{eid}/displayed` - displayedness.
    ///
    /// This is how the harness distinguishes present-but-hidden from
    /// visible: an element can be found and still not be displayed.
    pub async fn element_displayed(&self, session_id: &str, element_id: &str) -> Result<bool> {
        let value = self
            .execute(WireCommand::get(format!(
                "/session/{session_id}/element/{element_id}/displayed"
            )))
            .await?;
        value
            .as_bool()
            .ok_or_else(|| Error::ProtocolError("displayedness is not a boolean".into()))
    }
}

/// Unwraps the `{"value": ...}` envelope, mapping error payloads to
/// [`Error::Wire`].
fn unwrap_value(response: WireResponse) -> Result<Value> {
    let value = response.body.get("value").cloned().unwrap_or(Value::Null);

    // Drivers signal errors through the envelope, not just the HTTP status.
    if value.get("error").map(Value::is_string).unwrap_or(false) {
        let wire: WireError = serde_json::from_value(value)?;
        return Err(Error::Wire {
            error: wire.error,
            message: wire.message,
            stacktrace: wire.stacktrace,
        });
    }

    if !response.is_success() {
        return Err(Error::ProtocolError(format!(
            "remote end returned HTTP {} without an error payload",
            response.status
        )));
    }

    Ok(value)
}
