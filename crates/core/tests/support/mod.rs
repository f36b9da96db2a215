//! Scripted fake of the login application, served over the fake transport.
//!
//! Implements just enough of the WebDriver wire protocol to drive the login
//! page object without a browser: session create/delete, navigation, element
//! lookup against a small fixed DOM, typing, clicking, and displayedness.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};

use wd::wd_protocol::ELEMENT_IDENTIFIER;
use wd::wd_runtime::fake_transport::CommandLog;
use wd::wd_runtime::{FakeTransport, Method, Result, WireCommand, WireResponse};
use wd::{BrowserKind, Config, Target};

pub const VALID_USERNAME: &str = "tomsmith";
pub const VALID_PASSWORD: &str = "SuperSecretPassword!";

pub const SUCCESS_TEXT: &str = "You logged into a secure area!";
pub const FAILURE_TEXT: &str = "Your username is invalid!";

/// Harness configuration pointed at the fake application, with waits short
/// enough that absent-element checks stay fast.
pub fn test_config() -> Config {
    Config {
        base_url: "http://app.test".to_string(),
        element_timeout: Duration::from_millis(200),
        poll_interval: Duration::from_millis(10),
        target: Target::Local {
            driver_path: None,
            browser: BrowserKind::Chrome,
            browser_version: None,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flash {
    Success,
    Error,
}

#[derive(Default)]
struct AppState {
    url: String,
    username: String,
    password: String,
    flash: Option<Flash>,
}

/// The fake application plus the transport command log.
pub struct FakeLoginApp {
    state: Arc<Mutex<AppState>>,
}

impl FakeLoginApp {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::default())),
        }
    }

    /// Builds a transport wired to this application. Returns the transport
    /// together with its command log for later inspection.
    pub fn transport(&self) -> (Box<FakeTransport>, CommandLog) {
        let state = Arc::clone(&self.state);
        let fake = FakeTransport::new(move |command| handle(&state, command));
        let log = fake.log_handle();
        (Box::new(fake), log)
    }
}

fn handle(state: &Mutex<AppState>, command: &WireCommand) -> Result<WireResponse> {
    let segments: Vec<&str> = command
        .path
        .trim_start_matches('/')
        .split('/')
        .collect();

    Ok(match (command.method, segments.as_slice()) {
        (Method::Get, ["status"]) => {
            WireResponse::ok_value(json!({"ready": true, "message": "fake driver ready"}))
        }
        (Method::Post, ["session"]) => {
            WireResponse::ok_value(json!({"sessionId": "fake-session", "capabilities": {}}))
        }
        (Method::Delete, ["session", _]) => WireResponse::ok_value(Value::Null),
        (Method::Post, ["session", _, "url"]) => {
            let url = command.body.as_ref().and_then(|b| b["url"].as_str());
            let mut app = state.lock();
            app.url = url.unwrap_or_default().to_string();
            app.username.clear();
            app.password.clear();
            app.flash = None;
            WireResponse::ok_value(Value::Null)
        }
        (Method::Get, ["session", _, "url"]) => {
            WireResponse::ok_value(json!(state.lock().url))
        }
        (Method::Post, ["session", _, "element"]) => {
            let selector = command
                .body
                .as_ref()
                .and_then(|b| b["value"].as_str())
                .unwrap_or_default();
            find_element(&state.lock(), selector)
        }
        (Method::Post, ["session", _, "element", element_id, "clear"]) => {
            let mut app = state.lock();
            match *element_id {
                "el-username" => app.username.clear(),
                "el-password" => app.password.clear(),
                _ => {}
            }
            WireResponse::ok_value(Value::Null)
        }
        (Method::Post, ["session", _, "element", element_id, "value"]) => {
            let text = command
                .body
                .as_ref()
                .and_then(|b| b["text"].as_str())
                .unwrap_or_default();
            let mut app = state.lock();
            match *element_id {
                "el-username" => app.username.push_str(text),
                "el-password" => app.password.push_str(text),
                _ => {}
            }
            WireResponse::ok_value(Value::Null)
        }
        (Method::Post, ["session", _, "element", "el-submit", "click"]) => {
            let mut app = state.lock();
            if app.username == VALID_USERNAME && app.password == VALID_PASSWORD {
                app.flash = Some(Flash::Success);
                app.url = "http://app.test/secure".to_string();
            } else {
                app.flash = Some(Flash::Error);
            }
            WireResponse::ok_value(Value::Null)
        }
        (Method::Post, ["session", _, "element", _, "click"]) => {
            WireResponse::ok_value(Value::Null)
        }
        (Method::Get, ["session", _, "element", "el-flash", "text"]) => {
            let app = state.lock();
            let text = match app.flash {
                Some(Flash::Success) => SUCCESS_TEXT,
                Some(Flash::Error) => FAILURE_TEXT,
                None => "",
            };
            WireResponse::ok_value(json!(text))
        }
        (Method::Get, ["session", _, "element", element_id, "displayed"]) => {
            WireResponse::ok_value(json!(*element_id != "el-hidden"))
        }
        _ => WireResponse::wire_error(
            404,
            "unknown command",
            &format!("unhandled: {} {}", command.method.as_str(), command.path),
        ),
    })
}

fn find_element(app: &AppState, selector: &str) -> WireResponse {
    let on_login_page = app.url.ends_with("/login");
    let element_id = match selector {
        "#username" if on_login_page => Some("el-username"),
        "#password" if on_login_page => Some("el-password"),
        "button[type='submit']" if on_login_page => Some("el-submit"),
        // Present in the markup but styled invisible.
        "#hidden-banner" if on_login_page => Some("el-hidden"),
        ".flash.success" if app.flash == Some(Flash::Success) => Some("el-flash"),
        ".flash.error" if app.flash == Some(Flash::Error) => Some("el-flash"),
        _ => None,
    };

    match element_id {
        Some(id) => WireResponse::ok_value(json!({ ELEMENT_IDENTIFIER: id })),
        None => WireResponse::wire_error(
            404,
            "no such element",
            &format!("Unable to locate element: {selector}"),
        ),
    }
}
