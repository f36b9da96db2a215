//! Harness configuration.
//!
//! Configuration is constructed once per test run and passed by reference
//! into the fixture; nothing here is global or mutable after resolution.
//! The stringly-keyed file shape ([`RawConfig`]) resolves into a [`Config`]
//! with a tagged [`Target`] variant, so host dispatch happens exactly once,
//! at load time.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use wd_protocol::{Capabilities, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
use wd_runtime::{Error, Result};

/// Default application under test (the login exercise target).
pub const DEFAULT_BASE_URL: &str = "https://the-internet.herokuapp.com";

/// Browser engine for local targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
}

impl BrowserKind {
    /// Name as the WebDriver remote end expects it in capabilities.
    pub fn wire_name(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
        }
    }

    /// Conventional driver binary name for PATH lookup.
    pub fn driver_binary(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chromedriver",
            BrowserKind::Firefox => "geckodriver",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chrome" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            other => Err(Error::config(
                "browserName",
                format!("unrecognized browser \"{other}\" (expected \"chrome\" or \"firefox\")"),
            )),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Resolved session target.
///
/// Host dispatch happens once, at configuration load; session start never
/// branches on strings.
#[derive(Debug, Clone)]
pub enum Target {
    /// Spawn a driver binary locally.
    Local {
        /// Explicit driver executable; `None` means env/PATH resolution.
        driver_path: Option<PathBuf>,
        browser: BrowserKind,
        browser_version: Option<String>,
    },
    /// Request a session from a remote grid.
    Remote {
        grid_url: String,
        capabilities: Capabilities,
    },
}

/// Resolved harness configuration, constructed once per test run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application under test; page routes resolve against this.
    pub base_url: String,
    /// Bounded-wait ceiling for element lookups.
    pub element_timeout: Duration,
    /// Poll interval inside bounded waits.
    pub poll_interval: Duration,
    pub target: Target,
}

impl Config {
    /// A local configuration with defaults, for embedding and tests.
    pub fn local(browser: BrowserKind) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            element_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            target: Target::Local {
                driver_path: None,
                browser,
                browser_version: None,
            },
        }
    }

    /// Loads and resolves a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses and resolves a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)
            .map_err(|e| Error::config("config", e.to_string()))?;
        Self::resolve(raw)
    }

    /// Resolves the raw file shape into a typed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the offending field when a
    /// required option is absent or unrecognized. This fires before any
    /// session exists.
    pub fn resolve(raw: RawConfig) -> Result<Self> {
        let host = raw
            .host
            .as_deref()
            .ok_or_else(|| Error::config("host", "required"))?;

        let target = match host {
            "localhost" => {
                let browser_name = raw.browser_name.as_deref().ok_or_else(|| {
                    Error::config("browserName", "required when host is \"localhost\"")
                })?;
                Target::Local {
                    driver_path: raw.driver_path.clone(),
                    browser: browser_name.parse()?,
                    browser_version: raw.browser_version.clone(),
                }
            }
            grid => {
                let grid_url = raw.grid_url.as_deref().ok_or_else(|| {
                    Error::config("gridUrl", format!("required when host is \"{grid}\""))
                })?;
                let browser_name = raw.browser_name.as_deref().ok_or_else(|| {
                    Error::config("browserName", format!("required when host is \"{grid}\""))
                })?;
                let mut capabilities = Capabilities::for_browser(browser_name);
                capabilities.browser_version = raw.browser_version.clone();
                Target::Remote {
                    grid_url: grid_url.to_string(),
                    capabilities,
                }
            }
        };

        Ok(Self {
            base_url: raw.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            element_timeout: Duration::from_millis(
                raw.element_timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
            ),
            poll_interval: Duration::from_millis(
                raw.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            ),
            target,
        })
    }
}

/// The configuration file shape, camelCase keys as the corpus writes them.
///
/// Unknown keys are rejected so a typo fails loudly at load time instead of
/// silently falling back to a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawConfig {
    /// "localhost" for a local driver, anything else names a grid.
    pub host: Option<String>,
    pub browser_name: Option<String>,
    pub browser_version: Option<String>,
    pub driver_path: Option<PathBuf>,
    pub grid_url: Option<String>,
    pub base_url: Option<String>,
    pub element_timeout_ms: Option<u64>,
    pub poll_interval_ms: Option<u64>,
}

impl RawConfig {
    /// Applies `WD_*` environment overrides. Called once at load; the
    /// environment is never consulted again mid-test.
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    fn apply_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = var("WD_HOST") {
            self.host = Some(host);
        }
        if let Some(browser) = var("WD_BROWSER") {
            self.browser_name = Some(browser);
        }
        if let Some(grid_url) = var("WD_GRID_URL") {
            self.grid_url = Some(grid_url);
        }
        if let Some(base_url) = var("WD_BASE_URL") {
            self.base_url = Some(base_url);
        }
        self
    }
}
