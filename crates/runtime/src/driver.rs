//! WebDriver executable resolution.
//!
//! Locates the driver binary (chromedriver, geckodriver) that
//! [`DriverServer`](crate::server::DriverServer) will spawn.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable overriding the driver executable path.
pub const DRIVER_ENV_VAR: &str = "WD_DRIVER";

/// Resolve the driver executable to spawn for a local target.
///
/// Candidates are tried in order:
/// 1. `configured` - the `driverPath` from the harness configuration
/// 2. `WD_DRIVER` environment variable (runtime override)
/// 3. `PATH` lookup of `binary_name` (e.g. "chromedriver")
///
/// A configured path that does not exist is an error rather than a fallback:
/// an explicit setting pointing nowhere is a configuration mistake the user
/// needs to hear about, not silently route around.
///
/// # Errors
///
/// Returns [`Error::DriverNotFound`] if no candidate resolves to an existing
/// file, or [`Error::Configuration`] if an explicitly configured path is
/// missing on disk.
pub fn resolve_driver_executable(
    configured: Option<&Path>,
    binary_name: &str,
) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::config(
            "driverPath",
            format!("no such file: {}", path.display()),
        ));
    }

    if let Ok(override_path) = std::env::var(DRIVER_ENV_VAR) {
        let path = PathBuf::from(&override_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!(
            target = "wd",
            path = %path.display(),
            "{DRIVER_ENV_VAR} is set but does not exist; falling back to PATH lookup"
        );
    }

    if let Some(path) = find_in_path(binary_name) {
        return Ok(path);
    }

    Err(Error::DriverNotFound(PathBuf::from(binary_name)))
}

/// Search the `PATH` environment variable for an executable.
fn find_in_path(binary_name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(binary_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            let candidate = dir.join(format!("{binary_name}.exe"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
