use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use wd::{Config, Target};

pub fn execute(path: &Path, config: &Config) -> Result<()> {
    println!("{} {}", "OK".green().bold(), path.display());

    match &config.target {
        Target::Local {
            driver_path,
            browser,
            browser_version,
        } => {
            let driver = driver_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| format!("{} via WD_DRIVER or PATH", browser.driver_binary()));
            let version = browser_version.as_deref().unwrap_or("any");
            println!("  target:   local {browser} (version: {version})");
            println!("  driver:   {driver}");
        }
        Target::Remote {
            grid_url,
            capabilities,
        } => {
            println!("  target:   grid {grid_url}");
            println!(
                "  browser:  {} (version: {})",
                capabilities.browser_name.as_deref().unwrap_or("any"),
                capabilities.browser_version.as_deref().unwrap_or("any"),
            );
        }
    }

    println!("  base URL: {}", config.base_url);
    println!(
        "  waits:    {}ms timeout, {}ms poll",
        config.element_timeout.as_millis(),
        config.poll_interval.as_millis()
    );
    Ok(())
}
