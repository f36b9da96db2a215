mod check;
mod validate;

use anyhow::{Context, Result};

use crate::cli::{Cli, Commands};

pub async fn dispatch(cli: Cli) -> Result<()> {
    let contents = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("reading configuration file {}", cli.config.display()))?;
    let raw: wd::RawConfig =
        serde_json::from_str(&contents).context("parsing configuration file")?;

    let mut config = wd::Config::resolve(raw.apply_env_overrides())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    match cli.command {
        Commands::Check {
            username,
            password,
            expect_failure,
        } => check::execute(&config, &username, &password, expect_failure).await,
        Commands::Validate => validate::execute(&cli.config, &config),
    }
}
