use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wd")]
#[command(about = "WebDriver test harness - drive login checks from the command line")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Harness configuration file
    #[arg(short, long, global = true, value_name = "FILE", default_value = "wd.json")]
    pub config: PathBuf,

    /// Override the base URL of the application under test
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the login smoke check against the configured target
    Check {
        /// Username to submit
        #[arg(short, long, default_value = "tomsmith")]
        username: String,

        /// Password to submit
        #[arg(short, long, default_value = "SuperSecretPassword!")]
        password: String,

        /// Expect the login to be rejected instead of accepted
        #[arg(long)]
        expect_failure: bool,
    },
    /// Resolve a configuration file and print the result
    Validate,
}
