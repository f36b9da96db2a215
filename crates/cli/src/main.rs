use clap::Parser;
use tracing::error;
use wd_cli::{cli::Cli, commands, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = commands::dispatch(cli).await {
        error!(target = "wd", error = %err, "command failed");
        std::process::exit(1);
    }
}
