use anyhow::Result;
use colored::Colorize;
use tracing::info;

use wd::pages::LoginPage;
use wd::{Config, Fixture};

pub async fn execute(
    config: &Config,
    username: &str,
    password: &str,
    expect_failure: bool,
) -> Result<()> {
    info!(target = "wd", %username, expect_failure, "running login check");

    let username = username.to_string();
    let password = password.to_string();
    let (success, failure) = Fixture::run(config, move |session| {
        Box::pin(async move {
            let mut login = LoginPage::new(session);
            login.visit().await?;
            login.login_with(&username, &password).await?;

            let success = login.is_success_message_present().await?;
            let failure = login.is_failure_message_present().await?;
            Ok((success, failure))
        })
    })
    .await?;

    let expectation = if expect_failure { "rejected" } else { "accepted" };
    let passed = if expect_failure {
        failure && !success
    } else {
        success && !failure
    };

    if passed {
        println!("{} login {expectation} as expected", "PASS".green().bold());
        Ok(())
    } else {
        println!(
            "{} expected login to be {expectation} (success message: {success}, failure message: {failure})",
            "FAIL".red().bold()
        );
        anyhow::bail!("login check failed")
    }
}
