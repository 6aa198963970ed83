//! Command line and environment configuration

use crate::Credentials;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

/// Add a reviewer to a Gerrit change
#[derive(Debug, Parser)]
#[command(name = "gerrit-reviewer", version)]
pub struct Cli {
    /// Change to add the reviewer to (number or Change-Id)
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub change_id: String,

    /// Account to add as a reviewer
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub reviewer: String,

    /// Base URL of the Gerrit server
    #[arg(long, env = "gerritURL", value_parser = NonEmptyStringValueParser::new())]
    pub gerrit_url: String,

    /// Gerrit HTTP username
    #[arg(long, env = "gerritUsername", value_parser = NonEmptyStringValueParser::new())]
    pub username: String,

    /// Gerrit HTTP password
    #[arg(
        long,
        env = "gerritPassword",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub password: String,

    /// HipChat room webhook; no notification is sent without it
    #[arg(long, env = "hipchatWebhookURL", value_parser = NonEmptyStringValueParser::new())]
    pub hipchat_webhook_url: Option<String>,
}

/// Everything a run needs, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub change_id: String,
    pub reviewer: String,
    pub gerrit_url: String,
    pub credentials: Credentials,
    pub hipchat_webhook_url: Option<String>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            change_id: cli.change_id,
            reviewer: cli.reviewer,
            gerrit_url: cli.gerrit_url,
            credentials: Credentials::new(cli.username, cli.password),
            hipchat_webhook_url: cli.hipchat_webhook_url,
        }
    }
}
