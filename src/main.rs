use anyhow::Context;
use clap::Parser;
use gerrit_reviewer::config::{Cli, Config};
use gerrit_reviewer::gerrit::GerritClient;
use gerrit_reviewer::notify::{Color, HipChat};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    let config = Config::from(Cli::parse());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, `info` unless RUST_LOG says otherwise
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(config: &Config) -> anyhow::Result<()> {
    let hipchat = match &config.hipchat_webhook_url {
        Some(url) => Some(HipChat::new(url).context("HipChat webhook")?),
        None => {
            warn!("hipchatWebhookURL is not set, notifications are disabled");
            None
        }
    };

    println!(
        "Attempting to add '{}' as a reviewer on gerrit change '{}'",
        config.reviewer, config.change_id
    );

    let gerrit = GerritClient::new(&config.gerrit_url, config.credentials.clone())
        .context("Gerrit client")?;

    let auth = gerrit
        .add_reviewer(&config.change_id, &config.reviewer)
        .with_context(|| {
            format!(
                "adding '{}' as a reviewer on change '{}'",
                config.reviewer, config.change_id
            )
        })?;
    info!(?auth, "reviewer added");

    let msg = format!(
        "{} requested to review {}",
        config.reviewer,
        gerrit.change_url(&config.change_id)
    );

    if let Some(hipchat) = &hipchat {
        hipchat
            .notify(Color::Purple, &format!("@here {}", msg))
            .context("notifying HipChat")?;
    }

    println!("{}", msg);
    Ok(())
}
