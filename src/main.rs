// Entrypoint for the Kalcium test client.
// - Resolves settings (defaults, config file, env, flags) and asks for any
//   missing credentials.
// - Runs the scenario once; Ctrl-C aborts the request in flight.
// - Exits non-zero when a step failed.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use kalcium_client::config::{CliArgs, TestClientConfig};
use kalcium_client::ui::{self, ConsoleReporter};
use kalcium_client::KalcClient;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = TestClientConfig::load(CliArgs::parse())?;
    let (user_name, password) = ui::prompt_credentials(&config)?;

    let cancel = CancellationToken::new();
    let client = KalcClient::builder(config.server_url.as_str())
        .timeout(config.timeout)
        .ignore_kalc_version(!config.check_kalc_version)
        .build()
        .with_context(|| format!("Invalid server address '{}'", config.server_url))?
        .with_cancellation(cancel.clone());

    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, cancelling the running request");
                cancel.cancel();
            }
        }
    });

    let settings = config.scenario_settings(user_name, password);
    let mut reporter = ConsoleReporter::new();
    let report = config.scenario.run(&client, &settings, &mut reporter).await;
    ui::print_summary(&report);

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
