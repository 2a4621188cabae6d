use std::time::Duration;

use clap::Parser;
use homewatch_core::{Config, HomeworkClient, TelegramNotifier, Watcher};

#[derive(Parser)]
#[command(
    name = "homewatch",
    about = "Poll the homework-review API and forward status changes to Telegram",
    version
)]
struct Cli {
    /// Seconds to wait between poll cycles
    #[arg(long, env = "HOMEWATCH_INTERVAL", default_value = "600")]
    interval: u64,

    /// Override the homework-review API endpoint
    #[arg(long, env = "HOMEWATCH_ENDPOINT")]
    endpoint: Option<String>,
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    config.retry_period = Duration::from_secs(cli.interval);
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let poller = HomeworkClient::new(&config.endpoint, &config.practicum_token)?;
    let notifier = TelegramNotifier::new(&config.telegram_token, &config.chat_id)?;

    Watcher::new(poller, notifier, config.retry_period).run().await;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    // run() only returns on startup failure; the loop itself never exits.
    if let Err(e) = run(cli).await {
        tracing::error!("startup failed: {e:#}");
        std::process::exit(1);
    }
}
