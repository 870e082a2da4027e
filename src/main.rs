use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use deposit_planner::api::{self, Cli};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("deposit_planner=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = api::run(cli).await {
        error!("{e}");
        std::process::exit(1);
    }
}
