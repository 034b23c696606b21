use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "matchday-backend")]
#[command(about = "Matchday Backend Server", long_about = None)]
struct Args {
    /// Path to the TOML config file (falls back to MATCHDAY_CONFIG, then defaults)
    #[arg(short, long)]
    config: Option<String>,

    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if args.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if let Some(config) = args.config {
        std::env::set_var("MATCHDAY_CONFIG", config);
    }

    backend_bootstrap::run_standalone().await
}
