//! `career-watch`: checks the configured career pages once and reports new
//! matching jobs.

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use watcher::{report, run_once, Cli, HttpFetcher};

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.build_config()?;
    info!(
        sites = config.career_urls.len(),
        titles = config.target_titles.len(),
        "Starting job search"
    );

    let fetcher = HttpFetcher::new(config.fetch_timeout())?;
    let result = run_once(config, fetcher).await?;

    let failed = result.failed_sites().count();
    if failed > 0 {
        warn!("{failed} of {} sites could not be checked", result.snapshot.len());
    }

    println!();
    print!("{}", report::console_summary(&result.new_jobs));
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        error!("Job search automation failed: {err:#}");
        std::process::exit(1);
    }
}
