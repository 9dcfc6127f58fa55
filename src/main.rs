use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::info;

use hubsystem::api::ollama::OllamaBackend;
use hubsystem::cli::args::Cli;
use hubsystem::cli::commands::Shell;
use hubsystem::config::Settings;
use hubsystem::session::{script, Session};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(cli));
    // The stdin reader thread may still be parked on a read.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load_with(cli.config.as_deref())?
        .with_overrides(cli.host.as_deref(), cli.model.as_deref());
    info!(host = %settings.host, model = %settings.model, "settings resolved");

    let backend = OllamaBackend::new(&settings.host, settings.model.clone())?;
    let session = Session::initialize(backend, script::PERSONA, script::SEED_EXCHANGES);

    let interrupt = CancellationToken::new();
    let watcher = interrupt.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            watcher.cancel();
        }
    });

    let mut shell = Shell::new(session, std::io::stdout(), interrupt);
    shell.print_banner()?;

    if !cli.no_maintenance && !shell.run_maintenance().await? {
        return Ok(());
    }

    shell.run(BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let default = if verbose { "hubsystem=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
