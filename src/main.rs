use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use careerpact::cli::Cli;
use careerpact::commands;
use careerpact::config::Config;
use careerpact::remote::HttpService;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    debug!(?config, "config loaded");

    let service = HttpService::new(&config);
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = commands::run(cli.command, &config, service, &mut stdout).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
