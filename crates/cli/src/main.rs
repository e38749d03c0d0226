use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use expfactory_cli::{
    cli::Cli,
    commands::{failure_message, handle_command},
    config::Config,
};

fn env_filter(level: u8) -> EnvFilter {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return EnvFilter::from_default_env();
    }
    let directive = match level {
        0 => "off",
        1 => "warn",
        2 | 3 => "info",
        _ => "debug",
    };
    EnvFilter::new(directive)
}

fn run(cli: Cli) -> eyre::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let reporter = config.reporter(&cli);

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(env_filter(reporter.level()))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    handle_command(cli.selected_command(), &config, &reporter)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            if let Some(message) = failure_message(&report, quiet) {
                eprintln!("Error: {}", message);
            }
            ExitCode::FAILURE
        }
    }
}
