//! incident-meet CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use incident_meet::cli::{Cli, Command, ConfigAction};
use incident_meet::commands;
use incident_meet::config::AppConfig;
use incident_meet::error::CliResult;
use incident_meet::logging::{LoggingConfig, init_logging};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let logging = if cli.debug || config.debug {
        LoggingConfig::debug(cli.log_format)
    } else {
        LoggingConfig::default().with_format(cli.log_format)
    };
    if let Err(e) = init_logging(&logging) {
        eprintln!("warning: {}", e);
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> CliResult<AppConfig> {
    match cli.config {
        Some(ref path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

async fn run(cli: Cli, config: AppConfig) -> CliResult<()> {
    let overrides = cli.credential_overrides();

    match cli.command {
        Command::Auth => commands::auth::check(&config, &overrides).await,
        Command::Create { ref incident } => {
            commands::meeting::create(incident, &config, &overrides).await
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config, &overrides),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
