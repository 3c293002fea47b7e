//! Mavenlink Communicator - command-line entry point.
//!
//! Loads the configuration once, then runs a single service call and prints
//! its response envelope.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use mavenlink_communicator::cli::Cli;
use mavenlink_communicator::error::Result;
use mavenlink_communicator::{
    logging, Aggregator, AppError, CommunicatorService, EnvironmentConfiguration,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    if let Err(e) = logging::init(config.debug) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let code = run(&cli, config).await?;
    logging::shutdown();
    Ok(code)
}

fn load_config(cli: &Cli) -> Result<EnvironmentConfiguration> {
    let config = match &cli.config {
        Some(path) => EnvironmentConfiguration::from_file(path)?,
        None => EnvironmentConfiguration::from_env()?,
    };
    Ok(config)
}

async fn run(cli: &Cli, config: EnvironmentConfiguration) -> Result<ExitCode> {
    let aggregator = Aggregator::new(config)?;
    let service = CommunicatorService::new(aggregator);

    match cli.command.dispatch(&service).await {
        Ok(response) => {
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| AppError::other(format!("failed to encode response: {}", e)))?;
            writeln!(std::io::stdout(), "{}", json)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let json = serde_json::to_string_pretty(&err)
                .map_err(|e| AppError::other(format!("failed to encode error: {}", e)))?;
            writeln!(std::io::stderr(), "{}", json)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
