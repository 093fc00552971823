use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio::cli::FormArgs;

/// folio - portfolio contact form
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Validate and send portfolio contact form messages", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the form and print field errors as JSON
    Validate(FormArgs),
    /// Validate, send and print the resulting form state as JSON
    Submit(FormArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = folio::config::Config::load(cli.config.clone())?;
    config.validate()?;

    folio::observability::init_observability(
        "folio",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let ok = match cli.command {
        Commands::Validate(form) => folio::cli::validate(form)?,
        Commands::Submit(form) => folio::cli::submit(config, form).await?,
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
