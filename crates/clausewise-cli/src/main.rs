//! Clausewise CLI - Command-line interface for the clause extractor.

use clap::Parser;
use clausewise_cli::commands;
use clausewise_cli::config::OutputFormat;
use clausewise_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays clean for JSON output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let error_formatter = Formatter::new(OutputFormat::Table, !cli.no_color);

    if let Err(e) = run(cli).await {
        eprintln!("{}", error_formatter.error(&format!("Error: {}", e)));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> clausewise_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await?,
        Command::Config(args) => commands::execute_config(args, &config)?,
    }

    Ok(())
}
