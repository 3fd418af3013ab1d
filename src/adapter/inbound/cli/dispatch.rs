//! Routes parsed commands to their handlers.

use super::command::{CheckCommand, Cli, ColorChoice, Commands};
use super::{check, config, generations, predict, run, train};
use crate::error::Result;

/// Load configuration, initialize logging and run the selected command.
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    let mut settings = config::load(cli.command.config_path())?;
    settings.logging.level = log_level(&settings.logging.level, &cli);
    settings.init_logging();

    match &cli.command {
        Commands::Train(args) => train::execute(&settings, args).await,
        Commands::Predict(args) => predict::execute(&settings, args).await,
        Commands::Generations(_) => generations::execute(&settings).await,
        Commands::Check(CheckCommand::Config(args)) => {
            check::config::execute(&settings, &args.config);
            Ok(())
        }
        Commands::Check(CheckCommand::Runtime(_)) => check::runtime::execute(&settings).await,
        Commands::Run(_) => run::execute(&settings).await,
    }
}

/// One-shot commands only log warnings unless `-v` is given.
fn log_level(configured: &str, cli: &Cli) -> String {
    match cli.verbose {
        0 if cli.command.is_long_running() => configured.to_string(),
        0 => "warn".to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}
