//! Command-line interface definitions.
//!
//! Defines the CLI structure for the simlife application using `clap`.
//! Subcommands train a new model generation, query it, inspect the model
//! root and run the periodic training scheduler.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use super::paths;

/// Similarity model lifecycle manager
#[derive(Parser, Debug)]
#[command(name = "simlife")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the simlife CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a new model generation from a JSON-lines sales file
    Train(TrainArgs),

    /// List products similar to the given one
    Predict(PredictArgs),

    /// List model generations under the model root
    Generations(ConfigPathArg),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Retrain periodically until interrupted
    Run(ConfigPathArg),
}

impl Commands {
    /// Configuration file the command reads.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        match self {
            Self::Train(args) => &args.config,
            Self::Predict(args) => &args.config,
            Self::Generations(args) | Self::Run(args) => &args.config,
            Self::Check(CheckCommand::Config(args) | CheckCommand::Runtime(args)) => &args.config,
        }
    }

    /// Whether the command keeps running and should log at the configured level.
    #[must_use]
    pub fn is_long_running(&self) -> bool {
        matches!(self, Self::Run(_))
    }
}

/// Subcommands for `simlife check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
    /// Verify the interpreter and model scripts are usable.
    Runtime(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `train` subcommand.
#[derive(Parser, Debug)]
pub struct TrainArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// JSON-lines sales file (defaults to `schedule.source`).
    #[arg(short, long)]
    pub source: Option<PathBuf>,
}

/// Arguments for the `predict` subcommand.
#[derive(Parser, Debug)]
pub struct PredictArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Product to find similar products for.
    pub product_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predict_command() {
        let cli = Cli::try_parse_from(["simlife", "predict", "p-42"]).unwrap();
        match cli.command {
            Commands::Predict(args) => {
                assert_eq!(args.product_id, "p-42");
                assert_eq!(args.config, paths::default_config());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.json);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_train_with_source() {
        let cli = Cli::try_parse_from([
            "simlife",
            "train",
            "--source",
            "sales.jsonl",
            "--config",
            "cfg.toml",
        ])
        .unwrap();
        match &cli.command {
            Commands::Train(args) => {
                assert_eq!(args.source.as_deref(), Some(Path::new("sales.jsonl")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.command.config_path(), Path::new("cfg.toml"));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["simlife", "generations", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_check_runtime() {
        let cli = Cli::try_parse_from(["simlife", "check", "runtime", "-c", "x.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Check(CheckCommand::Runtime(_))
        ));
        assert_eq!(cli.command.config_path(), Path::new("x.toml"));
    }

    #[test]
    fn test_parse_color_never() {
        let cli = Cli::try_parse_from(["simlife", "--color", "never", "run"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
        assert!(cli.command.is_long_running());
    }

    #[test]
    fn test_predict_requires_product() {
        assert!(Cli::try_parse_from(["simlife", "predict"]).is_err());
    }
}
