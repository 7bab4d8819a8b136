//! Command-line interface definitions.
//!
//! Defines the CLI structure for zenith using `clap`: a `run` command that
//! evaluates one candidate list and publishes the leaderboard, and a
//! `config` group for generating, showing and validating configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::paths;

/// Token leaderboard scoring pipeline
#[derive(Parser, Debug)]
#[command(name = "zenith")]
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

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate candidates and publish the leaderboard
    Run(RunArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `zenith config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// JSON file holding the candidate array, or `-` for stdin.
    #[arg(long, value_name = "FILE")]
    pub candidates: PathBuf,

    /// Path to the configuration file. Defaults apply when omitted and
    /// `~/.zenith/config.toml` does not exist.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Publish to an in-memory store instead of the configured backend.
    #[arg(long)]
    pub dry_run: bool,

    /// Override the number of simultaneous evaluations.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Override the leaderboard capacity.
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Override the minimum security score (0-10).
    #[arg(long)]
    pub min_security_score: Option<f64>,

    /// Override the minimum return ratio.
    #[arg(long)]
    pub min_return_ratio: Option<f64>,

    /// Override the store key the leaderboard is published under.
    #[arg(long)]
    pub key: Option<String>,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_name(), "zenith");
    }

    #[test]
    fn run_requires_candidates() {
        assert!(Cli::try_parse_from(["zenith", "run"]).is_err());
    }

    #[test]
    fn run_parses_overrides() {
        let cli = Cli::try_parse_from([
            "zenith",
            "--json",
            "run",
            "--candidates",
            "tokens.json",
            "--dry-run",
            "--concurrency",
            "3",
            "--max-size",
            "10",
            "--min-security-score",
            "6.5",
        ])
        .unwrap();

        assert!(cli.json);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.candidates, PathBuf::from("tokens.json"));
        assert!(args.dry_run);
        assert_eq!(args.concurrency, Some(3));
        assert_eq!(args.max_size, Some(10));
        assert_eq!(args.min_security_score, Some(6.5));
        assert!(args.config.is_none());
    }

    #[test]
    fn config_show_defaults_path() {
        let cli = Cli::try_parse_from(["zenith", "config", "show"]).unwrap();
        let Commands::Config(ConfigCommand::Show(arg)) = cli.command else {
            panic!("expected config show");
        };
        assert!(arg.config.ends_with("config.toml"));
    }

    #[test]
    fn color_flag_parses() {
        let cli = Cli::try_parse_from(["zenith", "--color", "never", "config", "validate"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
    }
}
