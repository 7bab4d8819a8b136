//! Handler for the `run` command.

use std::io::Read;
use std::path::Path;

use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{output, paths};
use crate::domain::{Candidate, ScoredCandidate};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::{Config, RunOverrides};
use crate::port::inbound::{LeaderboardRunner, RunReport};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    config.apply_overrides(&overrides(args, output::verbosity()))?;
    config.init_logging();

    let candidates = read_candidates(&args.candidates)?;
    let pipeline = bootstrap::build_pipeline(&config)?;

    if !output::is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
        output::field("Candidates", candidates.len());
        output::field("Store", config.store.backend);
        if args.dry_run {
            output::warning("Dry-run mode enabled - leaderboard kept in memory only");
        }
    }

    let report = pipeline.run(candidates).await?;
    print_report(&report)
}

/// Load `path`, or the default config file when it exists, or defaults.
#[allow(clippy::result_large_err)]
fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }
    let default_path = paths::default_config();
    if default_path.exists() {
        return Config::load(default_path);
    }
    Config::parse_toml("")
}

/// Build config overrides from `run` flags. `-v` raises the log filter to
/// `debug` and `-vv` to `trace` unless `--log-level` is given.
fn overrides(args: &RunArgs, verbose: u8) -> RunOverrides {
    let verbose_level = match verbose {
        0 => None,
        1 => Some("debug".to_string()),
        _ => Some("trace".to_string()),
    };
    RunOverrides {
        concurrency: args.concurrency,
        max_leaderboard_size: args.max_size,
        min_security_score: args.min_security_score,
        min_return_ratio: args.min_return_ratio,
        leaderboard_key: args.key.clone(),
        log_level: args.log_level.clone().or(verbose_level),
        dry_run: args.dry_run,
    }
}

/// Read the candidate array from `path`, or stdin when `path` is `-`.
#[allow(clippy::result_large_err)]
fn read_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    parse_candidates(&content)
}

/// Parse and check a JSON candidate array.
#[allow(clippy::result_large_err)]
pub fn parse_candidates(content: &str) -> Result<Vec<Candidate>> {
    let candidates: Vec<Candidate> = serde_json::from_str(content)
        .map_err(|e| Error::Input(format!("expected a JSON array of candidates: {e}")))?;

    for (i, candidate) in candidates.iter().enumerate() {
        for (field, value) in [
            ("chain", &candidate.chain),
            ("address", &candidate.address),
            ("series_id", &candidate.series_id),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Input(format!("candidate {i} has an empty {field}")));
            }
        }
    }
    Ok(candidates)
}

#[derive(Tabled)]
struct LeaderboardRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Chain")]
    chain: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Ratio")]
    return_ratio: f64,
    #[tabled(rename = "Security")]
    security_score: f64,
    #[tabled(rename = "Composite")]
    composite: f64,
}

impl LeaderboardRow {
    fn new(rank: usize, entry: &ScoredCandidate) -> Self {
        Self {
            rank,
            chain: entry.chain.clone(),
            address: entry.address.clone(),
            return_ratio: entry.return_ratio,
            security_score: entry.security_score,
            composite: entry.composite,
        }
    }
}

fn print_report(report: &RunReport) -> Result<()> {
    if output::is_json() {
        output::json_output(&serde_json::to_value(report)?);
        return Ok(());
    }

    output::section("Run");
    output::field("Run ID", report.run_id);
    output::field("Key", &report.leaderboard_key);
    output::field(
        "Duration",
        format!(
            "{}ms",
            (report.finished_at - report.started_at).num_milliseconds()
        ),
    );
    output::field("Candidates", report.candidates);
    output::field("Scored", output::highlight(report.scored));
    output::field("Rejected", report.rejected());

    if !report.rejections.is_empty() {
        output::section("Rejections");
        for (reason, count) in &report.rejections {
            output::field(reason.as_str(), count);
        }
    }

    output::section("Leaderboard");
    if report.leaderboard.is_empty() {
        output::note("No candidate qualified; the published leaderboard is empty.");
    } else {
        let rows = report
            .leaderboard
            .iter()
            .enumerate()
            .map(|(i, entry)| LeaderboardRow::new(i + 1, entry));
        output::table(&Table::new(rows).to_string());
    }
    output::success(&format!(
        "Published {} entries to {}",
        report.leaderboard_size, report.leaderboard_key
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::adapter::inbound::cli::command::{Cli, Commands};

    fn parse_run(argv: &[&str]) -> (RunArgs, u8) {
        let cli = Cli::try_parse_from(argv).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        (args, cli.verbose)
    }

    #[test]
    fn verbose_flag_raises_log_level() {
        let (args, verbose) = parse_run(&["zenith", "run", "--candidates", "x"]);
        assert_eq!(overrides(&args, verbose).log_level, None);

        let (args, verbose) = parse_run(&["zenith", "-v", "run", "--candidates", "x"]);
        assert_eq!(overrides(&args, verbose).log_level.as_deref(), Some("debug"));

        let (args, verbose) = parse_run(&["zenith", "-vvv", "run", "--candidates", "x"]);
        assert_eq!(overrides(&args, verbose).log_level.as_deref(), Some("trace"));
    }

    #[test]
    fn explicit_log_level_wins_over_verbose() {
        let (args, verbose) =
            parse_run(&["zenith", "-vv", "run", "--candidates", "x", "--log-level", "warn"]);
        assert_eq!(overrides(&args, verbose).log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn parses_candidates_with_alias() {
        let candidates = parse_candidates(
            r#"[
                {"chain": "1", "address": "0xa", "series_id": "alpha"},
                {"chain": "56", "address": "0xb", "coingecko_id": "beta"}
            ]"#,
        )
        .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].series_id, "beta");
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_candidates("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(matches!(
            parse_candidates(r#"{"chain": "1"}"#),
            Err(Error::Input(_))
        ));
    }

    #[test]
    fn rejects_blank_fields() {
        let result = parse_candidates(r#"[{"chain": "1", "address": " ", "series_id": "a"}]"#);
        match result {
            Err(Error::Input(message)) => assert!(message.contains("candidate 0 has an empty address")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
