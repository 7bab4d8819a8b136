//! Terminal output for CLI handlers.
//!
//! Human-readable lines use colored symbols; `--json` switches every helper
//! to one JSON object per line (`{"type": ..., "payload": ...}`) so scripts
//! can consume the stream. `--quiet` suppresses everything except warnings,
//! errors and JSON.

use std::fmt::Display;
use std::io::IsTerminal;
use std::sync::OnceLock;

use owo_colors::{OwoColorize, Style};
use parking_lot::RwLock;
use serde_json::json;

use super::command::ColorChoice;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
    /// Emit ANSI colors.
    pub color: bool,
}

impl OutputConfig {
    /// Resolve `color` against the terminal: `auto` colors only when stdout
    /// is a TTY.
    #[must_use]
    pub fn new(json: bool, quiet: bool, verbose: u8, color: ColorChoice) -> Self {
        let color = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stdout().is_terminal(),
        };
        Self {
            json,
            quiet,
            verbose,
            color,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    *config_cell().read()
}

fn suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

fn paint(value: impl Display, style: Style) -> String {
    if read_config().color {
        value.style(style).to_string()
    } else {
        value.to_string()
    }
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *config_cell().write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Number of `-v` flags given.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("header", json!({ "app": "zenith", "version": version }));
        return;
    }
    if suppressed(config) {
        return;
    }
    println!(
        "{} {}",
        paint("zenith", Style::new().bold()),
        paint(version, Style::new().dimmed())
    );
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();
    if config.json {
        emit_json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    if suppressed(config) {
        return;
    }
    let label = paint(format!("{label:<14}"), Style::new().dimmed());
    println!("  {label} {value}");
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if suppressed(config) {
        return;
    }
    println!("  {} {}", paint("✓", Style::new().green()), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    if is_json() {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }
    println!("  {} {}", paint("⚠", Style::new().yellow()), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!(
            "{}",
            json!({ "type": "error", "payload": { "message": message } })
        );
        return;
    }
    eprintln!("  {} {}", paint("×", Style::new().red()), message);
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    if suppressed(config) {
        return;
    }
    println!();
    println!("{}", paint(title, Style::new().bold()));
}

/// Print a dimmed note.
pub fn note(message: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("note", json!({ "message": message }));
        return;
    }
    if suppressed(config) {
        return;
    }
    println!("  {}", paint(message, Style::new().dimmed()));
}

/// Print a pre-rendered table, indented. Skipped in JSON mode, where the
/// caller emits the underlying data instead.
pub fn table(rendered: &str) {
    let config = read_config();
    if config.json || suppressed(config) {
        return;
    }
    for line in rendered.lines() {
        println!("  {line}");
    }
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    if is_json() {
        return value.to_string();
    }
    paint(value, Style::new().cyan())
}

/// Emit a JSON value directly as a single line.
pub fn json_output(value: &serde_json::Value) {
    println!("{value}");
}
