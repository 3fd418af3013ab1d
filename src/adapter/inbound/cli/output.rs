//! Terminal output for the `simlife` commands.
//!
//! Three modes, picked once from the global flags:
//!
//! - [`Mode::Human`]: styled fields, sections, tables and a spinner.
//! - [`Mode::Quiet`]: only results ([`item`]) and warnings.
//! - [`Mode::Json`]: each command prints exactly one [`document`] on stdout;
//!   errors go to stderr as `{"error": ...}`.

use std::fmt::Display;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};
use serde_json::json;

/// How results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Human,
    Quiet,
    Json,
}

impl Mode {
    /// `--json` wins over `--quiet`.
    #[must_use]
    pub const fn from_flags(json: bool, quiet: bool) -> Self {
        match (json, quiet) {
            (true, _) => Self::Json,
            (false, true) => Self::Quiet,
            (false, false) => Self::Human,
        }
    }
}

static MODE: OnceLock<Mode> = OnceLock::new();

/// Fix the output mode for the rest of the process. Later calls are ignored.
pub fn configure(mode: Mode) {
    let _ = MODE.set(mode);
}

fn mode() -> Mode {
    MODE.get().copied().unwrap_or_default()
}

fn human() -> bool {
    mode() == Mode::Human
}

#[must_use]
pub fn is_json() -> bool {
    mode() == Mode::Json
}

/// Print the machine-readable result of a command.
pub fn document(value: serde_json::Value) {
    println!("{value}");
}

/// Print a bare result line. Shown in quiet mode so output can be piped.
pub fn item(value: impl Display) {
    if !is_json() {
        println!("{value}");
    }
}

pub fn banner() {
    if human() {
        println!("{} {}", "simlife".bold(), env!("CARGO_PKG_VERSION").dimmed());
        println!();
    }
}

pub fn section(title: &str) {
    if human() {
        println!();
        println!("{}", title.bold());
    }
}

pub fn field(label: &str, value: impl Display) {
    if human() {
        println!("  {:<12} {}", label.dimmed(), value);
    }
}

pub fn success(message: &str) {
    if human() {
        println!("  {} {}", "✓".green(), message);
    }
}

pub fn note(message: &str) {
    if human() {
        println!("  {}", message.dimmed());
    }
}

pub fn hint(message: &str) {
    if human() {
        println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
    }
}

/// Warnings survive `--quiet`; in JSON mode the document carries the facts.
pub fn warning(message: &str) {
    if !is_json() {
        println!("  {} {}", "⚠".yellow(), message);
    }
}

/// Report a failed command on stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "error": message }));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Progress indicator for a long step. Hidden outside human mode.
pub struct Spinner(ProgressBar);

impl Spinner {
    #[must_use]
    pub fn start(message: &str) -> Self {
        if !human() {
            return Self(ProgressBar::hidden());
        }
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_strings(FRAMES)
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self(bar)
    }

    pub fn done(self, message: &str) {
        self.finish("✓".green().to_string(), message);
    }

    pub fn fail(self, message: &str) {
        self.finish("×".red().to_string(), message);
    }

    fn finish(self, mark: String, message: &str) {
        if self.0.is_hidden() {
            self.0.finish_and_clear();
        } else {
            self.0.finish_with_message(format!("{mark} {message}"));
        }
    }
}

/// Colour applied to a table cell after padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Good,
    Bad,
    Dim,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    text: String,
    tone: Tone,
}

impl Cell {
    #[must_use]
    pub fn new(text: impl Display, tone: Tone) -> Self {
        Self {
            text: text.to_string(),
            tone,
        }
    }

    #[must_use]
    pub fn plain(text: impl Display) -> Self {
        Self::new(text, Tone::Plain)
    }
}

/// Fixed-width, left-aligned table. Printed in human mode only.
pub struct Table {
    widths: Vec<usize>,
}

impl Table {
    /// Print the header and separator and return the table for its rows.
    #[must_use]
    pub fn start(columns: &[(&str, usize)]) -> Self {
        let widths: Vec<usize> = columns.iter().map(|(_, width)| *width).collect();
        if human() {
            let names: Vec<Cell> = columns.iter().map(|(name, _)| Cell::plain(name)).collect();
            println!("{}", layout(&names, &widths).dimmed());
            let rule: Vec<Cell> = widths.iter().map(|w| Cell::plain("─".repeat(*w))).collect();
            println!("{}", layout(&rule, &widths).dimmed());
        }
        Self { widths }
    }

    pub fn row(&self, cells: &[Cell]) {
        if human() {
            println!("{}", render(cells, &self.widths));
        }
    }
}

/// Pad every cell to its column width, without colour.
fn layout(cells: &[Cell], widths: &[usize]) -> String {
    let mut line = String::from(" ");
    for (cell, width) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(&format!("{:<width$}", cell.text));
    }
    line
}

/// Pad first, then colour, so escape codes never count toward the width.
fn render(cells: &[Cell], widths: &[usize]) -> String {
    let mut line = String::from(" ");
    for (cell, width) in cells.iter().zip(widths) {
        let padded = format!("{:<width$}", cell.text);
        line.push(' ');
        match cell.tone {
            Tone::Plain => line.push_str(&padded),
            Tone::Good => {
                line.push_str(&padded.if_supports_color(Stream::Stdout, |t| t.green()).to_string());
            }
            Tone::Bad => {
                line.push_str(&padded.if_supports_color(Stream::Stdout, |t| t.red()).to_string());
            }
            Tone::Dim => {
                line.push_str(&padded.if_supports_color(Stream::Stdout, |t| t.dimmed()).to_string());
            }
        }
    }
    line
}
