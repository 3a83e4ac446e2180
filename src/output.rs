//! Output formatting for human and JSON modes
//!
//! Probe results can be rendered either as colored text for a terminal or as
//! machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{Status, TestResult};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// The answer to one capability question
#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome {
    /// Capability name (e.g. `canRewrite`, `moduleLoaded(rewrite)`)
    pub name: String,
    /// `true` / `false` / `null`
    pub status: Status,
    /// Diagnostic info from the probe
    pub info: String,
}

impl ProbeOutcome {
    /// Pair a probe name with its result
    pub fn new(name: impl Into<String>, result: TestResult) -> Self {
        Self {
            name: name.into(),
            status: result.status,
            info: result.info,
        }
    }

    /// Render the outcome
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.human_line()),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }

    /// One line of human output: name, colored status, info
    #[must_use]
    pub fn human_line(&self) -> String {
        let status = match self.status {
            Status::Success => "yes".green().bold(),
            Status::Failure => "no".red().bold(),
            Status::Inconclusive => "unknown".yellow().bold(),
        };
        if self.info.is_empty() {
            format!("{:<34} {status}", self.name)
        } else {
            format!("{:<34} {status}  ({})", self.name, self.info)
        }
    }
}

/// Results of a full capability report
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// URL that was probed
    pub base_url: String,
    /// When the report was produced (RFC 3339)
    pub generated_at: String,
    /// One entry per probe, in run order
    pub results: Vec<ProbeOutcome>,
}

impl Report {
    /// Start an empty report for `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            results: Vec::new(),
        }
    }

    /// Number of results with the given status
    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Render the report
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("Capabilities of {}\n", self.base_url);
        for outcome in &self.results {
            println!("  {}", outcome.human_line());
        }
        println!(
            "\n{} supported, {} unsupported, {} inconclusive",
            self.count(Status::Success),
            self.count(Status::Failure),
            self.count(Status::Inconclusive)
        );
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
