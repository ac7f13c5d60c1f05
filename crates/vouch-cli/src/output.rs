//! Output formatting for the CLI.

use colored::*;
use serde_json::{json, Map, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use vouch_domain::ClaimRecord;
use vouch_tally::{GapRegistry, UNKNOWN_STATUS};

use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::pipeline::Outcome;

/// Issues shown in the human report.
const SHOWN_ISSUES: usize = 5;

/// Longest key result shown in a table cell.
const KEY_RESULT_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn render_table(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the result of a check run.
    pub fn format_check(&self, outcome: &Outcome, config: &Config) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(outcome.document(config).to_json_pretty()?),
            OutputFormat::Table => Ok(self.format_check_text(outcome, config)),
        }
    }

    fn format_check_text(&self, outcome: &Outcome, config: &Config) -> String {
        let aggregate = &outcome.aggregate;
        let validation = &outcome.validation;
        let mut lines = Vec::new();

        lines.push(self.heading(&self.title(config)));
        if let Some(date) = &config.ledger.date {
            lines.push(format!("Date: {}", date));
        }
        lines.push(String::new());
        lines.push(format!("Claims:    {}", aggregate.total));
        lines.push(format!("Passed:    {}/{}", aggregate.passed, aggregate.total));
        lines.push(format!(
            "All pass:  {}",
            self.verdict(aggregate.all_pass, "YES", "NO")
        ));
        for skipped in outcome.assembly.skipped() {
            lines.push(self.warning(&format!("Skipped optional stage '{}'", skipped)));
        }

        if !aggregate.sectors.is_empty() {
            lines.push(String::new());
            lines.push(self.heading(&format!(
                "Sector verdicts -- {}",
                self.verdict(aggregate.sectors_pass(), "all hold", "some fail")
            )));
            for (sector, ok) in &aggregate.sectors {
                lines.push(format!("  {} {}", self.verdict(*ok, "PASS", "FAIL"), sector));
            }
        }

        for (tier, stats) in &aggregate.tiers {
            lines.push(String::new());
            lines.push(self.heading(&format!(
                "Tier {}: {} -- {}/{} pass {}",
                tier,
                stats.name,
                stats.passed,
                stats.total,
                self.verdict(stats.all_pass(), "[complete]", "[incomplete]")
            )));

            let mut builder = Builder::default();
            builder.push_record(["ID", "Result", "Status", "Key result"]);
            for id in &stats.members {
                if let Some(record) = outcome.assembly.ledger.get(id.as_str()) {
                    builder.push_record(self.claim_row(record));
                }
            }
            lines.push(render_table(builder));
        }

        lines.push(String::new());
        lines.push(self.heading("Status distribution"));
        for (status, count) in &aggregate.status_counts {
            lines.push(format!("  [{:14}] {:3}  {}", status, count, "#".repeat(*count)));
        }

        if let Some(reasons) = &aggregate.structural_reasons {
            lines.push(String::new());
            lines.push(self.heading("Structural reasons"));
            for (id, reason) in reasons {
                lines.push(format!("  {:14} {}", id.as_str(), reason));
            }
        }

        lines.push(String::new());
        lines.push(self.heading("Dependency validation"));
        lines.push(format!("  Checked: {}", validation.total_checked));
        lines.push(format!(
            "  Valid:   {}",
            self.verdict(validation.valid, "yes", "no")
        ));
        lines.push(format!("  Cycles:  {}", validation.cycles_found()));
        if !validation.issues.is_empty() {
            lines.push(format!("  Issues:  {}", validation.issues.len()));
            for issue in validation.issues.iter().take(SHOWN_ISSUES) {
                lines.push(format!("    - {}", issue));
            }
            if validation.issues.len() > SHOWN_ISSUES {
                lines.push(format!(
                    "    ... and {} more",
                    validation.issues.len() - SHOWN_ISSUES
                ));
            }
        }

        lines.join("\n")
    }

    fn claim_row(&self, record: &ClaimRecord) -> [String; 4] {
        [
            record.id().to_string(),
            self.verdict(record.is_passed(), "PASS", "FAIL"),
            record.epistemic().unwrap_or(UNKNOWN_STATUS).to_string(),
            truncate(record.key_result().unwrap_or_default(), KEY_RESULT_WIDTH),
        ]
    }

    /// Format the gap audit.
    pub fn format_audit(&self, outcome: &Outcome, config: &Config) -> Result<String> {
        let registry = config.tally.gaps.as_ref().ok_or_else(|| {
            CliError::Config("No gap registry configured; add a [tally.gaps] section".into())
        })?;
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &self.audit_json(outcome, registry),
            )?),
            OutputFormat::Table => Ok(self.format_audit_text(outcome, config, registry)),
        }
    }

    fn audit_json(&self, outcome: &Outcome, registry: &GapRegistry) -> Value {
        let mut classes = Map::new();
        let mut theorems = Map::new();
        if let Some(gaps) = &outcome.aggregate.gaps {
            for (class, members) in &gaps.by_class {
                classes.insert(
                    class.clone(),
                    json!({
                        "description": registry.describe(class).unwrap_or_default(),
                        "claims": members,
                    }),
                );
            }
            for record in outcome.assembly.ledger.records() {
                let id = record.id().as_str();
                let mut entry = json!({
                    "tier": record.tier(),
                    "gap_type": gaps.class_of(id),
                });
                if let Some(reason) = outcome
                    .aggregate
                    .structural_reasons
                    .as_ref()
                    .and_then(|reasons| reasons.get(id))
                {
                    entry["ps_reason"] = json!(reason);
                }
                if let Some(note) = registry.note(id) {
                    entry["anchor"] = json!(note.anchor);
                    entry["gap"] = json!(note.gap);
                    entry["to_close"] = json!(note.to_close);
                }
                theorems.insert(id.to_string(), entry);
            }
        }
        json!({ "classes": classes, "theorems": theorems })
    }

    fn format_audit_text(&self, outcome: &Outcome, config: &Config, registry: &GapRegistry) -> String {
        let mut lines = Vec::new();
        lines.push(self.heading(&format!("Gap audit -- {}", self.title(config))));

        let Some(gaps) = &outcome.aggregate.gaps else {
            return lines.join("\n");
        };

        lines.push(String::new());
        let mut summary = Builder::default();
        summary.push_record(["Class", "Claims", "Description"]);
        for (class, members) in &gaps.by_class {
            summary.push_record([
                class.clone(),
                members.len().to_string(),
                registry.describe(class).unwrap_or_default().to_string(),
            ]);
        }
        lines.push(render_table(summary));

        for (tier, stats) in &outcome.aggregate.tiers {
            lines.push(String::new());
            lines.push(self.heading(&format!("Tier {}: {}", tier, stats.name)));

            let mut builder = Builder::default();
            builder.push_record(["ID", "Class", "Anchor", "Gap", "To close"]);
            for id in &stats.members {
                let note = registry.note(id.as_str());
                builder.push_record([
                    id.to_string(),
                    gaps.class_of(id.as_str()).unwrap_or_default().to_string(),
                    note.map(|n| n.anchor.clone()).unwrap_or_default(),
                    note.map(|n| n.gap.clone()).unwrap_or_default(),
                    note.map(|n| n.to_close.clone()).unwrap_or_default(),
                ]);
            }
            lines.push(render_table(builder));
        }

        lines.join("\n")
    }

    /// Format the effective configuration.
    pub fn format_config(&self, config: &Config) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
            OutputFormat::Table => config.to_toml(),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn title(&self, config: &Config) -> String {
        let title = config.ledger.title.as_deref().unwrap_or("Claim ledger");
        match &config.ledger.version {
            Some(version) => format!("{} v{}", title, version),
            None => title.to_string(),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn verdict(&self, ok: bool, pass: &str, fail: &str) -> String {
        if ok {
            self.colorize(pass, "green")
        } else {
            self.colorize(fail, "red")
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
