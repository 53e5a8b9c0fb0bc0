//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use scribe_answer::Answer;
use scribe_domain::ResultRecord;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format query result records.
    pub fn format_results(&self, records: &[ResultRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => self.format_results_table(records),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| r.doc_id.clone())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a validated answer.
    pub fn format_answer(&self, answer: &Answer) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "query": answer.query,
                    "answer": answer.answer,
                    "citations": answer.citations,
                    "retrieved": answer.retrieved,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(answer.citations.join("\n")),
            OutputFormat::Table => {
                let mut out = String::new();
                out.push_str(&answer.answer);
                out.push_str("\n\n");
                if answer.citations.is_empty() {
                    out.push_str(&self.colorize("No citations.", "yellow"));
                } else {
                    out.push_str(&self.colorize(
                        &format!("Citations: {}", answer.citations.join(", ")),
                        "cyan",
                    ));
                }
                out.push('\n');
                out.push_str(&self.format_results_table(&answer.retrieved)?);
                Ok(out)
            }
        }
    }

    /// Render the reason trails beneath the result table.
    pub fn format_reasons(&self, records: &[ResultRecord]) -> String {
        let mut out = String::new();
        for record in records {
            out.push_str(&self.colorize(&record.doc_id, "cyan"));
            out.push('\n');
            for reason in &record.reasons {
                out.push_str("  - ");
                out.push_str(reason);
                out.push('\n');
            }
        }
        out
    }

    fn format_results_table(&self, records: &[ResultRecord]) -> Result<String> {
        if records.is_empty() {
            return Ok(self.colorize("No results found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Rank", "Doc", "Type", "Final", "Sim", "Updated", "Title"]);

        for (rank, record) in records.iter().enumerate() {
            builder.push_record([
                &(rank + 1).to_string(),
                &record.doc_id,
                &record.doc_type,
                &format!("{:.4}", record.score_final),
                &format!("{:.4}", record.score_sim),
                &record.last_updated,
                &record.title,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
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
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
