//! Output formatting for the CLI.

use colored::*;
use lexrel_domain::traits::Notifier;
use lexrel_domain::{Relation, RelationId};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

use crate::config::OutputFormat;
use crate::error::Result;

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

    /// Format the relation collection.
    pub fn format_relations(&self, relations: &[Relation]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_relations_json(relations),
            OutputFormat::Table => self.format_relations_table(relations),
            OutputFormat::Quiet => self.format_relations_quiet(relations),
        }
    }

    /// Format relations as JSON.
    fn format_relations_json(&self, relations: &[Relation]) -> Result<String> {
        Ok(serde_json::to_string_pretty(relations)?)
    }

    /// Format relations as a table.
    fn format_relations_table(&self, relations: &[Relation]) -> Result<String> {
        if relations.is_empty() {
            return Ok(self.colorize("No relations found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Word 1", "Word 2", "Relation"]);

        for record in relations {
            let id = record.id.to_string();
            builder.push_record([
                &id[..8], // Truncate ID for readability
                record.word1.as_str(),
                record.word2.as_str(),
                record.relation.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    /// Format relations in quiet mode (IDs only).
    fn format_relations_quiet(&self, relations: &[Relation]) -> Result<String> {
        let ids: Vec<String> = relations.iter().map(|r| r.id.to_string()).collect();
        Ok(ids.join("\n"))
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

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a created relation.
    pub fn relation_added(&self, record: &Relation) -> String {
        self.success(&format!(
            "Added relation {}: {} / {} ({})",
            record.id, record.word1, record.word2, record.relation
        ))
    }

    /// Format an updated relation.
    pub fn relation_updated(&self, record: &Relation) -> String {
        self.success(&format!(
            "Updated relation {}: {} / {} ({})",
            record.id, record.word1, record.word2, record.relation
        ))
    }

    /// Format a removed relation.
    pub fn relation_removed(&self, id: &RelationId) -> String {
        self.success(&format!("Removed relation {}", id))
    }

    /// Format a bulk operation result.
    pub fn bulk_result(&self, operation: &str, count: usize) -> String {
        self.success(&format!("{} {} relation(s)", operation, count))
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

/// Notification sink for validator rejections: the CLI's stand-in for
/// the toast popup, printed to stderr so it never mixes with data
/// output.
pub struct ToastNotifier {
    color_enabled: bool,
}

impl ToastNotifier {
    /// Create a new notifier.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }
}

impl Notifier for ToastNotifier {
    fn notify_error(&self, message: &str) {
        let text = format!("✗ {}", message);
        if self.color_enabled {
            eprintln!("{}", text.red());
        } else {
            eprintln!("{}", text);
        }
    }
}
