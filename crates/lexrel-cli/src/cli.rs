//! CLI command definitions and argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lexrel CLI - Edit a table of word relations.
#[derive(Debug, Parser)]
#[command(name = "lexrel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new word relation
    Add(AddArgs),

    /// List all word relations
    List,

    /// Edit an existing relation in place
    Edit(EditArgs),

    /// Remove relations by id
    Remove(RemoveArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive editor mode
    Repl,
}

/// Arguments for the add command.
#[derive(Debug, Parser)]
pub struct AddArgs {
    /// First word of the pair
    pub word1: String,

    /// Second word of the pair
    pub word2: String,

    /// Name of the relationship between the words
    pub relation: String,
}

/// Arguments for the edit command.
#[derive(Debug, Parser)]
pub struct EditArgs {
    /// Id of the relation to edit
    pub id: String,

    /// Replace the first word
    #[arg(long)]
    pub word1: Option<String>,

    /// Replace the second word
    #[arg(long)]
    pub word2: Option<String>,

    /// Replace the relationship name
    #[arg(long)]
    pub relation: Option<String>,
}

/// Arguments for the remove command.
#[derive(Debug, Parser)]
pub struct RemoveArgs {
    /// Relation ids to remove
    pub ids: Vec<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Relation service base URL
        #[arg(short, long)]
        url: String,
        /// Snapshot database path
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_command() {
        let cli = Cli::parse_from(["lexrel", "add", "cat", "dog", "opposite"]);
        match cli.command {
            Some(Command::Add(args)) => {
                assert_eq!(args.word1, "cat");
                assert_eq!(args.word2, "dog");
                assert_eq!(args.relation, "opposite");
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_edit_command_partial_fields() {
        let cli = Cli::parse_from(["lexrel", "edit", "some-id", "--relation", "synonym"]);
        match cli.command {
            Some(Command::Edit(args)) => {
                assert_eq!(args.id, "some-id");
                assert!(args.word1.is_none());
                assert_eq!(args.relation.as_deref(), Some("synonym"));
            }
            _ => panic!("Expected Edit command"),
        }
    }

    #[test]
    fn test_remove_command_collects_ids() {
        let cli = Cli::parse_from(["lexrel", "remove", "-y", "id-one", "id-two"]);
        match cli.command {
            Some(Command::Remove(args)) => {
                assert_eq!(args.ids.len(), 2);
                assert!(args.yes);
            }
            _ => panic!("Expected Remove command"),
        }
    }

    #[test]
    fn test_no_command_defaults_to_repl() {
        let cli = Cli::parse_from(["lexrel"]);
        assert!(cli.command.is_none());
    }
}
