//! Interactive editor mode (Read-Eval-Print Loop).
//!
//! A table-with-forms editor at the prompt: `list` renders the table,
//! `add` is the add form, `edit`/`set`/`submit`/`cancel` drive the
//! inline edit row, and validator rejections appear as red toast lines
//! on stderr.

use std::path::PathBuf;

use lexrel_domain::form::FIELD_NAMES;
use lexrel_domain::RelationId;
use lexrel_editor::EditorError;
use lexrel_store::StoreError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::{self, validate_word, Session};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Run the interactive editor.
pub async fn run_repl(config: &mut Config, formatter: &Formatter, color_enabled: bool) -> Result<()> {
    println!(
        "{}",
        formatter.info("lexrel editor - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let mut editor = DefaultEditor::new().map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut session = commands::open_session(config, color_enabled).await?;

    loop {
        let prompt = if session.editing().is_some() {
            "lexrel (editing)> "
        } else {
            "lexrel> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut session, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
enum ReplCommand {
    Exit,
    Help,
    Add {
        word1: String,
        word2: String,
        relation: String,
    },
    List,
    Edit {
        id: String,
    },
    Set {
        field: String,
        value: String,
    },
    Form,
    Submit,
    Cancel,
    Remove {
        id: String,
    },
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        [] => Err(CliError::InvalidInput("Empty command".to_string())),
        ["exit" | "quit" | "q"] => Ok(ReplCommand::Exit),
        ["help" | "?"] => Ok(ReplCommand::Help),
        ["list" | "ls"] => Ok(ReplCommand::List),
        ["add", word1, word2, relation] => Ok(ReplCommand::Add {
            word1: word1.to_string(),
            word2: word2.to_string(),
            relation: relation.to_string(),
        }),
        ["add", ..] => Err(CliError::InvalidInput(
            "Usage: add <word1> <word2> <relation>".to_string(),
        )),
        ["edit", id] => Ok(ReplCommand::Edit { id: id.to_string() }),
        ["edit", ..] => Err(CliError::InvalidInput("Usage: edit <id>".to_string())),
        ["set", field, value] => Ok(ReplCommand::Set {
            field: field.to_string(),
            value: value.to_string(),
        }),
        ["set", ..] => Err(CliError::InvalidInput(
            "Usage: set <field> <value>".to_string(),
        )),
        ["form"] => Ok(ReplCommand::Form),
        ["submit"] => Ok(ReplCommand::Submit),
        ["cancel"] => Ok(ReplCommand::Cancel),
        ["remove" | "rm", id] => Ok(ReplCommand::Remove { id: id.to_string() }),
        ["remove" | "rm", ..] => Err(CliError::InvalidInput("Usage: remove <id>".to_string())),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: ReplCommand,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::List => {
            println!("{}", formatter.format_relations(session.relations())?);
        }
        ReplCommand::Add {
            word1,
            word2,
            relation,
        } => {
            validate_word("word1", &word1)?;
            validate_word("word2", &word2)?;
            validate_word("relation", &relation)?;

            session.set_add_field("word1", &word1)?;
            session.set_add_field("word2", &word2)?;
            session.set_add_field("relation", &relation)?;

            match session.submit_add().await {
                Ok(record) => println!("{}", formatter.relation_added(&record)),
                Err(EditorError::Store(StoreError::Rejected(_))) => {}
                Err(e) => return Err(e.into()),
            }
        }
        ReplCommand::Edit { id } => {
            let id = RelationId::from_string(&id)
                .map_err(|e| CliError::InvalidInput(format!("Invalid id '{}': {}", id, e)))?;
            session.begin_edit(id)?;
            println!(
                "{}",
                formatter.info("Editing; 'set <field> <value>', then 'submit' or 'cancel'")
            );
            print_form(session, formatter);
        }
        ReplCommand::Set { field, value } => {
            validate_word(&field, &value)?;
            // targets the edit row while editing, the add form otherwise
            if session.editing().is_some() {
                session.set_edit_field(&field, &value)?;
            } else {
                session.set_add_field(&field, &value)?;
            }
        }
        ReplCommand::Form => {
            print_form(session, formatter);
        }
        ReplCommand::Submit => {
            let result = if session.editing().is_some() {
                session.submit_edit().await.map(|r| (r, "Updated"))
            } else {
                session.submit_add().await.map(|r| (r, "Added"))
            };
            match result {
                Ok((record, "Updated")) => println!("{}", formatter.relation_updated(&record)),
                Ok((record, _)) => println!("{}", formatter.relation_added(&record)),
                Err(EditorError::Store(StoreError::Rejected(_))) => {}
                Err(e) => return Err(e.into()),
            }
        }
        ReplCommand::Cancel => {
            if session.editing().is_some() {
                session.cancel_edit();
            } else {
                println!("{}", formatter.info("Nothing to cancel"));
            }
        }
        ReplCommand::Remove { id } => {
            let id = RelationId::from_string(&id)
                .map_err(|e| CliError::InvalidInput(format!("Invalid id '{}': {}", id, e)))?;
            session.delete(id).await?;
            println!("{}", formatter.relation_removed(&id));
        }
        ReplCommand::Exit | ReplCommand::Help => unreachable!(),
    }

    Ok(())
}

/// Show the fields of the form currently in play.
fn print_form(session: &Session, formatter: &Formatter) {
    let editing = session.editing().is_some();
    for name in FIELD_NAMES {
        let value = if editing {
            session.edit_field(name)
        } else {
            session.add_field(name)
        };
        println!("  {}: {}", name, value.unwrap_or(""));
    }
    if !editing {
        println!("{}", formatter.info("(add form)"));
    }
}

fn print_help(formatter: &Formatter) {
    println!("Commands:");
    println!("  add <word1> <word2> <relation>   Add a relation");
    println!("  list                             Show all relations");
    println!("  edit <id>                        Start editing a relation");
    println!("  set <field> <value>              Set a form field (word1, word2, relation)");
    println!("  form                             Show the current form");
    println!("  submit                           Submit the current form");
    println!("  cancel                           Abandon the current edit");
    println!("  remove <id>                      Remove a relation");
    println!("  help                             Show this help");
    println!("  exit                             Quit");
    println!();
    println!(
        "{}",
        formatter.info("Outside an edit, 'set' and 'submit' drive the add form")
    );
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::data_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        match parse_repl_command("add cat dog opposite") {
            Ok(ReplCommand::Add { word1, .. }) => assert_eq!(word1, "cat"),
            _ => panic!("Expected Add"),
        }
    }

    #[test]
    fn test_parse_add_wrong_arity() {
        assert!(parse_repl_command("add cat dog").is_err());
    }

    #[test]
    fn test_parse_aliases() {
        assert!(matches!(parse_repl_command("ls"), Ok(ReplCommand::List)));
        assert!(matches!(parse_repl_command("q"), Ok(ReplCommand::Exit)));
        assert!(matches!(
            parse_repl_command("rm some-id"),
            Ok(ReplCommand::Remove { .. })
        ));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(parse_repl_command("frobnicate").is_err());
    }
}
