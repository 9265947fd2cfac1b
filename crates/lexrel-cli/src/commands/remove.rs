//! Remove command implementation.

use std::io::{self, Write};

use lexrel_domain::RelationId;
use lexrel_editor::EditorError;
use lexrel_store::StoreError;

use crate::cli::RemoveArgs;
use crate::commands::Session;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the remove command.
pub async fn execute_remove(
    args: RemoveArgs,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    if args.ids.is_empty() {
        return Err(CliError::InvalidInput("No relation ids provided".to_string()));
    }

    // Parse IDs up front so a typo aborts before anything is deleted
    let ids: Vec<RelationId> = args
        .ids
        .iter()
        .map(|id| {
            RelationId::from_string(id)
                .map_err(|e| CliError::InvalidInput(format!("Invalid id '{}': {}", id, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    // Confirm deletion unless --yes is specified
    if !args.yes {
        println!("About to remove {} relation(s):", ids.len());
        for id in &ids {
            println!("  - {}", id);
        }
        print!("Continue? [y/N] ");
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    let mut removed = 0;
    for id in ids {
        match session.delete(id).await {
            Ok(()) => removed += 1,
            Err(EditorError::Store(StoreError::NotFound(id))) => {
                println!(
                    "{}",
                    formatter.warning(&format!("Relation {} does not exist", id))
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("{}", formatter.bulk_result("Removed", removed));

    Ok(())
}
