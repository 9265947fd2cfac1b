//! Edit command implementation.

use lexrel_domain::RelationId;
use lexrel_editor::EditorError;
use lexrel_store::StoreError;

use crate::cli::EditArgs;
use crate::commands::{validate_word, Session};
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the edit command.
pub async fn execute_edit(
    args: EditArgs,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    let id = RelationId::from_string(&args.id)
        .map_err(|e| CliError::InvalidInput(format!("Invalid id '{}': {}", args.id, e)))?;

    if args.word1.is_none() && args.word2.is_none() && args.relation.is_none() {
        return Err(CliError::InvalidInput(
            "Nothing to change; pass --word1, --word2 or --relation".to_string(),
        ));
    }

    session.begin_edit(id)?;

    let fields = [
        ("word1", &args.word1),
        ("word2", &args.word2),
        ("relation", &args.relation),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            validate_word(name, value)?;
            session.set_edit_field(name, value)?;
        }
    }

    match session.submit_edit().await {
        Ok(record) => println!("{}", formatter.relation_updated(&record)),
        // the notifier already showed the rejection; stay interactive
        Err(EditorError::Store(StoreError::Rejected(_))) => {}
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
