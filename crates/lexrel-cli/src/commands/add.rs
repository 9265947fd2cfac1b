//! Add command implementation.

use lexrel_editor::EditorError;
use lexrel_store::StoreError;

use crate::cli::AddArgs;
use crate::commands::{validate_word, Session};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the add command.
pub async fn execute_add(
    args: AddArgs,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    validate_word("word1", &args.word1)?;
    validate_word("word2", &args.word2)?;
    validate_word("relation", &args.relation)?;

    session.set_add_field("word1", &args.word1)?;
    session.set_add_field("word2", &args.word2)?;
    session.set_add_field("relation", &args.relation)?;

    match session.submit_add().await {
        Ok(record) => println!("{}", formatter.relation_added(&record)),
        // the notifier already showed the rejection; stay interactive
        Err(EditorError::Store(StoreError::Rejected(_))) => {}
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
