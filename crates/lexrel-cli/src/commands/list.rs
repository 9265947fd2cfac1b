//! List command implementation.

use crate::commands::Session;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the list command.
pub fn execute_list(session: &Session, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_relations(session.relations())?);
    Ok(())
}
