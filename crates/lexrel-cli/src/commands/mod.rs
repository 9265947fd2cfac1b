//! Command implementations.

pub mod add;
pub mod edit;
pub mod list;
pub mod profile;
pub mod remove;

pub use self::add::execute_add;
pub use self::edit::execute_edit;
pub use self::list::execute_list;
pub use self::profile::execute_profile;
pub use self::remove::execute_remove;

use lexrel_editor::EditorSession;
use lexrel_gatekeeper::{Gatekeeper, ValidationConfig};
use lexrel_remote::RelationClient;
use lexrel_store::{RelationStore, SqliteKv};

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::ToastNotifier;

/// The editor session every data command drives.
pub type Session = EditorSession<SqliteKv, RelationClient, ToastNotifier>;

/// Open an editor session for the active profile: snapshot database,
/// remote client, gatekeeper per the configured validation mode.
pub async fn open_session(config: &Config, color_enabled: bool) -> Result<Session> {
    let profile = config.get_active_profile()?;
    tracing::debug!(profile = %config.active_profile, url = %profile.service_url, "opening session");

    let db = profile.database_path()?;
    if let Some(parent) = db.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let open_kv = || {
        SqliteKv::open(&db).map_err(|e| {
            CliError::Config(format!("Failed to open database {}: {}", db.display(), e))
        })
    };
    let kv = open_kv()?;
    let forms = open_kv()?;

    let validation = if config.settings.strict_validation {
        ValidationConfig::strict()
    } else {
        ValidationConfig::default()
    };

    let remote = RelationClient::new(profile.service_url.as_str());
    let store = RelationStore::open(kv, remote, Gatekeeper::new(validation)).await;

    Ok(EditorSession::new(
        store,
        forms,
        ToastNotifier::new(color_enabled),
    ))
}

/// Enforce the input layer's word shape: 2-18 alphabetic characters.
///
/// This mirrors the form's input pattern; the core itself accepts any
/// non-empty string.
pub fn validate_word(label: &str, value: &str) -> Result<()> {
    let length_ok = (2..=18).contains(&value.chars().count());
    if length_ok && value.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!(
            "{} '{}' must be 2-18 letters",
            label, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_word_accepts_letters() {
        assert!(validate_word("word1", "cat").is_ok());
        assert!(validate_word("word1", "Incomprehensible").is_ok());
    }

    #[test]
    fn test_validate_word_rejects_bad_shapes() {
        assert!(validate_word("word1", "a").is_err()); // too short
        assert!(validate_word("word1", "abcdefghijklmnopqrs").is_err()); // too long
        assert!(validate_word("word1", "cat!").is_err()); // punctuation
        assert!(validate_word("word1", "two words").is_err()); // space
        assert!(validate_word("word1", "").is_err());
    }
}
