//! Gatekeeper configuration

/// Configuration for validation rules
///
/// The defaults preserve the legacy acceptance behavior; `strict()`
/// enables the corrected variants of both quirks.
#[derive(Debug, Clone, Copy)]
pub struct ValidationConfig {
    /// Run the rotation check even when the existing collection is
    /// empty. When off, the check only applies while there are existing
    /// records to scan, so the first record of a collection is never
    /// rotation-checked.
    pub rotation_check_on_empty: bool,

    /// Re-run validation when a record is edited in place. When off,
    /// only the add path is validated.
    pub revalidate_on_update: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            rotation_check_on_empty: false,
            revalidate_on_update: false,
        }
    }
}

impl ValidationConfig {
    /// Corrected behavior: rotation always checked, edits re-validated.
    pub fn strict() -> Self {
        Self {
            rotation_check_on_empty: true,
            revalidate_on_update: true,
        }
    }
}
