use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File listing of one vintage folder, split by naming convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderInventory {
    pub folder: PathBuf,
    /// Every entry name in the folder, sorted.
    pub all_files: Vec<String>,
    /// Entries named `Registro_catastral_25NNN.xml`, sorted.
    pub valid_files: Vec<String>,
    /// Everything else, sorted.
    pub invalid_files: Vec<String>,
}

/// Comparison of the registry files present in two vintages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderValidation {
    pub previous: FolderInventory,
    pub current: FolderInventory,
    /// Valid files of the current vintage with no counterpart in the previous one.
    pub missing_in_previous: Vec<String>,
    /// Valid files of the previous vintage with no counterpart in the current one.
    pub missing_in_current: Vec<String>,
}

impl FolderValidation {
    pub fn has_differences(&self) -> bool {
        !self.missing_in_previous.is_empty() || !self.missing_in_current.is_empty()
    }
}
