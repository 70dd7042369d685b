//! Registry folder inventory and vintage-to-vintage file comparison.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use predial_model::{FolderInventory, FolderValidation};
use regex::Regex;
use tracing::info;

use crate::error::{QueryError, Result};

/// Registry files of Cundinamarca municipalities (DANE department code 25).
static REGISTRY_FILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Registro_catastral_25\d{3}\.xml$").expect("Invalid registry file regex")
});

/// Number of trailing stem characters that form the municipality code.
const MUNICIPALITY_CODE_LEN: usize = 5;

/// Whether a file name follows the `Registro_catastral_25NNN.xml` convention.
pub fn is_registry_file_name(name: &str) -> bool {
    REGISTRY_FILE_REGEX.is_match(name)
}

/// Municipality code of a file: the last five characters of its stem.
///
/// Stems shorter than five characters are returned whole.
pub fn municipality_code(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let skip = stem.chars().count().saturating_sub(MUNICIPALITY_CODE_LEN);
    stem.chars().skip(skip).collect()
}

/// List a vintage folder and split its entries by naming convention.
///
/// # Errors
///
/// Returns an error when the folder cannot be read.
pub fn inventory_folder(folder: &Path) -> Result<FolderInventory> {
    let all_files = list_entries(folder, false)?;
    let (valid_files, invalid_files): (Vec<String>, Vec<String>) = all_files
        .iter()
        .cloned()
        .partition(|name| is_registry_file_name(name));
    Ok(FolderInventory {
        folder: folder.to_path_buf(),
        all_files,
        valid_files,
        invalid_files,
    })
}

/// Compare the registry files of two vintage folders.
///
/// # Errors
///
/// Returns an error when either folder cannot be read.
pub fn validate_folders(previous: &Path, current: &Path) -> Result<FolderValidation> {
    let previous = inventory_folder(previous)?;
    let current = inventory_folder(current)?;

    let validation = FolderValidation {
        missing_in_previous: difference(&current.valid_files, &previous.valid_files),
        missing_in_current: difference(&previous.valid_files, &current.valid_files),
        previous,
        current,
    };
    info!(
        previous_folder = %validation.previous.folder.display(),
        previous_files = validation.previous.all_files.len(),
        previous_valid = validation.previous.valid_files.len(),
        previous_invalid = validation.previous.invalid_files.len(),
        current_folder = %validation.current.folder.display(),
        current_files = validation.current.all_files.len(),
        current_valid = validation.current.valid_files.len(),
        current_invalid = validation.current.invalid_files.len(),
        missing_in_previous = validation.missing_in_previous.len(),
        missing_in_current = validation.missing_in_current.len(),
        "folder validation complete"
    );
    Ok(validation)
}

/// Municipality codes of every regular file in a folder, sorted.
///
/// # Errors
///
/// Returns an error when the folder cannot be read.
pub fn municipality_codes(folder: &Path) -> Result<Vec<String>> {
    Ok(list_entries(folder, true)?
        .iter()
        .map(|name| municipality_code(name))
        .collect())
}

fn list_entries(folder: &Path, files_only: bool) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(folder).map_err(|e| QueryError::io(folder, e))? {
        let entry = entry.map_err(|e| QueryError::io(folder, e))?;
        if files_only && !entry.path().is_file() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

fn difference(left: &[String], right: &[String]) -> Vec<String> {
    let right: BTreeSet<&String> = right.iter().collect();
    left.iter()
        .filter(|name| !right.contains(name))
        .cloned()
        .collect()
}
