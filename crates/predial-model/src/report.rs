use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::query::QueryResult;

/// Ownerless-property result for one municipality registry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalityReport {
    /// Registry file name, e.g. `Registro_catastral_25436.xml`.
    pub file_name: String,
    /// Five-digit municipality code taken from the file name.
    pub municipality_code: String,
    pub result: QueryResult,
}

/// Ownerless-property results for every registry file of a vintage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedReport {
    pub source_folder: PathBuf,
    pub municipalities: Vec<MunicipalityReport>,
}

impl ConsolidatedReport {
    /// Sum of ownerless codes across all municipalities.
    pub fn total_count(&self) -> usize {
        self.municipalities.iter().map(|m| m.result.count).sum()
    }
}
