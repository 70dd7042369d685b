use std::path::PathBuf;

use predial_model::{ConsolidatedReport, FolderValidation};

#[derive(Debug)]
pub struct ReportOutcome {
    pub validation: FolderValidation,
    pub report: ConsolidatedReport,
    pub report_path: PathBuf,
}

#[derive(Debug)]
pub struct DiffOutcome {
    pub previous_count: usize,
    pub current_count: usize,
    pub new_codes: Vec<String>,
}
