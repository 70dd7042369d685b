//! Consolidated ownerless-property report across a vintage folder.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use predial_model::{ConsolidatedReport, MunicipalityReport};
use tracing::{info, info_span};

use crate::error::{QueryError, Result};
use crate::folders::municipality_code;
use crate::ownerless::identify_ownerless_properties;

/// File name of the consolidated report inside the output folder.
pub const CONSOLIDATED_REPORT_FILE: &str = "Reporte_Consolidado.txt";

const REPORT_TITLE: &str = "Reporte consolidado de predios sin propietarios asociados";
const REPORT_RULE: &str = "--------------------------------------------------------";

/// Run the ownerless query over `file_names` inside `folder`.
///
/// Files that fail to load contribute an empty result; the failure is
/// logged by the query itself.
pub fn build_consolidated_report(folder: &Path, file_names: &[String]) -> ConsolidatedReport {
    let span = info_span!("consolidated_report", folder = %folder.display());
    let _guard = span.enter();

    let municipalities: Vec<MunicipalityReport> = file_names
        .iter()
        .map(|file_name| MunicipalityReport {
            file_name: file_name.clone(),
            municipality_code: municipality_code(file_name),
            result: identify_ownerless_properties(&folder.join(file_name)),
        })
        .collect();

    let report = ConsolidatedReport {
        source_folder: folder.to_path_buf(),
        municipalities,
    };
    info!(
        files = report.municipalities.len(),
        ownerless = report.total_count(),
        "consolidated report built"
    );
    report
}

/// Render the report as plain text, one section per registry file.
pub fn render_consolidated_report(
    report: &ConsolidatedReport,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{REPORT_TITLE}");
    let _ = writeln!(out, "{REPORT_RULE}");
    let _ = writeln!(
        out,
        "Generado: {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    let _ = writeln!(out);
    for municipality in &report.municipalities {
        let _ = writeln!(out, "----    RESULTADOS {}:    ----", municipality.file_name);
        let _ = writeln!(
            out,
            "Cantidad de predios sin propietarios: {}",
            municipality.result.count
        );
        let _ = writeln!(out, "Números prediales únicos:");
        for code in &municipality.result.property_codes {
            let _ = writeln!(out, "- {code}");
        }
        let _ = writeln!(out);
    }
    out
}

/// Write the report to [`CONSOLIDATED_REPORT_FILE`] under `output_dir`.
///
/// The directory is created when missing. Returns the written path.
///
/// # Errors
///
/// Returns an error when the directory or file cannot be written.
pub fn write_consolidated_report(
    output_dir: &Path,
    report: &ConsolidatedReport,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| QueryError::io(output_dir, e))?;
    let path = output_dir.join(CONSOLIDATED_REPORT_FILE);
    let contents = render_consolidated_report(report, Utc::now());
    fs::write(&path, contents).map_err(|e| QueryError::io(&path, e))?;
    info!(path = %path.display(), "consolidated report written");
    Ok(path)
}
