use std::time::Instant;

use anyhow::{Context, Result};
use predial_model::{FolderValidation, QueryResult};
use predial_query::{
    build_consolidated_report, compare_codes, identify_ownerless_properties, municipality_codes,
    select_properties, validate_folders, write_consolidated_report,
};
use predial_xml::XmlDocument;
use tracing::{info, info_span, warn};

use crate::cli::{DiffArgs, FoldersArgs, MunicipalitiesArgs, OwnerlessArgs, ReportArgs};
use crate::types::{DiffOutcome, ReportOutcome};

/// Run the ownerless query on one file.
///
/// Load failures are logged by the query and produce the empty result.
pub fn run_ownerless(args: &OwnerlessArgs) -> QueryResult {
    let span = info_span!("ownerless", file = %args.file.display());
    let _guard = span.enter();
    let start = Instant::now();
    let result = identify_ownerless_properties(&args.file);
    info!(
        ownerless = result.count,
        duration_ms = start.elapsed().as_millis(),
        "ownerless query complete"
    );
    result
}

pub fn ownerless_json(result: &QueryResult, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(result)
    } else {
        serde_json::to_string_pretty(result)
    };
    json.context("serialize ownerless result")
}

pub fn run_folders(args: &FoldersArgs) -> Result<FolderValidation> {
    let validation = validate_folders(&args.previous, &args.current).context("validate folders")?;
    warn_on_differences(&validation);
    Ok(validation)
}

pub fn run_report(args: &ReportArgs) -> Result<ReportOutcome> {
    let span = info_span!(
        "report",
        previous = %args.previous.display(),
        current = %args.current.display()
    );
    let _guard = span.enter();

    let validation = validate_folders(&args.previous, &args.current).context("validate folders")?;
    warn_on_differences(&validation);

    let start = Instant::now();
    let report = build_consolidated_report(&args.previous, &validation.previous.valid_files);
    let report_path = write_consolidated_report(&args.output_dir, &report)
        .with_context(|| format!("write report to {}", args.output_dir.display()))?;
    info!(
        files = report.municipalities.len(),
        ownerless = report.total_count(),
        duration_ms = start.elapsed().as_millis(),
        "report complete"
    );

    Ok(ReportOutcome {
        validation,
        report,
        report_path,
    })
}

pub fn run_diff(args: &DiffArgs) -> Result<DiffOutcome> {
    let previous = XmlDocument::load(&args.previous)
        .with_context(|| format!("load {}", args.previous.display()))?;
    let current = XmlDocument::load(&args.current)
        .with_context(|| format!("load {}", args.current.display()))?;

    let previous = select_properties(&previous, |_| true);
    let current = select_properties(&current, |_| true);
    let new_codes = compare_codes(&previous.property_codes, &current.property_codes);
    info!(
        previous = previous.count,
        current = current.count,
        new = new_codes.len(),
        "diff complete"
    );

    Ok(DiffOutcome {
        previous_count: previous.count,
        current_count: current.count,
        new_codes,
    })
}

pub fn run_municipalities(args: &MunicipalitiesArgs) -> Result<Vec<String>> {
    municipality_codes(&args.folder)
        .with_context(|| format!("list {}", args.folder.display()))
}

fn warn_on_differences(validation: &FolderValidation) {
    for (label, inventory) in [
        ("previous", &validation.previous),
        ("current", &validation.current),
    ] {
        if !inventory.invalid_files.is_empty() {
            warn!(
                vintage = label,
                folder = %inventory.folder.display(),
                files = %inventory.invalid_files.join(", "),
                "files not matching the registry naming convention"
            );
        }
    }
    if validation.has_differences() {
        warn!(
            missing_in_previous = %validation.missing_in_previous.join(", "),
            missing_in_current = %validation.missing_in_current.join(", "),
            "registry files differ between vintages"
        );
    }
}
