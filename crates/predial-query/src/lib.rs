//! Queries over cadastral registry files.
//!
//! The central query is [`find_ownerless_properties`]: the national property
//! codes whose first natural-person interested party has no identification
//! document. Around it sit the tools used to audit two registry vintages
//! side by side: folder inventory and comparison, generic property
//! selection, code-set differences and the consolidated text report.
//!
//! Loading is all-or-nothing per file. [`try_identify_ownerless_properties`]
//! returns the typed failure; [`identify_ownerless_properties`] logs it and
//! returns the empty result instead.

pub mod error;
pub mod folders;
pub mod ownerless;
pub mod report;
pub mod select;
pub mod tags;

pub use error::{QueryError, Result};
pub use folders::{
    inventory_folder, is_registry_file_name, municipality_code, municipality_codes,
    validate_folders,
};
pub use ownerless::{
    find_ownerless_properties, identify_ownerless_properties, try_identify_ownerless_properties,
};
pub use report::{
    CONSOLIDATED_REPORT_FILE, build_consolidated_report, render_consolidated_report,
    write_consolidated_report,
};
pub use select::{compare_codes, property_code, select_properties};
