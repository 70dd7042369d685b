pub mod folders;
pub mod query;
pub mod report;

pub use folders::{FolderInventory, FolderValidation};
pub use query::QueryResult;
pub use report::{ConsolidatedReport, MunicipalityReport};
