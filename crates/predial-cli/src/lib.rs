//! CLI library components for the cadastral registry auditor.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
