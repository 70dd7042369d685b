//! CLI argument definitions for the registry auditor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "predial-audit",
    version,
    about = "Audit cadastral registry XML files",
    long_about = "Audit cadastral registry XML files (Registro catastral).\n\n\
                  Finds properties without an owner identification document and\n\
                  compares the registry files of two vintages."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module path in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List properties without an owner identification document as JSON.
    Ownerless(OwnerlessArgs),

    /// Compare the registry files present in two vintage folders.
    Folders(FoldersArgs),

    /// Write the consolidated ownerless-property report for a vintage.
    Report(ReportArgs),

    /// List property codes present in one registry file but not in another.
    Diff(DiffArgs),

    /// Print the municipality code of every file in a folder.
    Municipalities(MunicipalitiesArgs),
}

#[derive(Parser)]
pub struct OwnerlessArgs {
    /// Registry XML file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print JSON on a single line.
    #[arg(long = "compact")]
    pub compact: bool,
}

#[derive(Parser)]
pub struct FoldersArgs {
    /// Folder with the previous vintage's registry files.
    #[arg(value_name = "PREVIOUS")]
    pub previous: PathBuf,

    /// Folder with the current vintage's registry files.
    #[arg(value_name = "CURRENT")]
    pub current: PathBuf,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Folder with the previous vintage's registry files (the one reported on).
    #[arg(value_name = "PREVIOUS")]
    pub previous: PathBuf,

    /// Folder with the current vintage's registry files.
    #[arg(value_name = "CURRENT")]
    pub current: PathBuf,

    /// Output directory for the consolidated report.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "resultados")]
    pub output_dir: PathBuf,
}

#[derive(Parser)]
pub struct DiffArgs {
    /// Registry file of the previous vintage.
    #[arg(value_name = "PREVIOUS_FILE")]
    pub previous: PathBuf,

    /// Registry file of the current vintage.
    #[arg(value_name = "CURRENT_FILE")]
    pub current: PathBuf,
}

#[derive(Parser)]
pub struct MunicipalitiesArgs {
    /// Folder whose file names end in a municipality code.
    #[arg(value_name = "DIR")]
    pub folder: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
