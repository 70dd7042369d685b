//! Cadastral registry auditor CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use predial_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use predial_cli::commands::{
    ownerless_json, run_diff, run_folders, run_municipalities, run_ownerless, run_report,
};
use predial_cli::logging::{LogConfig, LogFormat, init_logging};
use predial_cli::summary::{print_diff, print_folder_validation, print_report_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Ownerless(args) => {
            let result = run_ownerless(args);
            report(ownerless_json(&result, args.compact).map(|json| println!("{json}")))
        }
        Command::Folders(args) => report(run_folders(args).map(|v| print_folder_validation(&v))),
        Command::Report(args) => report(run_report(args).map(|o| print_report_summary(&o))),
        Command::Diff(args) => report(run_diff(args).map(|o| print_diff(&o))),
        Command::Municipalities(args) => report(run_municipalities(args).map(|codes| {
            for code in codes {
                println!("{code}");
            }
        })),
    };
    std::process::exit(exit_code);
}

fn report(outcome: anyhow::Result<()>) -> i32 {
    match outcome {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level_filter(cli.verbosity.tracing_level_filter());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config = config.with_level_filter(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        });
    }
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
        .with_log_file(cli.log_file.clone())
        .with_timestamps(cli.log_timestamps)
        .with_target(cli.log_target)
        .with_ansi(ansi)
}
