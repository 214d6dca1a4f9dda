//! tome CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tome_cli::commands::{
    load_config, run_aggregate, run_diff, run_domains, run_normalize, run_snapshot,
    run_validate, selected_domains,
};
use tome_cli::logging::{LogConfig, LogFormat, init_logging};
use tome_cli::summary::{
    print_aggregate_summary, print_diff_summary, print_pipeline_summary, print_snapshot,
    print_validation_summary,
};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    if let Command::Domains = cli.command {
        run_domains();
        return 0;
    }
    let config = match load_config(cli.root.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error:#}");
            return 1;
        }
    };
    match cli.command {
        Command::Normalize(args) => {
            let report = run_normalize(&config, &selected_domains(&args.domains));
            print_pipeline_summary(&report);
            i32::from(report.has_failures())
        }
        Command::Aggregate(args) => {
            let result = run_aggregate(&config, &selected_domains(&args.domains));
            print_aggregate_summary(&result);
            i32::from(result.has_errors())
        }
        Command::Validate(args) => match run_validate(&config, &selected_domains(&args.domains)) {
            Ok(result) => {
                print_validation_summary(&result);
                i32::from(result.has_errors())
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Snapshot => match run_snapshot(&config) {
            Ok((snapshot, path)) => {
                print_snapshot(&snapshot, &path);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Diff => match run_diff(&config) {
            Ok((diffs, path)) => {
                print_diff_summary(&diffs, &path);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Domains => 0,
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
