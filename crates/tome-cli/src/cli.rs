//! CLI argument definitions for the catalog pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tome_model::Domain;

#[derive(Parser)]
#[command(
    name = "tome",
    version,
    about = "Normalize, merge and validate the tome content catalog",
    long_about = "Normalize legacy spell, monster and magic item datasets into one \
                  canonical schema.\n\n\
                  Base (SRD) and custom datasets are normalized separately, merged by id \
                  with custom records taking precedence, and validated against the \
                  per-domain schemas."
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

    /// Project root (default: $TOME_PROJECT_ROOT, then the current directory).
    #[arg(long = "root", value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize raw datasets and rebuild the merged artifacts.
    Normalize(DomainArgs),

    /// Merge existing normalized artifacts without renormalizing.
    Aggregate(DomainArgs),

    /// Validate merged artifacts and write the validation log.
    Validate(DomainArgs),

    /// Count the records in every normalized dataset.
    Snapshot,

    /// Compare normalized datasets against the legacy baseline.
    Diff,

    /// List the supported catalog domains.
    Domains,
}

#[derive(Parser)]
pub struct DomainArgs {
    /// Restrict the run to a domain (repeatable; default: all domains).
    #[arg(long = "domain", short = 'd', value_name = "DOMAIN", value_parser = parse_domain)]
    pub domains: Vec<Domain>,
}

fn parse_domain(value: &str) -> Result<Domain, String> {
    value.parse::<Domain>().map_err(|error| format!("{error}"))
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn domain_flags_accept_aliases() {
        let cli = Cli::parse_from(["tome", "normalize", "-d", "monster", "--domain", "magic_items"]);
        let Command::Normalize(args) = cli.command else {
            panic!("expected normalize");
        };
        assert_eq!(args.domains, vec![Domain::Monsters, Domain::MagicItems]);
    }

    #[test]
    fn unknown_domain_is_rejected() {
        assert!(Cli::try_parse_from(["tome", "validate", "-d", "potions"]).is_err());
    }

    #[test]
    fn root_is_global() {
        let cli = Cli::parse_from(["tome", "snapshot", "--root", "/tmp/catalog"]);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/catalog")));
    }
}
