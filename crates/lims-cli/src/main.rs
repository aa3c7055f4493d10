//! LIMS client core CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod logging;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{run_decode, run_encode, run_form, run_resources, run_schema, run_vocab};
use crate::logging::{LogConfig, LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));

    let result = match &cli.command {
        Command::Decode(args) => run_decode(args),
        Command::Encode(args) => run_encode(args),
        Command::Resources(args) => run_resources(args),
        Command::Schema(args) => run_schema(args),
        Command::Form(args) => run_form(args),
        Command::Vocab(args) => run_vocab(args),
    };

    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter: LevelFilter = cli.verbosity.tracing_level_filter();
    LogConfig {
        level_filter,
        use_env_filter: !cli.verbosity.is_present(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        },
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
    }
}
