//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "lims-client",
    version,
    about = "LIMS client core - inspect navigation, resources, and form schemas",
    long_about = "Developer tooling for the LIMS client core.\n\n\
                  Decodes navigation paths, composes the resource registry from the\n\
                  static fixture and a server schema snapshot, and prints the form\n\
                  schemas the generic edit views would build."
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

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a navigation path into its stack segments.
    Decode(DecodeArgs),

    /// Encode stack segments back into a navigation path.
    Encode(EncodeArgs),

    /// Compose and list the resource registry.
    Resources(SnapshotArgs),

    /// Print one resource's field schema.
    Schema(SchemaArgs),

    /// Print the form schema generated for one resource.
    Form(SchemaArgs),

    /// Look up a vocabulary scope (exact or regex).
    Vocab(VocabArgs),
}

#[derive(Parser)]
pub struct DecodeArgs {
    /// The path, e.g. 'list/screen/search/small molecule/rpp/50'.
    #[arg(value_name = "PATH")]
    pub path: String,
}

#[derive(Parser)]
pub struct EncodeArgs {
    /// Stack segments in order.
    #[arg(value_name = "SEGMENT", required = true)]
    pub segments: Vec<String>,
}

#[derive(Parser)]
pub struct SnapshotArgs {
    /// Server resource snapshot (JSON listing), merged with the bundled
    /// fixture.
    #[arg(long = "server-schema", value_name = "FILE")]
    pub server_schema: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Resource key, e.g. 'screen' or 'screeners'.
    #[arg(value_name = "RESOURCE")]
    pub resource: String,

    /// Server resource snapshot (JSON listing).
    #[arg(long = "server-schema", value_name = "FILE")]
    pub server_schema: Option<PathBuf>,

    /// Vocabulary listing (JSON), used to resolve field choices.
    #[arg(long = "vocabularies", value_name = "FILE")]
    pub vocabularies: Option<PathBuf>,
}

#[derive(Parser)]
pub struct VocabArgs {
    /// Vocabulary scope; regexes match against all known scopes.
    #[arg(value_name = "SCOPE")]
    pub scope: String,

    /// Vocabulary listing (JSON).
    #[arg(long = "vocabularies", value_name = "FILE", required = true)]
    pub vocabularies: PathBuf,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
