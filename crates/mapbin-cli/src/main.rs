/// `mapbin`: decode Celeste map `.bin` files into JSON or XML.
///
/// # Command overview
///
/// ```text
/// mapbin <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Render a map file as JSON or XML
///   inspect    Print header, string table and tree statistics
///   validate   Check that a map file decodes completely
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log decoder details to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                     |
/// |------|---------------------------------------------|
/// | 0    | Success                                     |
/// | 1    | Error (I/O failure, undecodable file, etc.) |
///
/// Logs and error details go to stderr so stdout can be piped cleanly.
/// `RUST_LOG` overrides the default log filter.
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use mapbin_decoder::DecoderConfig;
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_inspect;
mod cmd_validate;
mod source;

// ── CLI root ──────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "mapbin", version, about = "Celeste map .bin decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder details (header, lookup table, node counts) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Render a map file as JSON or XML.
    Decode(DecodeArgs),
    /// Print header, string table and tree statistics.
    Inspect(InspectArgs),
    /// Check that a map file decodes completely.
    Validate(ValidateArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Decoder limits shared by every sub-command.
///
/// ```text
/// ┌────────────────────┬─────────────────────────────────────────┐
/// │ Flag               │ Default                                 │
/// ├────────────────────┼─────────────────────────────────────────┤
/// │ --max-depth        │ 256 nesting levels                      │
/// │ --max-size         │ 67108864 bytes (64 MiB)                 │
/// │ --max-decoded-size │ 268435456 bytes (256 MiB)               │
/// │ --timeout-secs     │ 30                                      │
/// └────────────────────┴─────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct LimitArgs {
    /// Maximum node nesting depth.
    #[arg(long, default_value_t = DecoderConfig::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Maximum document size in bytes.
    #[arg(long, default_value_t = DecoderConfig::DEFAULT_MAX_DOCUMENT_SIZE)]
    pub max_size: usize,

    /// Maximum bytes of names and string values one decode may build.
    #[arg(long, default_value_t = DecoderConfig::DEFAULT_MAX_DECODED_BYTES)]
    pub max_decoded_size: usize,

    /// Give up reading the input after this many seconds.
    #[arg(long, default_value_t = DecoderConfig::DEFAULT_READ_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl LimitArgs {
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            max_depth: self.max_depth,
            max_document_size: self.max_size,
            max_decoded_bytes: self.max_decoded_size,
            read_timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Xml,
}

/// Arguments for `mapbin decode`.
///
/// ```text
/// ┌───────────────────┬──────────────────────────────────────────────┐
/// │ Flag              │ Values / default                             │
/// ├───────────────────┼──────────────────────────────────────────────┤
/// │ --format          │ json (default) | xml                         │
/// │ --compact         │ no indentation                               │
/// │ --xml-declaration │ prefix XML with <?xml …?>                    │
/// │ -o / --output     │ write to file instead of stdout              │
/// └───────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Map file to decode, or `-` for stdin.
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    pub format: FormatArg,

    /// Emit output without indentation.
    #[arg(long)]
    pub compact: bool,

    /// Prefix XML output with an XML declaration.
    #[arg(long)]
    pub xml_declaration: bool,

    /// Write rendered output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub limits: LimitArgs,
}

/// Arguments for `mapbin inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Map file to inspect, or `-` for stdin.
    pub file: PathBuf,

    /// Also list every top-level child of the root.
    #[arg(long)]
    pub children: bool,

    #[command(flatten)]
    pub limits: LimitArgs,
}

/// Arguments for `mapbin validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Map file to validate, or `-` for stdin.
    pub file: PathBuf,

    #[command(flatten)]
    pub limits: LimitArgs,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
