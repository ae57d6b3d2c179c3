mod enabled;
mod inspect;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use facade_integrations::{Resolver, ResolverConfig};
use facade_message::MessageKind;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Analytics message payload inspector.
#[derive(Parser)]
#[command(name = "facade", version, about = "Analytics message payload inspector")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Resolver config (TOML) overriding the disabled-by-default registry
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the normalized view of a payload
    Inspect {
        /// Path to the payload JSON file
        file: PathBuf,
        /// Message kind (defaults to the payload's `type` field)
        #[arg(long)]
        kind: Option<MessageKind>,
    },

    /// Report which integrations a payload enables, and their settings
    Enabled {
        /// Path to the payload JSON file
        file: PathBuf,
        /// Integration name to check (repeatable)
        #[arg(long = "integration", required = true)]
        integrations: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("warning: logging disabled: {}", e);
    }

    let resolver = load_resolver(cli.config.as_deref(), cli.output);

    match cli.command {
        Commands::Inspect { file, kind } => {
            let raw = read_payload(&file, cli.output);
            inspect::cmd_inspect(&raw, kind, resolver, cli.output);
        }
        Commands::Enabled { file, integrations } => {
            let raw = read_payload(&file, cli.output);
            enabled::cmd_enabled(&raw, &integrations, resolver, cli.output);
        }
    }
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("facade=info".parse()?))
        .with_writer(std::io::stderr)
        .try_init()
}

fn load_resolver(config: Option<&Path>, output: OutputFormat) -> Resolver {
    match config {
        None => Resolver::default(),
        Some(path) => match ResolverConfig::load(path) {
            Ok(config) => config.resolver(),
            Err(e) => {
                report_error(&e.to_string(), output);
                process::exit(1);
            }
        },
    }
}

fn read_payload(path: &Path, output: OutputFormat) -> Value {
    let content = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("could not read '{}': {}", path.display(), e);
            report_error(&msg, output);
            process::exit(1);
        }
    };
    match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("could not parse JSON in '{}': {}", path.display(), e);
            report_error(&msg, output);
            process::exit(1);
        }
    }
}

/// Print a pretty JSON document to stdout.
pub(crate) fn print_json(value: &Value) {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);
}

pub(crate) fn report_error(msg: &str, output: OutputFormat) {
    match output {
        OutputFormat::Text => eprintln!("error: {}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
