//! footprint-synth: parametric SOIC/QFN footprint generator.
//!
//! Runs as an MCP server on stdio by default, or generates a single
//! footprint from a JSON parameter file with `generate`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use footprint_synth::config::{self, Config};
use footprint_synth::error::CliError;
use footprint_synth::footprint::{self, DrawingStyle, RawParams};
use footprint_synth::kicad;
use footprint_synth::mcp::McpServer;

/// Parametric SOIC/QFN footprint generator.
///
/// Serves footprint generation to AI assistants over MCP, or renders a
/// single footprint from a parameter file.
#[derive(Parser, Debug)]
#[command(name = "footprint-synth")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP server on stdio (default)
    Serve,

    /// Generate one footprint from a JSON parameter file
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Package family (SOIC or QFN)
    #[arg(long)]
    family: String,

    /// Footprint name
    #[arg(long)]
    name: String,

    /// JSON object of datasheet parameters
    #[arg(long, value_name = "FILE")]
    params: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Footprint model as JSON
    Json,
    /// KiCad `.kicad_mod` S-expression
    Kicad,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a JSON object of parameters.
fn load_params(path: &Path) -> Result<RawParams, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::ParamsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&contents).map_err(|e| CliError::ParamsParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    footprint::raw_params_from_json(&object).map_err(|e| CliError::ParamsValue {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Runs the `generate` command.
fn generate(args: &GenerateArgs, style: &DrawingStyle) -> Result<(), CliError> {
    let raw = load_params(&args.params)?;
    let fp = footprint::generate_footprint_with_style(&args.family, &args.name, &raw, style)?;

    let text = match args.format {
        Format::Json => serde_json::to_string_pretty(&fp).map_err(CliError::Serialise)? + "\n",
        Format::Kicad => kicad::to_kicad_mod(&fp),
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, text).map_err(|e| kicad::OutputError::file_write(path, e))?;
            info!(path = %path.display(), pads = fp.pads.len(), "footprint written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Runs the MCP server until the client disconnects or a signal arrives.
fn serve(cfg: Config) -> ExitCode {
    info!(version = env!("CARGO_PKG_VERSION"), "Starting footprint-synth server");

    let allowed_paths = if cfg.allowed_paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cfg.allowed_paths
    };
    info!(allowed_paths = ?allowed_paths, "Allowed paths configured");

    let mut server = McpServer::new(allowed_paths, cfg.style);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    match runtime.block_on(server.run()) {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}

/// Prints an error and its chain of causes to stderr.
fn report(err: &dyn std::error::Error) {
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

/// Entry point for footprint-synth.
fn main() -> ExitCode {
    let args = Args::parse();

    let cfg = match config::load_config_or_default(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    match args.command {
        None | Some(Command::Serve) => serve(cfg),
        Some(Command::Generate(ref generate_args)) => match generate(generate_args, &cfg.style) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                report(&e);
                ExitCode::FAILURE
            }
        },
    }
}
