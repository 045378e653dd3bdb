//! # chatmorph - OpenAI / Anthropic chat payload converter
//!
//! Command-line front end for the conversion library. Reads a JSON payload
//! from a file or stdin, converts it in the requested direction and writes
//! the result to stdout. Diagnostics go to stderr so the output stays pure
//! JSON.
//!
//! ```bash
//! chatmorph convert --from openai --to anthropic request.json
//! cat message.json | chatmorph message --from anthropic --to openai
//! chatmorph tool --from anthropic --to openai --strict-tools tools.json
//! chatmorph config validate
//! ```
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use chatmorph::config::LogLevel;
use chatmorph::config::cli::ConfigCli;
use chatmorph::{Config, ConvertOptions, FormatConverter, ImageDetail};

/* --- constants ------------------------------------------------------------------------------ */

/** the version as defined in cargo.toml */
const VERSION: &str = env!("CARGO_PKG_VERSION");

/* --- types ----------------------------------------------------------------------------------- */

#[derive(Parser)]
#[command(name = "chatmorph", version = VERSION)]
#[command(about = "Convert chat-completion payloads between OpenAI and Anthropic formats", long_about = None)]
struct Cli {
    /// Path to an additional config file (highest priority after env vars)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a whole request payload
    Convert(ConvertArgs),
    /// Convert a single message; prints a JSON array of messages
    Message(ConvertArgs),
    /// Convert one tool definition or an array of them
    Tool(ConvertArgs),
    /// Inspect and check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// List configuration file locations
    Path,
    /// Print a documented example configuration
    Example,
    /// Validate configuration files and values
    Validate,
}

#[derive(Args)]
struct ConvertArgs {
    /// Source format: openai or anthropic
    #[arg(long)]
    from: String,

    /// Target format: openai or anthropic
    #[arg(long)]
    to: String,

    /// Detail hint for images produced in OpenAI format: auto, low or high
    #[arg(long, value_name = "DETAIL")]
    image_detail: Option<ImageDetail>,

    /// Set the strict flag on tool definitions produced in OpenAI format
    #[arg(long, overrides_with = "no_strict_tools")]
    strict_tools: bool,

    /// Clear the strict flag even when configuration enables it
    #[arg(long, overrides_with = "strict_tools")]
    no_strict_tools: bool,

    /// Print compact single-line JSON
    #[arg(long)]
    compact: bool,

    /// Input file; stdin when omitted or "-"
    file: Option<PathBuf>,
}

/// Which converter operation a conversion command runs
#[derive(Debug, Clone, Copy)]
enum Operation {
    Request,
    Message,
    Tool,
}

/* --- start of code -------------------------------------------------------------------------- */

///
/// Main entry point.
///
/// Any error is printed to stderr and turned into exit code 1.
fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error:");
            for cause in e.chain() {
                eprintln!("  {}", cause);
            }
            std::process::exit(1);
        }
    }
}

///
/// Parse the command line and dispatch.
///
/// # Returns
///  * `Ok(true)` on success
///  * `Ok(false)` when the command ran but reported a failure
///  * `Err` if the command could not run
fn run() -> Result<bool> {
    // .env must be loaded before clap and the config loader read the environment
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let explicit = cli.config.as_deref();

    match cli.command {
        Command::Config(command) => {
            initialize_logging(LogLevel::Warn);
            run_config_command(command, explicit)
        }
        Command::Convert(args) => run_conversion(Operation::Request, &args, explicit),
        Command::Message(args) => run_conversion(Operation::Message, &args, explicit),
        Command::Tool(args) => run_conversion(Operation::Tool, &args, explicit),
    }
}

///
/// Initialize logging on stderr.
///
/// `RUST_LOG` wins over the configured level when it is set.
///
/// # Arguments
///  * `level` - configured log level
fn initialize_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_config_command(command: ConfigCommand, explicit: Option<&Path>) -> Result<bool> {
    let mut stdout = io::stdout().lock();

    match command {
        ConfigCommand::Show => {
            ConfigCli::show(&mut stdout, explicit).context("Failed to show configuration")?
        }
        ConfigCommand::Path => ConfigCli::path(&mut stdout)?,
        ConfigCommand::Example => ConfigCli::example(&mut stdout)?,
        ConfigCommand::Validate => return Ok(ConfigCli::validate(&mut stdout, explicit)?),
    }

    Ok(true)
}

///
/// Run one of the conversion commands.
///
/// # Arguments
///  * `operation` - which converter operation to apply
///  * `args` - direction, overrides and input
///  * `explicit` - optional `--config` file
fn run_conversion(operation: Operation, args: &ConvertArgs, explicit: Option<&Path>) -> Result<bool> {
    let config = Config::load(explicit).context("Failed to load configuration")?;
    initialize_logging(config.logging.level);
    debug!("chatmorph v{} starting {:?} conversion", VERSION, operation);

    let options = conversion_options(&config, args);
    let converter = chatmorph::select_with_options(&args.from, &args.to, options)?;

    let input = read_input(args.file.as_deref())?;
    let payload: Value = serde_json::from_str(&input).context("Input is not valid JSON")?;

    let output = convert(converter.as_ref(), operation, &payload)
        .with_context(|| format!("Failed to convert {} payload to {}", args.from, args.to))?;

    let pretty = config.output.pretty && !args.compact;
    let rendered =
        if pretty { serde_json::to_string_pretty(&output)? } else { serde_json::to_string(&output)? };
    println!("{}", rendered);

    info!("converted {} -> {}", converter.source(), converter.target());
    Ok(true)
}

/// Command-line flags win over configuration
fn conversion_options(config: &Config, args: &ConvertArgs) -> ConvertOptions {
    let defaults = config.convert_options();
    let strict_tools = match (args.strict_tools, args.no_strict_tools) {
        (true, _) => true,
        (_, true) => false,
        _ => defaults.strict_tools,
    };

    ConvertOptions::default()
        .with_image_detail(args.image_detail.unwrap_or(defaults.image_detail))
        .with_strict_tools(strict_tools)
}

fn convert(converter: &dyn FormatConverter, operation: Operation, payload: &Value) -> chatmorph::Result<Value> {
    match operation {
        Operation::Request => converter.convert_request(payload),
        Operation::Message => Ok(Value::Array(converter.convert_message(payload)?)),
        Operation::Tool => match payload {
            Value::Array(tools) => Ok(Value::Array(
                tools
                    .iter()
                    .map(|tool| converter.convert_tool_schema(tool))
                    .collect::<chatmorph::Result<Vec<_>>>()?,
            )),
            tool => converter.convert_tool_schema(tool),
        },
    }
}

///
/// Read the whole input from a file or stdin.
///
/// # Arguments
///  * `file` - input path; `None` or `-` reads stdin
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file '{}'", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).context("Failed to read stdin")?;
            Ok(input)
        }
    }
}
