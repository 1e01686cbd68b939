//! CLI for refbib - Extract and format bibliographic references.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use refbib::{
    builtin_style_names, output::format_names, run as run_pipeline, CitationStyle, ConfigError,
    ConfigProvider, ExportFormat, InteractivePrompt, RecordMode, RunConfig, RunError,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Extract bibliographic references from plain text and export them as citations
#[derive(Parser)]
#[command(name = "refbib")]
#[command(version)]
#[command(after_help = "\
Examples:
  refbib process refs.txt --style abnt --format txt
  refbib process refs.txt -s apa -f json --typed
  refbib interactive
  refbib styles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a plain-text reference list
    #[command(after_help = "\
Examples:
  refbib process refs.txt
  refbib process refs.txt -s abnt -f txt
  refbib process refs.txt -s bibtex -f bib

References are separated by one or more blank lines.
The output is written next to the input, e.g. refs.txt -> refsabnt.txt, refs.bib, refsapa.json")]
    Process {
        /// Input text file
        input: PathBuf,

        /// Citation style
        #[arg(short, long, default_value = "bibtex", value_parser = PossibleValuesParser::new(builtin_style_names()))]
        style: String,

        /// Export format
        #[arg(short, long, default_value = "txt", value_parser = PossibleValuesParser::new(format_names()))]
        format: String,

        /// Include the entry type and citation key in JSON/YAML records
        #[arg(long)]
        typed: bool,
    },

    /// Ask for the input file, style and format interactively
    Interactive {
        /// Include the entry type and citation key in JSON/YAML records
        #[arg(long)]
        typed: bool,
    },

    /// List available citation styles
    Styles,

    /// List available export formats
    Formats,
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — input file not found / unreadable
    InputFile(String),
    /// Exit 11 — interactive configuration failed
    Config(String),
    /// Exit 15 — cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::Config(_) => 11,
            AppError::OutputFile(_) => 15,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(f, "{}\n  hint: verify the file path is correct", msg)
            }
            AppError::Config(msg) => {
                write!(f, "{}", msg)
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the input directory is writable",
                    msg
                )
            }
        }
    }
}

impl From<RunError> for AppError {
    fn from(e: RunError) -> Self {
        match e {
            RunError::Input { .. } => AppError::InputFile(e.to_string()),
            RunError::Export(_) => AppError::OutputFile(e.to_string()),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::InputNotFound(_) | ConfigError::MissingInput => {
                AppError::InputFile(e.to_string())
            }
            ConfigError::Io(_) => AppError::Config(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            style,
            format,
            typed,
        } => {
            let mut config = RunConfig {
                input,
                style: CitationStyle::from_name(&style),
                format: ExportFormat::from_name(&format),
                mode: record_mode(typed),
            };
            process_command(&mut config)?;
        }
        Commands::Interactive { typed } => {
            let stdin = io::stdin();
            let mut prompt =
                InteractivePrompt::new(stdin.lock(), io::stdout()).with_mode(record_mode(typed));
            process_command(&mut prompt)?;
        }
        Commands::Styles => {
            for name in builtin_style_names() {
                println!("{}", name);
            }
        }
        Commands::Formats => {
            for name in format_names() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn record_mode(typed: bool) -> RecordMode {
    if typed {
        RecordMode::Typed
    } else {
        RecordMode::Legacy
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Run the pipeline with configuration from `provider`.
fn process_command(provider: &mut dyn ConfigProvider) -> Result<(), AppError> {
    let config = provider.provide()?;
    let summary = run_pipeline(&config)?;

    eprintln!(
        "exported {} reference(s) to {}",
        summary.entries,
        summary.output_path.display()
    );

    Ok(())
}
