//! errdoc - Entry Point

use clap::Parser;
use errdoc::model::error::AppError;
use std::path::PathBuf;
use tracing::info;

/// errdoc - flatten error events into sparse JSON documents
#[derive(Parser, Debug)]
#[command(name = "errdoc")]
#[command(version)]
#[command(about = "Convert JSON Lines error events into sparse, flat error documents")]
pub struct Args {
    /// Path to JSON Lines input (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Pretty-print each output document
    #[arg(short, long)]
    pub pretty: bool,

    /// Wrap each document as {"processor": ..., "error": ...}
    #[arg(short, long)]
    pub envelope: bool,

    /// Stop at the first malformed input line instead of skipping it
    #[arg(long)]
    pub fail_on_malformed: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Resolve configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = errdoc::config::load_config_with_precedence(args.config.clone())?;
        let merged = errdoc::config::merge_config(config_file);
        let with_env = errdoc::config::apply_env_overrides(merged);

        // Flags can only switch behaviour on; absent flags defer to file/env.
        errdoc::config::apply_cli_overrides(
            with_env,
            args.pretty.then_some(true),
            args.envelope.then_some(true),
            args.fail_on_malformed.then_some(true),
        )
    };

    errdoc::logging::init(config.log_file_path.as_deref())?;

    info!(config = ?config, "Configuration loaded and resolved");

    let source = errdoc::source::detect_input_source(args.file.clone())?;
    let source_name = source.describe();
    info!(source = %source_name, "Converting error events");

    let assembler = errdoc::document::ErrorDocumentAssembler::new();
    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    let stats = errdoc::integration::convert_lines(source, &assembler, &config, &mut out)?;

    info!(
        source = %source_name,
        lines = stats.lines_read,
        documents = stats.documents_written,
        malformed = stats.malformed_lines,
        exceptions = stats.exceptions_flattened,
        "Conversion finished"
    );

    Ok(())
}
