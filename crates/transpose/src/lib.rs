//! Command-line driver for `transpose-codegen`.
//!
//! Reads a program AST serialized as JSON by the front end, resolves the
//! generation options from config files and flags, and writes the
//! TypeScript output to a file or stdout.

pub mod config;
pub mod logging;

use anyhow::Context;
use clap::Parser;
use config::{ModeArg, TransposeConfig};
use std::io::Write;
use std::path::PathBuf;
use transpose_codegen::{Program, TranspileError, transpile_with};

#[derive(Debug, Parser)]
#[command(name = "transpose", version, about = "Lower a JSON program AST to TypeScript")]
pub struct Cli {
    /// JSON file holding the program AST
    pub input: PathBuf,

    /// Write the output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Generation mode (overrides config)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Translate every item and report all failures instead of stopping at the first
    #[arg(long)]
    pub keep_going: bool,

    /// Extra config file, applied over global and project config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Items that were left out of a partial translation.
#[derive(Debug, Default)]
pub struct Outcome {
    pub errors: Vec<TranspileError>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Resolve config for a run started in `root`.
pub fn resolve_config(cli: &Cli, root: &std::path::Path) -> anyhow::Result<TransposeConfig> {
    let config = TransposeConfig::load(root);
    match &cli.config {
        Some(path) => Ok(config.merge(TransposeConfig::load_explicit(path)?)),
        None => Ok(config),
    }
}

/// Translate `cli.input` and write the result to `cli.output` or `stdout`.
pub fn run(cli: &Cli, config: &TransposeConfig, stdout: &mut dyn Write) -> anyhow::Result<Outcome> {
    let options = config.options(cli.mode, cli.keep_going);

    let json = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let program = Program::from_json(&json)
        .with_context(|| format!("failed to parse AST from {}", cli.input.display()))?;
    tracing::debug!(
        input = %cli.input.display(),
        items = program.items.len(),
        mode = options.mode.name(),
        "loaded program"
    );

    let transpiled = transpile_with(&program, &options)?;

    match &cli.output {
        Some(path) => std::fs::write(path, &transpiled.output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => stdout
            .write_all(transpiled.output.as_bytes())
            .context("failed to write output")?,
    }

    Ok(Outcome {
        errors: transpiled.errors,
    })
}
