//! Generate Command
//!
//! Implements the `frost-gen` run: generate a header for one input and print
//! it, write it, compare it against an existing file, or dump the resolved
//! declarations as JSON.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use similar::TextDiff;

use crate::config::Config;
use crate::error::FrostError;
use crate::generate::{read_source, Generator};

/// Options for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Header to scan
    pub input: PathBuf,
    /// Write here instead of stdout
    pub output: Option<PathBuf>,
    /// Compare against `output` instead of writing it
    pub check: bool,
    /// Print resolved declarations as JSON
    pub dump_json: bool,
}

/// Outcome of a generate run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStatus {
    /// Output produced (or the checked file is current)
    Done,
    /// `--check` found a stale or missing file
    Stale,
}

/// Execute the generate command
pub fn execute_generate(options: GenerateOptions, config: Config) -> Result<GenerateStatus> {
    let generator = Generator::new(&config).context("Failed to prepare generator")?;
    let source = read_source(&options.input)
        .with_context(|| format!("Cannot generate metadata for {}", options.input.display()))?;

    if options.dump_json {
        println!("{}", declarations_json(&generator, &source)?);
        return Ok(GenerateStatus::Done);
    }

    let generated = generator.generate(&source, &options.input.to_string_lossy())?;

    match (&options.output, options.check) {
        (Some(path), true) => {
            let existing = read_existing(path)?;
            if existing == generated {
                eprintln!("{} {} is up to date", style("✓").green(), path.display());
                return Ok(GenerateStatus::Done);
            }

            eprintln!("{} {} is stale", style("✗").red(), path.display());
            let current = path.display().to_string();
            let diff = TextDiff::from_lines(&existing, &generated);
            eprint!(
                "{}",
                diff.unified_diff()
                    .context_radius(3)
                    .header(&current, "generated")
            );
            Ok(GenerateStatus::Stale)
        }
        (None, true) => anyhow::bail!("--check requires --output"),
        (Some(path), false) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
            }
            std::fs::write(path, &generated).map_err(|source| FrostError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!("Wrote {}", path.display());
            Ok(GenerateStatus::Done)
        }
        (None, false) => {
            print!("{}", generated);
            Ok(GenerateStatus::Done)
        }
    }
}

/// Resolved declarations of `source` as pretty-printed JSON
fn declarations_json(generator: &Generator, source: &str) -> crate::error::Result<String> {
    let declarations = generator.declarations(source);
    Ok(serde_json::to_string_pretty(&declarations)?)
}

/// Current contents of a checked output; a missing file reads as empty
fn read_existing(path: &Path) -> crate::error::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(FrostError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
