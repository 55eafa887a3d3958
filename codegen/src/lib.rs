//! Log table generator.
//!
//! Computes a table of natural logarithms in fixed point (four decimal
//! digits, truncated) and emits it as a combinational Verilog lookup module:
//! one case arm per address, a default arm driving zero.
//!
//! The pipeline is [`table::compute_table`] → [`verilog::render_module`] →
//! [`emit::write_file`]; [`generate`] runs all three.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod emit;
pub mod error;
pub mod table;
pub mod verilog;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use error::GenerateError;
pub use table::{compute_table, DEFAULT_SIZE, SCALE};
pub use verilog::{render_module, render_module_with, ModuleShape};

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "log_table.v";

/// Report of what was generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Number of table entries (case arms, excluding the default arm).
    pub entries: usize,
    /// File written.
    pub path: PathBuf,
    /// Size of the written file in bytes.
    pub bytes: usize,
    /// Largest value in the table (the last entry).
    pub max_value: u32,
}

/// Computes a `size`-entry table, renders it, and writes the module to `out`.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidSize`] if `size` is zero, before any
/// computation, or [`GenerateError::Io`] if the file cannot be written.
pub fn generate(size: usize, out: &Path) -> Result<GenerationReport, GenerateError> {
    generate_with(size, out, &ModuleShape::default())
}

/// Like [`generate`], with a custom module shape.
///
/// # Errors
///
/// Same as [`generate`].
pub fn generate_with(
    size: usize,
    out: &Path,
    shape: &ModuleShape,
) -> Result<GenerationReport, GenerateError> {
    if size == 0 {
        return Err(GenerateError::InvalidSize(size));
    }

    let table = compute_table(size);
    let max_value = table.last().copied().unwrap_or(0);
    debug!(size, max_value, "computed log table");

    let text = render_module_with(&table, shape);
    emit::write_file(out, &text)?;
    info!(entries = size, path = %out.display(), bytes = text.len(), "generated module");

    Ok(GenerationReport {
        entries: size,
        path: out.to_path_buf(),
        bytes: text.len(),
        max_value,
    })
}

/// Checks a previously generated file against a fresh `size`-entry table.
///
/// The file must match the rendered stock module byte for byte. On a
/// mismatch the error names the first wrong case arm, or the first
/// differing line when the arms themselves are intact.
///
/// Returns the number of case arms verified.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidSize`] if `size` is zero,
/// [`GenerateError::Io`] if the file cannot be read, an arm error from
/// [`verilog::check_arms`], or [`GenerateError::LineMismatch`] if the file
/// does not match.
pub fn verify(size: usize, path: &Path) -> Result<usize, GenerateError> {
    if size == 0 {
        return Err(GenerateError::InvalidSize(size));
    }

    let text = emit::read_file(path)?;
    let table = compute_table(size);
    let expected = render_module(&table);
    if text != expected {
        verilog::check_arms(&text, &table)?;
        return Err(GenerateError::LineMismatch {
            line: verilog::first_differing_line(&text, &expected),
        });
    }
    info!(entries = size, path = %path.display(), "verified module");
    Ok(size)
}
