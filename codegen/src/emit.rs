//! Line-oriented source builder and atomic file output.

use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::GenerateError;

/// Indentation unit used by the Verilog emitter.
const INDENT: &str = "    ";

/// Accumulates the lines of a generated source file.
///
/// Lines are joined with `\n` and the finished text carries no trailing
/// newline.
#[derive(Debug, Default)]
pub struct VerilogFile {
    lines: Vec<String>,
    depth: usize,
}

impl VerilogFile {
    /// Creates an empty file at indentation depth zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocates room for `additional` more lines.
    pub fn reserve(&mut self, additional: usize) {
        self.lines.reserve(additional);
    }

    /// Appends a line at the current indentation depth.
    pub fn line(&mut self, text: &str) {
        let mut s = String::with_capacity(self.depth * INDENT.len() + text.len());
        for _ in 0..self.depth {
            s.push_str(INDENT);
        }
        s.push_str(text);
        self.lines.push(s);
    }

    /// Appends an empty line (never indented).
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Increases the indentation depth by `levels`.
    pub fn indent(&mut self, levels: usize) {
        self.depth += levels;
    }

    /// Decreases the indentation depth by `levels`, saturating at zero.
    pub fn dedent(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Joins the accumulated lines into the final text.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Writes `content` to `path`, replacing any existing file atomically.
///
/// The text goes to a temporary file in the destination directory first and
/// is renamed into place only after a successful flush. If anything fails the
/// temporary file is dropped (and removed), so the destination either keeps
/// its previous contents or does not exist. The parent directory is not
/// created.
///
/// A symlink at `path` is followed and its target replaced. An existing
/// file keeps its permissions; a new file gets mode `0644` on Unix.
///
/// # Errors
///
/// Returns [`GenerateError::Io`] if the temporary file cannot be created,
/// written, flushed, or renamed over `path`.
pub fn write_file(path: &Path, content: &str) -> Result<(), GenerateError> {
    let io_err = |source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    };

    let target = resolve_target(path);
    let existing = fs::metadata(&target).ok().map(|m| m.permissions());

    let mut tmp = NamedTempFile::new_in(parent_dir(&target)).map_err(io_err)?;
    tmp.write_all(content.as_bytes()).map_err(io_err)?;
    if let Some(perms) = existing.or_else(new_file_permissions) {
        tmp.as_file().set_permissions(perms).map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(&target).map_err(|e| io_err(e.error))?;

    debug!(path = %target.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Follows a symlink at `path` to the file it names. Anything else,
/// including a dangling link, resolves to `path` itself.
fn resolve_target(path: &Path) -> PathBuf {
    let is_link = fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink());
    if is_link {
        if let Ok(resolved) = fs::canonicalize(path) {
            return resolved;
        }
    }
    path.to_path_buf()
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

/// Reads a previously generated file back into memory.
///
/// # Errors
///
/// Returns [`GenerateError::Io`] if the file cannot be read as UTF-8 text.
pub fn read_file(path: &Path) -> Result<String, GenerateError> {
    fs::read_to_string(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Directory that holds `path`; a bare file name resolves to `.`.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
