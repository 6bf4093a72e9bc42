//! # File I/O Module
//!
//! Synchronous file plumbing for the release pipeline: whole-file reads into a
//! line sequence (terminators preserved), whole-file writes, and the raw
//! remove-then-copy primitive used by the initial tree-copy step.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// File I/O operations for the release pipeline.
pub struct FileIO;

impl FileIO {
  /// Reads a file completely into memory as a line sequence.
  ///
  /// Lines keep their terminators so a rewrite is byte-faithful for untouched
  /// content. Files that are not valid UTF-8 (binaries in the release tree)
  /// return `None` and are skipped by the caller; a rewrite through a lossy
  /// decode would corrupt them.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be opened or read.
  pub fn read_lines(path: &Path) -> Result<Option<Vec<String>>> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    let Ok(content) = String::from_utf8(bytes) else {
      trace!("Skipping non-UTF-8 file: {}", path.display());
      return Ok(None);
    };

    Ok(Some(content.split_inclusive('\n').map(str::to_string).collect()))
  }

  /// Writes a line sequence back to the file in a single pass.
  pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let content: String = lines.concat();
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }

  /// Replaces `dest` with a raw recursive copy of `source`.
  ///
  /// Any existing destination subtree is removed first so stale files from a
  /// previous release never survive the copy. Symlinks are not followed and
  /// not reproduced.
  ///
  /// # Errors
  ///
  /// Returns an error on any filesystem failure; a partially-populated release
  /// tree is worse than a failed one, so nothing is retried.
  pub fn replace_subtree(source: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
      debug!("Removing stale subtree: {}", dest.display());
      std::fs::remove_dir_all(dest).with_context(|| format!("Failed to remove: {}", dest.display()))?;
    }

    debug!("Copying {} -> {}", source.display(), dest.display());
    for entry in WalkDir::new(source).follow_links(false) {
      let entry = entry.with_context(|| format!("Failed to walk: {}", source.display()))?;
      let relative = entry
        .path()
        .strip_prefix(source)
        .with_context(|| format!("Path escaped copy root: {}", entry.path().display()))?;
      let target = dest.join(relative);

      if entry.file_type().is_dir() {
        std::fs::create_dir_all(&target).with_context(|| format!("Failed to create: {}", target.display()))?;
      } else if entry.file_type().is_file() {
        std::fs::copy(entry.path(), &target)
          .with_context(|| format!("Failed to copy to: {}", target.display()))?;
      } else {
        trace!("Skipping non-regular file: {}", entry.path().display());
      }
    }

    Ok(())
  }
}
