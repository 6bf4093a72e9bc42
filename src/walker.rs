//! # Walker Module
//!
//! This module enumerates the destination tree exactly once, top-down,
//! applying the traversal policy: at the root level, descent is restricted to
//! the release allow-list; below the root, traversal is unrestricted. Any file
//! literally named `METADATA` is deleted on sight and never reaches the
//! transformation pipeline.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};

/// Name of the internal metadata file deleted from the release tree.
pub const METADATA_FILENAME: &str = "METADATA";

/// Default allow-list of root-level subtrees that hold released code.
pub const DEFAULT_SUBTREES: &[&str] = &["cpp", "proto"];

/// Traversal policy over one destination root.
pub struct TreeWalker {
  /// Root-level subtrees to descend into; `None` lifts the restriction.
  allowed_subtrees: Option<Vec<String>>,

  /// When false, the walk covers exactly one directory level.
  recurse: bool,
}

impl TreeWalker {
  /// Creates a walker.
  ///
  /// # Parameters
  ///
  /// * `allowed_subtrees` - Root-level allow-list, or `None` for unrestricted traversal
  /// * `recurse` - Whether to descend below the first directory level
  pub const fn new(allowed_subtrees: Option<Vec<String>>, recurse: bool) -> Self {
    Self {
      allowed_subtrees,
      recurse,
    }
  }

  /// Computes the child directory names to descend into from a directory at
  /// the given depth, as pure data.
  ///
  /// Returns `None` when every child may be descended into. Subtrees outside
  /// the allow-list are never visited, not even for deletion-only inspection.
  pub fn allowed_children(&self, depth: usize) -> Option<&[String]> {
    if depth == 0 {
      self.allowed_subtrees.as_deref()
    } else {
      None
    }
  }

  /// Walks one destination root and returns the files to transform.
  ///
  /// `METADATA` files are deleted during the walk, before any transformation
  /// is attempted on the files around them, and are excluded from the result.
  ///
  /// # Errors
  ///
  /// Returns an error if a directory cannot be read or a `METADATA` file
  /// cannot be deleted; a filesystem error aborts the whole run.
  pub fn walk(&self, root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut dirs = VecDeque::new();
    dirs.push_back((root.to_path_buf(), 0usize));

    debug!("Walking release tree: {}", root.display());

    while let Some((dir, depth)) = dirs.pop_front() {
      let entries =
        std::fs::read_dir(&dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;

      for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read directory entry in: {}", dir.display()))?;
        let path = entry.path();
        let file_type = entry
          .file_type()
          .with_context(|| format!("Failed to stat: {}", path.display()))?;

        if file_type.is_dir() {
          if !self.recurse {
            trace!("Skipping directory (no-recurse): {}", path.display());
            continue;
          }
          if let Some(allowed) = self.allowed_children(depth) {
            let name = entry.file_name();
            if !allowed.iter().any(|subtree| name == subtree.as_str()) {
              trace!("Skipping subtree outside allow-list: {}", path.display());
              continue;
            }
          }
          dirs.push_back((path, depth + 1));
        } else if file_type.is_file() {
          if entry.file_name() == METADATA_FILENAME {
            debug!("Deleting metadata file: {}", path.display());
            std::fs::remove_file(&path).with_context(|| format!("Failed to delete: {}", path.display()))?;
            continue;
          }
          files.push(path);
        }
        // Symlinks and other file types are left alone.
      }
    }

    debug!("Found {} files to transform", files.len());
    Ok(files)
  }
}
