//! # Processor Module
//!
//! This module orchestrates the per-file transformation pipeline over a
//! release tree. Each file is read completely into memory, every line is
//! threaded through the region filter, the rewrite rules, and the proto
//! annotator in that fixed order, the header detector/inserter runs once over
//! the accumulated result, and the file is rewritten in place only if some
//! stage flagged a change.
//!
//! The run is fully single-threaded and synchronous. Per-file transformations
//! are independent; only the modified-file count and the `METADATA` deletions
//! performed by the walker are order-observable. A filesystem error on any
//! file aborts the whole run — a partially-populated release tree is worse
//! than a failed one.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::file_io::FileIO;
use crate::header::{CanonicalHeader, DEFAULT_LOOKAHEAD, HeaderState, header_style_for};
use crate::info_log;
use crate::proto::{ProtoAnnotator, is_proto_file};
use crate::regions::RegionFilter;
use crate::rewrite::{LineTransformer, TransformRule};
use crate::walker::TreeWalker;

/// Independently togglable steps of the release pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseOptions {
  /// Restrict root-level traversal to the release allow-list.
  pub restrict_subtrees: bool,

  /// Apply the ordered literal substitutions.
  pub substitute: bool,

  /// Strip internal-only regions and marked lines.
  pub strip_regions: bool,

  /// Inject the lite-runtime option into schema files.
  pub lite_runtime: bool,

  /// Insert the canonical license header where missing.
  pub fix_headers: bool,

  /// Descend below the first directory level.
  pub recurse: bool,
}

impl Default for ReleaseOptions {
  fn default() -> Self {
    Self {
      restrict_subtrees: true,
      substitute: true,
      strip_regions: true,
      lite_runtime: true,
      fix_headers: true,
      recurse: true,
    }
  }
}

/// Per-file transformation pipeline over one or more release trees.
pub struct FileProcessor {
  options: ReleaseOptions,
  transformer: LineTransformer,
  header: CanonicalHeader,
  walker: TreeWalker,
}

impl FileProcessor {
  /// Creates a processor.
  ///
  /// # Parameters
  ///
  /// * `options` - Which pipeline steps are enabled
  /// * `rules` - Ordered rewrite rules; order is preserved exactly as given
  /// * `header` - The canonical license header shared by detector and inserter
  /// * `subtrees` - Root-level allow-list applied when `restrict_subtrees` is set
  pub fn new(options: ReleaseOptions, rules: Vec<TransformRule>, header: CanonicalHeader, subtrees: Vec<String>) -> Self {
    let allowed = options.restrict_subtrees.then_some(subtrees);
    Self {
      options,
      transformer: LineTransformer::new(rules),
      header,
      walker: TreeWalker::new(allowed, options.recurse),
    }
  }

  /// Walks one destination root and transforms every visited file.
  ///
  /// `METADATA` deletion happens during the walk, before transformation is
  /// attempted on any file; deleted files do not count as modified.
  ///
  /// # Returns
  ///
  /// The number of files rewritten in place.
  pub fn process_tree(&self, root: &Path) -> Result<usize> {
    let files = self.walker.walk(root)?;

    let mut modified_count = 0;
    for file in &files {
      if self.process_file(file)? {
        modified_count += 1;
      }
    }

    debug!("{}: {} of {} files modified", root.display(), modified_count, files.len());
    Ok(modified_count)
  }

  /// Transforms one file and reports whether it was rewritten.
  ///
  /// Empty files are never rewritten and never reach the header stage.
  /// Non-UTF-8 files are skipped; they cannot be rewritten faithfully as text.
  pub fn process_file(&self, path: &Path) -> Result<bool> {
    let Some(lines) = FileIO::read_lines(path)? else {
      return Ok(false);
    };
    if lines.is_empty() {
      return Ok(false);
    }

    let mut regions = RegionFilter::new(self.options.strip_regions);
    let mut annotator = ProtoAnnotator::new(self.options.lite_runtime && is_proto_file(path));

    let mut output = Vec::with_capacity(lines.len());
    let mut modified = false;

    for line in lines {
      if !regions.keep_line(&line) {
        modified = true;
        continue;
      }

      let line = if self.options.substitute {
        let (rewritten, changed) = self.transformer.apply(&line);
        modified |= changed;
        rewritten
      } else {
        line
      };

      if let Some(injected) = annotator.line_to_inject_before(&line) {
        output.push(injected);
        modified = true;
      }
      output.push(line);
    }

    regions.warn_if_unterminated(&path.display().to_string());

    if self.options.fix_headers
      && let Some(style) = header_style_for(path, output.first().map(String::as_str))
      && self.header.detect(&output, DEFAULT_LOOKAHEAD) == HeaderState::Missing
    {
      self.header.insert(&mut output, &style);
      modified = true;
    }

    if !modified {
      return Ok(false);
    }

    FileIO::write_lines(path, &output)?;
    info_log!("Rewrote: {}", path.display());
    Ok(true)
  }
}
