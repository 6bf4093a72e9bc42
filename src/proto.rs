//! # Proto Module
//!
//! Released protocol-schema files must restrict generated code to the
//! lite runtime. This module ensures the lite-runtime option line is present
//! exactly once in each `.proto` file, injected immediately before the first
//! `option` line when absent.

use std::path::Path;

/// The schema directive restricting generated code to the lite runtime.
pub const LITE_RUNTIME_OPTION: &str = "option optimize_for = LITE_RUNTIME;";

/// File extension of protocol-schema files.
pub const PROTO_EXTENSION: &str = "proto";

/// One-shot latch that injects the lite-runtime option line.
///
/// While armed, the first line beginning with the `option` keyword triggers
/// the injection — unless that line already is the exact target text. Either
/// way the latch then disarms for the remainder of the file, so at most one
/// injection occurs no matter how many `option` lines follow.
pub struct ProtoAnnotator {
  armed: bool,
}

impl ProtoAnnotator {
  /// Creates an annotator. `active` is false for non-schema files or when the
  /// lite-runtime step is disabled; an inactive annotator never injects.
  pub const fn new(active: bool) -> Self {
    Self { armed: active }
  }

  /// Inspects one line and returns the line to inject before it, if any.
  pub fn line_to_inject_before(&mut self, line: &str) -> Option<String> {
    if !self.armed || !line.starts_with("option") {
      return None;
    }

    self.armed = false;
    if line.trim_end() == LITE_RUNTIME_OPTION {
      return None;
    }
    Some(format!("{}\n", LITE_RUNTIME_OPTION))
  }
}

/// Returns true if the path names a protocol-schema file.
pub fn is_proto_file(path: &Path) -> bool {
  path.extension().and_then(|ext| ext.to_str()) == Some(PROTO_EXTENSION)
}
