//! # Output Module
//!
//! This module centralizes the user-facing output of the relprep tool:
//! the per-root start line and the final modified-file summary. Everything
//! respects quiet mode and the global color setting.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::is_quiet;

/// Symbols used in output
pub mod symbols {
  /// Run completed
  pub const SUCCESS: &str = "\u{2713}"; // ✓
}

/// Print the per-root "Preparing ..." line.
pub fn print_start_message(root: &Path) {
  if is_quiet() {
    return;
  }

  println!("Preparing release tree: {}", root.display());
}

/// Print the final summary: the total count of modified files across all
/// processed roots.
pub fn print_summary(total_modified: usize) {
  if is_quiet() {
    // In quiet mode print the bare count, for scripting.
    println!("{}", total_modified);
    return;
  }

  let files_word = if total_modified == 1 { "file" } else { "files" };
  println!(
    "{} {} {} modified",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    total_modified,
    files_word
  );
}
