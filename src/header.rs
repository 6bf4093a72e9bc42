//! # Header Module
//!
//! This module contains the canonical license header, the stateful detector
//! that classifies a file's existing content against it, the inserter that
//! stamps it into files that lack it, and the extension-to-comment-style
//! mapping both of them share.
//!
//! Detection is deliberately conservative: a file with any recognizable trace
//! of a copyright header — even a wrong or incomplete body — is left
//! untouched. Only files classified [`HeaderState::Missing`] are stamped, so
//! variably-formatted existing headers are never double-stamped.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// The canonical license text every released source file must carry.
///
/// The first line is the attribution line; the remaining lines are the body.
/// Detector and inserter both work from this exact text.
pub const CANONICAL_HEADER: &str = r#"Copyright 2020 Google LLC

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    https://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License."#;

/// Default number of leading lines scanned for the attribution line.
pub const DEFAULT_LOOKAHEAD: usize = 3;

/// Classification of a file's existing content against the canonical header.
///
/// Ordered by completeness: `Missing < Headline < Partial < Full`. Detection
/// never downgrades once a more-complete state is reached within one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeaderState {
  /// No attribution line found within the look-ahead window.
  Missing,
  /// An attribution line matched but no body line did.
  Headline,
  /// The attribution line plus a strict prefix of the body matched.
  Partial,
  /// The attribution line plus the entire body matched.
  Full,
}

/// Matches a year or year-range token ("2020", "2019-2021").
static YEAR_TOKEN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year token regex must compile"));

/// Returns true for a permissive copyright attribution line: it must contain
/// the literal `Copyright`, a year-ish token, and the literal `Google`, in any
/// order and spacing.
pub fn is_copyright_line(line: &str) -> bool {
  line.contains("Copyright") && line.contains("Google") && YEAR_TOKEN.is_match(line)
}

/// The canonical header split into lines, shared by detector and inserter.
pub struct CanonicalHeader {
  lines: Vec<String>,
}

impl Default for CanonicalHeader {
  fn default() -> Self {
    Self::from_text(CANONICAL_HEADER)
  }
}

impl CanonicalHeader {
  /// Builds a header from multi-line text. The first line is the attribution
  /// line, the rest the body.
  pub fn from_text(text: &str) -> Self {
    Self {
      lines: text.lines().map(str::to_string).collect(),
    }
  }

  /// All header lines, attribution line first.
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  /// The body: every header line after the attribution line.
  fn body(&self) -> &[String] {
    &self.lines[1..]
  }

  /// Classifies a file's line sequence against this header.
  ///
  /// The scan looks for an attribution line within the first `lookahead`
  /// lines. If none matches, the state is `Missing`. Otherwise the scan
  /// position is fixed at the line after the match and each subsequent line is
  /// compared against the body by substring containment, advancing the state
  /// per matched line and stopping at the first mismatch or end of file.
  ///
  /// Idempotent and read-only; never reads past the end of `lines`.
  pub fn detect(&self, lines: &[String], lookahead: usize) -> HeaderState {
    let window = lines.len().min(lookahead);
    let Some(matched_at) = lines[..window].iter().position(|line| is_copyright_line(line)) else {
      return HeaderState::Missing;
    };

    let mut state = HeaderState::Headline;
    let mut cursor = matched_at + 1;
    for body_line in self.body() {
      if cursor >= lines.len() || !lines[cursor].contains(body_line.as_str()) {
        return state;
      }
      state = HeaderState::Partial;
      cursor += 1;
    }

    HeaderState::Full
  }

  /// Renders the header as comment lines for insertion.
  ///
  /// Non-blank lines get the comment marker plus one space; blank lines get
  /// the bare marker with no trailing space.
  fn render(&self, prefix: &str) -> Vec<String> {
    self
      .lines
      .iter()
      .map(|line| {
        if line.is_empty() {
          format!("{}\n", prefix)
        } else {
          format!("{} {}\n", prefix, line)
        }
      })
      .collect()
  }

  /// Inserts the rendered header into `lines` at the style's offset.
  ///
  /// Only call this for files classified `Missing`. The header lands as a
  /// contiguous block at the top, or immediately below an interpreter
  /// directive (offset 1), in which case one blank separator line precedes it.
  /// One blank line always follows the header. Existing lines are never
  /// removed.
  pub fn insert(&self, lines: &mut Vec<String>, style: &HeaderStyle) {
    let mut block = Vec::with_capacity(self.lines.len() + 2);
    if style.offset > 0 {
      block.push("\n".to_string());
    }
    block.extend(self.render(style.prefix));
    block.push("\n".to_string());

    lines.splice(style.offset..style.offset, block);
  }
}

/// Comment style for header insertion: a line-comment marker and the line
/// offset at which the header block starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderStyle {
  /// The line-comment marker, without trailing space (`"//"` or `"#"`).
  pub prefix: &'static str,

  /// 0, or 1 when the first line is an interpreter directive.
  pub offset: usize,
}

/// Extensions that take C++-style `//` line comments.
const SLASH_COMMENT_EXTENSIONS: &[&str] = &["cc", "cpp", "cxx", "c", "h", "hpp", "inc", "mm", "proto"];

/// Derives the comment style for a file, or `None` when no header applies.
///
/// C/C++-family extensions (including `.proto`) take `//`; build files
/// (`CMakeLists*`, `*.cmake`, `BUILD`, `BUILD.gn`) take `#`; any other file
/// whose first line is a `#!` interpreter directive takes `#` below the
/// directive. Everything else is skipped for header purposes — that is a
/// tolerated content anomaly, not an error.
pub fn header_style_for(path: &Path, first_line: Option<&str>) -> Option<HeaderStyle> {
  let offset = usize::from(first_line.is_some_and(|line| line.starts_with("#!")));

  let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
  if SLASH_COMMENT_EXTENSIONS.contains(&extension) {
    return Some(HeaderStyle { prefix: "//", offset });
  }

  let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("");
  if file_name.starts_with("CMakeLists") || file_name.ends_with(".cmake") || file_name == "BUILD" || file_name == "BUILD.gn"
  {
    return Some(HeaderStyle { prefix: "#", offset });
  }

  if offset > 0 {
    return Some(HeaderStyle { prefix: "#", offset });
  }

  None
}

#[cfg(test)]
mod tests {
  use super::*;

  fn to_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
  }

  fn stamped_cc_file() -> String {
    let header = CanonicalHeader::default();
    let mut lines = to_lines("int main() {}\n");
    header.insert(
      &mut lines,
      &HeaderStyle {
        prefix: "//",
        offset: 0,
      },
    );
    lines.concat()
  }

  #[test]
  fn test_detect_missing_without_attribution_line() {
    let header = CanonicalHeader::default();
    let lines = to_lines("int main() {}\nint x;\n");
    assert_eq!(header.detect(&lines, DEFAULT_LOOKAHEAD), HeaderState::Missing);
  }

  #[test]
  fn test_detect_missing_when_attribution_is_past_lookahead() {
    let header = CanonicalHeader::default();
    let lines = to_lines("a\nb\nc\n// Copyright 2020 Google LLC\n");
    assert_eq!(header.detect(&lines, DEFAULT_LOOKAHEAD), HeaderState::Missing);
    // A wider window finds it.
    assert_eq!(header.detect(&lines, 4), HeaderState::Headline);
  }

  #[test]
  fn test_detect_headline_with_foreign_body() {
    let header = CanonicalHeader::default();
    let lines = to_lines("// Copyright 2019 Google Inc.\n// All rights reserved.\n");
    assert_eq!(header.detect(&lines, DEFAULT_LOOKAHEAD), HeaderState::Headline);
  }

  #[test]
  fn test_detect_partial_with_truncated_body() {
    let header = CanonicalHeader::default();
    // Attribution plus the first two body lines, then the file ends.
    let lines = to_lines(
      "// Copyright 2020 Google LLC\n//\n// Licensed under the Apache License, Version 2.0 (the \"License\");\n",
    );
    assert_eq!(header.detect(&lines, DEFAULT_LOOKAHEAD), HeaderState::Partial);
  }

  #[test]
  fn test_detect_full_on_stamped_file() {
    let header = CanonicalHeader::default();
    let lines = to_lines(&stamped_cc_file());
    assert_eq!(header.detect(&lines, DEFAULT_LOOKAHEAD), HeaderState::Full);
  }

  #[test]
  fn test_detect_is_idempotent() {
    let header = CanonicalHeader::default();
    let lines = to_lines(&stamped_cc_file());
    let first = header.detect(&lines, DEFAULT_LOOKAHEAD);
    let second = header.detect(&lines, DEFAULT_LOOKAHEAD);
    assert_eq!(first, second);
  }

  #[test]
  fn test_state_ordering_tracks_completeness() {
    assert!(HeaderState::Missing < HeaderState::Headline);
    assert!(HeaderState::Headline < HeaderState::Partial);
    assert!(HeaderState::Partial < HeaderState::Full);
  }

  #[test]
  fn test_is_copyright_line_requires_all_three_tokens() {
    assert!(is_copyright_line("// Copyright 2020 Google LLC"));
    assert!(is_copyright_line("# Google, Copyright 2019-2021"));
    assert!(!is_copyright_line("// Copyright 2020 Example Corp"));
    assert!(!is_copyright_line("// Copyright Google LLC"));
    assert!(!is_copyright_line("// Google 2020"));
  }

  #[test]
  fn test_insert_then_detect_yields_full() {
    let header = CanonicalHeader::default();
    let mut lines = to_lines("#include \"core/core.h\"\n");
    assert_eq!(header.detect(&lines, DEFAULT_LOOKAHEAD), HeaderState::Missing);

    header.insert(
      &mut lines,
      &HeaderStyle {
        prefix: "//",
        offset: 0,
      },
    );
    assert_eq!(header.detect(&lines, DEFAULT_LOOKAHEAD), HeaderState::Full);
    // Original content survives after the trailing blank line.
    assert_eq!(lines.last().map(String::as_str), Some("#include \"core/core.h\"\n"));
  }

  #[test]
  fn test_insert_after_interpreter_directive() {
    let header = CanonicalHeader::default();
    let mut lines = to_lines("#!/usr/bin/env python3\nprint('hi')\n");
    header.insert(&mut lines, &HeaderStyle { prefix: "#", offset: 1 });

    assert_eq!(lines[0], "#!/usr/bin/env python3\n");
    assert_eq!(lines[1], "\n");
    assert_eq!(lines[2], "# Copyright 2020 Google LLC\n");
    assert_eq!(lines.last().map(String::as_str), Some("print('hi')\n"));
  }

  #[test]
  fn test_blank_header_lines_get_bare_marker() {
    let header = CanonicalHeader::default();
    let mut lines = to_lines("int x;\n");
    header.insert(
      &mut lines,
      &HeaderStyle {
        prefix: "//",
        offset: 0,
      },
    );
    // The blank line after the attribution line carries the bare marker with
    // no trailing space.
    assert_eq!(lines[1], "//\n");
  }

  #[test]
  fn test_header_style_for_cpp_family() {
    let style = header_style_for(Path::new("core/core.cc"), Some("#include <x>")).expect("style");
    assert_eq!(style.prefix, "//");
    assert_eq!(style.offset, 0);

    assert!(header_style_for(Path::new("a.proto"), None).is_some());
    assert!(header_style_for(Path::new("a.hpp"), None).is_some());
  }

  #[test]
  fn test_header_style_for_build_files() {
    for name in ["CMakeLists.txt", "CMakeListsTest.txt", "util.cmake", "BUILD", "BUILD.gn"] {
      let style = header_style_for(Path::new(name), Some("content")).expect("style");
      assert_eq!(style.prefix, "#", "failed for {}", name);
    }
  }

  #[test]
  fn test_header_style_for_shebang_script() {
    let style = header_style_for(Path::new("gen.py"), Some("#!/usr/bin/env python3\n")).expect("style");
    assert_eq!(style.prefix, "#");
    assert_eq!(style.offset, 1);
  }

  #[test]
  fn test_header_style_unknown_extension_is_skipped() {
    assert!(header_style_for(Path::new("README.md"), Some("# relprep")).is_none());
    assert!(header_style_for(Path::new("data.json"), Some("{}")).is_none());
  }
}
