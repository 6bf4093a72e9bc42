//! # Regions Module
//!
//! This module strips internal-only code regions from released files. Three
//! sentinel markers are recognized as substrings anywhere in a line:
//!
//! - [`STRIP_LINE_MARKER`] drops just the line carrying it;
//! - [`BEGIN_REGION_MARKER`] and [`END_REGION_MARKER`] delimit a span of lines
//!   that is dropped in its entirety, markers included.
//!
//! The marker tokens are chosen so that none is a substring of another; the
//! checks run in a fixed order (drop-line, begin, end) and an overlapping
//! token would shadow the later checks.

use tracing::warn;

/// Marker that drops only the line carrying it.
pub const STRIP_LINE_MARKER: &str = "GOOGLE3_ONLY_LINE";

/// Marker that opens an internal-only region.
pub const BEGIN_REGION_MARKER: &str = "GOOGLE3_ONLY_BEGIN";

/// Marker that closes an internal-only region.
pub const END_REGION_MARKER: &str = "GOOGLE3_ONLY_END";

/// Stateful filter that suppresses internal-only lines.
///
/// The filter holds a single boolean: whether it is currently inside an
/// internal-only region. When disabled it passes every line through
/// unmodified regardless of marker content.
pub struct RegionFilter {
  enabled: bool,
  suppressing: bool,
}

impl RegionFilter {
  /// Creates a filter in the not-suppressing state.
  pub const fn new(enabled: bool) -> Self {
    Self {
      enabled,
      suppressing: false,
    }
  }

  /// Decides whether one line survives into the released output.
  ///
  /// Marker lines are always dropped; while inside a region every non-marker
  /// line is dropped too.
  ///
  /// # Returns
  ///
  /// `true` to keep the line, `false` to drop it (the caller flags the file as
  /// modified on every drop).
  pub fn keep_line(&mut self, line: &str) -> bool {
    if !self.enabled {
      return true;
    }

    if line.contains(STRIP_LINE_MARKER) {
      return false;
    }
    if line.contains(BEGIN_REGION_MARKER) {
      self.suppressing = true;
      return false;
    }
    if line.contains(END_REGION_MARKER) {
      self.suppressing = false;
      return false;
    }

    !self.suppressing
  }

  /// Reports whether the filter is still inside a region.
  ///
  /// A file that ends while suppressing had an unterminated begin marker. The
  /// trailing content stays suppressed; the caller may log a warning but the
  /// default output is unchanged.
  pub const fn is_suppressing(&self) -> bool {
    self.suppressing
  }

  /// Logs a warning if the file ended with an open region.
  pub fn warn_if_unterminated(&self, path_display: &str) {
    if self.enabled && self.suppressing {
      warn!(
        "{}: unterminated {} marker, remaining lines were suppressed",
        path_display, BEGIN_REGION_MARKER
      );
    }
  }
}
