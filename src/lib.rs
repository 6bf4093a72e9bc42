//! # relprep
//!
//! A tool that prepares an internal source tree for external release.
//!
//! `relprep` copies a fixed set of release subtrees into a destination tree,
//! rewrites internal path and identifier references to their public
//! equivalents, strips internal-only code regions, ensures protocol-schema
//! files carry the lite-runtime option, and stamps the canonical license
//! header on every source file that lacks one. Files are modified in place;
//! the tool reports the total count of modified files.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use relprep::config::default_rules;
//! use relprep::header::CanonicalHeader;
//! use relprep::processor::{FileProcessor, ReleaseOptions};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let processor = FileProcessor::new(
//!         ReleaseOptions::default(),
//!         default_rules(),
//!         CanonicalHeader::default(),
//!         vec!["cpp".to_string(), "proto".to_string()],
//!     );
//!
//!     let modified = processor.process_tree(Path::new("release"))?;
//!     println!("{} files modified", modified);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Per-file pipeline orchestration over a release tree
//! * [`walker`] - Traversal policy: allow-list descent and `METADATA` deletion
//! * [`header`] - Canonical header detection and insertion
//! * [`rewrite`] - Ordered literal rewrite rules
//! * [`regions`] - Internal-only region stripping
//! * [`proto`] - Lite-runtime option injection for schema files

pub mod cli;
pub mod config;
pub mod file_io;
pub mod header;
pub mod logging;
pub mod output;
pub mod processor;
pub mod proto;
pub mod regions;
pub mod rewrite;
pub mod walker;
