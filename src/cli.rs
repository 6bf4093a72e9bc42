//! # CLI Module
//!
//! This module contains the command-line interface implementation. It uses
//! clap for argument parsing; every pipeline step is independently togglable,
//! and malformed combinations are reported before any filesystem mutation.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use tracing::debug;

use crate::config::load_config;
use crate::file_io::FileIO;
use crate::header::CanonicalHeader;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_start_message, print_summary};
use crate::processor::{FileProcessor, ReleaseOptions};
use crate::verbose_log;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug, Default)]
#[command(
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Copy the release subtrees out of an internal checkout, then transform them
  relprep --source ~/internal/checkout release/

  # Re-run the transformation over an already-populated release tree
  relprep --skip-copy release/

  # Transform every subtree, not just the release allow-list
  relprep --skip-copy --all-subtrees release/

  # Strip internal regions but leave headers and includes alone
  relprep --skip-copy --no-substitutions --no-headers release/
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  /// Destination release tree(s) to prepare
  #[arg(required = false, value_name = "DEST")]
  pub dests: Vec<PathBuf>,

  /// Internal source tree to copy the release subtrees from
  #[arg(long, value_name = "DIR")]
  pub source: Option<PathBuf>,

  /// Skip the initial tree-copy step and transform <DEST> in place
  #[arg(long)]
  pub skip_copy: bool,

  /// Do not restrict root-level traversal to the release allow-list
  #[arg(long)]
  pub all_subtrees: bool,

  /// Skip the ordered literal path/identifier rewrites
  #[arg(long)]
  pub no_substitutions: bool,

  /// Keep internal-only regions and marked lines
  #[arg(long)]
  pub no_strip: bool,

  /// Skip proto lite-runtime option injection
  #[arg(long)]
  pub no_lite_runtime: bool,

  /// Skip license header detection and insertion
  #[arg(long)]
  pub no_headers: bool,

  /// Limit traversal to one directory level
  #[arg(long)]
  pub no_recurse: bool,

  /// Path to config file (default: .relprep.toml in the destination root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and the bare modified count
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(long, value_name = "WHEN", value_enum, default_value = "auto")]
  pub colors: ColorMode,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Validate the arguments and return an error if invalid.
  ///
  /// Runs before any filesystem mutation.
  fn validate(&self) -> Result<(), String> {
    if self.dests.is_empty() {
      return Err("Missing required argument: <DEST>...".to_string());
    }
    // The copy step replaces subtrees under a single destination; copying the
    // same source into several trees at once is almost certainly a mistake.
    if self.source.is_some() && !self.skip_copy && self.dests.len() > 1 {
      return Err("--source copies into a single destination; pass one <DEST> or use --skip-copy".to_string());
    }
    Ok(())
  }
}

/// Run the release preparation with the given arguments
pub fn run(cli: Cli) -> Result<()> {
  if let Err(e) = cli.validate() {
    eprintln!("ERROR: {e}");
    process::exit(1);
  }

  init_tracing(cli.quiet, cli.verbose);
  if cli.verbose > 0 {
    set_verbose();
  } else if cli.quiet {
    set_quiet();
  }
  cli.colors.apply();

  // Safe to index: validate() guarantees at least one destination.
  let primary_dest = &cli.dests[0];

  let config = load_config(cli.config.as_deref(), primary_dest, cli.no_config)?.unwrap_or_default();
  let rules = config.rules_or_default();
  let subtrees = config.subtrees_or_default();
  let header = CanonicalHeader::from_text(config.header_or_default());

  let options = ReleaseOptions {
    restrict_subtrees: !cli.all_subtrees,
    substitute: !cli.no_substitutions,
    strip_regions: !cli.no_strip,
    lite_runtime: !cli.no_lite_runtime,
    fix_headers: !cli.no_headers,
    recurse: !cli.no_recurse,
  };
  debug!("Effective options: {:?}", options);

  if let Some(ref source) = cli.source
    && !cli.skip_copy
  {
    std::fs::create_dir_all(primary_dest)
      .with_context(|| format!("Failed to create destination: {}", primary_dest.display()))?;
    for subtree in &subtrees {
      let from = source.join(subtree);
      if from.is_dir() {
        FileIO::replace_subtree(&from, &primary_dest.join(subtree))?;
      } else {
        verbose_log!("Source has no '{}' subtree, skipping copy", subtree);
      }
    }
  }

  let processor = FileProcessor::new(options, rules, header, subtrees);

  let mut total_modified = 0;
  for dest in &cli.dests {
    print_start_message(dest);
    total_modified += processor.process_tree(dest)?;
  }

  print_summary(total_modified);
  Ok(())
}
