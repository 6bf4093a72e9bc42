//! # relprep
//!
//! A tool that prepares an internal source tree for external release.

use anyhow::Result;
use relprep::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli)
}
