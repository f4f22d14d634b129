use std::path::PathBuf;

use clap::Parser;

use crate::evaluator::ErrorPolicy;

/// Evaluates fraction arithmetic records such as `1/2 + 1/3`, one result per line.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
  /// File with whitespace separated records of the form `a/b <op> c/d`
  #[arg(default_value = "input.txt")]
  pub input: PathBuf,

  /// Skip records that cannot be evaluated instead of stopping
  #[arg(short, long)]
  pub keep_going: bool,

  /// Disable colored diagnostics
  #[arg(long)]
  pub no_color: bool,
}

impl Args {
  pub fn policy(&self) -> ErrorPolicy {
    if self.keep_going {
      ErrorPolicy::Skip
    } else {
      ErrorPolicy::Abort
    }
  }
}
