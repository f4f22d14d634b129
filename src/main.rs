use std::{io::Write, process::ExitCode};

use clap::Parser;
use colored::Colorize;

use crate::config::Args;

mod config;
mod evaluator;
mod fraction;
mod parser;
mod tokenizer;

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
  let args = Args::parse();
  if args.no_color {
    colored::control::set_override(false);
  }

  let stdout = std::io::stdout();
  match run(&args, &mut stdout.lock()) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("{} {}", "error:".red().bold(), err);
      ExitCode::FAILURE
    }
  }
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), Box<dyn std::error::Error>> {
  let path = args.input.as_path();
  let input = std::fs::read_to_string(path)
    .map_err(|err| format!("failed to read input file '{}': {}", path.display(), err))?;
  log::info!("Read {} bytes from '{}'", input.len(), path.display());

  let summary = evaluator::run(&input, args.policy(), out)?;
  if summary.skipped > 0 {
    log::warn!(
      "{} of {} records skipped",
      summary.skipped,
      summary.evaluated + summary.skipped
    );
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  fn args_for(input: PathBuf, keep_going: bool) -> Args {
    Args {
      input,
      keep_going,
      no_color: true,
    }
  }

  fn input_file(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file
  }

  #[test]
  fn missing_input_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let mut out = Vec::new();
    let err = run(&args_for(missing.clone(), false), &mut out).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("failed to read input file"));
    assert!(message.contains(&missing.display().to_string()));
    assert!(out.is_empty());
  }

  #[test]
  fn invalid_utf8_is_a_read_failure() {
    let file = input_file(&[0x31, 0x2f, 0xff, 0xfe]);
    let mut out = Vec::new();
    let err = run(&args_for(file.path().to_path_buf(), false), &mut out).unwrap_err();
    assert!(err.to_string().starts_with("failed to read input file"));
  }

  #[test]
  fn evaluates_a_file() {
    let file = input_file(b"1/2 + 1/3\n1/2 / 1/4\n");
    let mut out = Vec::new();
    run(&args_for(file.path().to_path_buf(), false), &mut out).unwrap();
    assert_eq!(
      String::from_utf8(out).unwrap(),
      "1/2 + 1/3 = 5/6\n1/2 / 1/4 = 2/1\n"
    );
  }

  #[test]
  fn unknown_operator_fails_the_run() {
    let file = input_file(b"1/2 + 1/2\n1/2 % 1/3\n");
    let mut out = Vec::new();
    let err = run(&args_for(file.path().to_path_buf(), false), &mut out).unwrap_err();
    assert_eq!(err.to_string(), "record 2 (line 2): unknown operator: %");
    assert_eq!(String::from_utf8(out).unwrap(), "1/2 + 1/2 = 1/1\n");
  }

  #[test]
  fn keep_going_succeeds_past_unknown_operator() {
    let file = input_file(b"1/2 % 1/3\n1/2 * 1/2\n");
    let mut out = Vec::new();
    run(&args_for(file.path().to_path_buf(), true), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "1/2 * 1/2 = 1/4\n");
  }
}
