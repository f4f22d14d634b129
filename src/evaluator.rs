use std::io::Write;

use crate::{
  fraction::{Fraction, FractionError},
  parser::{parse_records, Location, ParseError, Record},
  tokenizer::Operator,
};

/// A record together with its result. Displays as one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
  pub left: Fraction,
  pub operator: Operator,
  pub right: Fraction,
  pub result: Fraction,
}

impl std::fmt::Display for Evaluation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} {} {} = {}",
      self.left, self.operator, self.right, self.result
    )
  }
}

pub fn evaluate(record: &Record) -> Result<Evaluation, EvaluationError> {
  let operator = Operator::from_char(record.operator)
    .ok_or(EvaluationError::UnknownOperator(record.operator))?;
  let result = match operator {
    Operator::Add => record.left.add(record.right)?,
    Operator::Subtract => record.left.subtract(record.right)?,
    Operator::Multiply => record.left.multiply(record.right)?,
    Operator::Divide => record.left.divide(record.right)?,
  };
  Ok(Evaluation {
    left: record.left,
    operator,
    right: record.right,
    result,
  })
}

/// What to do when a single record cannot be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
  /// Stop the whole run at the first failing record.
  #[default]
  Abort,
  /// Log the failure and carry on with the next record. Syntax errors still
  /// stop the run.
  Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
  pub evaluated: usize,
  pub skipped: usize,
}

/// Evaluates every record in `input`, writing one line per record to `out`.
/// Lines for records before a fatal error are already written when the error
/// is returned.
pub fn run<W: Write>(input: &str, policy: ErrorPolicy, out: &mut W) -> Result<Summary, RunError> {
  let mut summary = Summary::default();
  for (location, record) in parse_records(input) {
    let evaluated = record
      .map_err(RecordError::Parse)
      .and_then(|record| evaluate(&record).map_err(RecordError::Evaluation));
    match evaluated {
      Ok(evaluation) => {
        log::debug!("{}: {}", location, evaluation);
        writeln!(out, "{}", evaluation)?;
        summary.evaluated += 1;
      }
      Err(err) if policy == ErrorPolicy::Skip && err.is_recoverable() => {
        log::warn!("Skipping {}: {}", location, err);
        summary.skipped += 1;
      }
      Err(err) => return Err(RunError::Located(err, location)),
    }
  }
  log::info!(
    "Evaluated {} records, skipped {}",
    summary.evaluated,
    summary.skipped
  );
  Ok(summary)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
  UnknownOperator(char),
  Fraction(FractionError),
}

impl From<FractionError> for EvaluationError {
  fn from(err: FractionError) -> Self {
    EvaluationError::Fraction(err)
  }
}

impl std::fmt::Display for EvaluationError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      EvaluationError::UnknownOperator(operator) => write!(f, "unknown operator: {}", operator),
      EvaluationError::Fraction(err) => write!(f, "{}", err),
    }
  }
}

impl std::error::Error for EvaluationError {}

/// Anything that can go wrong with a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
  Parse(ParseError),
  Evaluation(EvaluationError),
}

impl RecordError {
  pub fn is_recoverable(&self) -> bool {
    match self {
      RecordError::Parse(err) => err.is_recoverable(),
      RecordError::Evaluation(_) => true,
    }
  }
}

impl std::fmt::Display for RecordError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RecordError::Parse(err) => write!(f, "{}", err),
      RecordError::Evaluation(err) => write!(f, "{}", err),
    }
  }
}

#[derive(Debug)]
pub enum RunError {
  Located(RecordError, Location),
  Io(std::io::Error),
}

impl From<std::io::Error> for RunError {
  fn from(err: std::io::Error) -> Self {
    RunError::Io(err)
  }
}

impl std::fmt::Display for RunError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      // a syntax error already carries the exact line it was found on
      RunError::Located(err @ RecordError::Parse(ParseError::Syntax { .. }), location) => {
        write!(f, "record {}: {}", location.record, err)
      }
      RunError::Located(err, location) => write!(f, "{}: {}", location, err),
      RunError::Io(err) => write!(f, "failed to write output: {}", err),
    }
  }
}

impl std::error::Error for RunError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RunError::Located(RecordError::Parse(err), _) => Some(err),
      RunError::Located(RecordError::Evaluation(err), _) => Some(err),
      RunError::Io(err) => Some(err),
    }
  }
}
