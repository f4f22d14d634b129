use crate::fraction::{Fraction, FractionError};
use crate::tokenizer::Scanner;

/// One `<fraction> <op> <fraction>` triple. The operator stays a raw
/// character; deciding whether it is supported is up to the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  pub left: Fraction,
  pub operator: char,
  pub right: Fraction,
}

/// Where a record starts: its 1-based position in the input and the line of
/// its first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
  pub record: usize,
  pub line: usize,
}

impl std::fmt::Display for Location {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "record {} (line {})", self.record, self.line)
  }
}

pub fn read_fraction(scanner: &mut Scanner) -> Result<Fraction, ParseError> {
  let numerator = scanner.read_integer()?;
  scanner.skip_whitespace();
  scanner.expect('/')?;
  let denominator = scanner.read_integer()?;
  Ok(Fraction::new(numerator, denominator)?)
}

/// Reads the next record, or `None` if only whitespace is left.
///
/// All tokens of the record are consumed before a bad fraction is reported,
/// so after a `ParseError::Fraction` the scanner sits at the start of the
/// next record and reading can continue. A `ParseError::Syntax` leaves the
/// scanner somewhere inside the record.
pub fn read_record(scanner: &mut Scanner) -> Result<Option<Record>, ParseError> {
  scanner.skip_whitespace();
  if scanner.is_at_end() {
    return Ok(None);
  }
  let left = match read_fraction(scanner) {
    Err(err) if !err.is_recoverable() => return Err(err),
    left => left,
  };
  let operator = scanner.read_char()?;
  let right = read_fraction(scanner)?;
  Ok(Some(Record {
    left: left?,
    operator,
    right,
  }))
}

/// Iterates over every record of `input`. Stops after the first syntax
/// error, since there is no way to find the start of the next record.
pub fn parse_records(input: &str) -> Records<'_> {
  Records {
    scanner: Scanner::new(input),
    count: 0,
    done: false,
  }
}

pub struct Records<'a> {
  scanner: Scanner<'a>,
  count: usize,
  done: bool,
}

impl<'a> Iterator for Records<'a> {
  type Item = (Location, Result<Record, ParseError>);

  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }
    self.scanner.skip_whitespace();
    let location = Location {
      record: self.count + 1,
      line: self.scanner.line(),
    };
    match read_record(&mut self.scanner) {
      Ok(None) => {
        self.done = true;
        None
      }
      Ok(Some(record)) => {
        self.count += 1;
        Some((location, Ok(record)))
      }
      Err(err) => {
        self.count += 1;
        if !err.is_recoverable() {
          self.done = true;
        }
        Some((location, Err(err)))
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  Syntax { line: usize, message: String },
  Fraction(FractionError),
}

impl ParseError {
  /// Whether the rest of the input can still be read after this error.
  pub fn is_recoverable(&self) -> bool {
    matches!(self, ParseError::Fraction(_))
  }
}

impl From<FractionError> for ParseError {
  fn from(err: FractionError) -> Self {
    ParseError::Fraction(err)
  }
}

impl std::fmt::Display for ParseError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ParseError::Syntax { line, message } => write!(f, "syntax error on line {}: {}", line, message),
      ParseError::Fraction(err) => write!(f, "invalid fraction: {}", err),
    }
  }
}

impl std::error::Error for ParseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ParseError::Syntax { .. } => None,
      ParseError::Fraction(err) => Some(err),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn frac(numerator: i64, denominator: i64) -> Fraction {
    Fraction::new(numerator, denominator).unwrap()
  }

  #[test]
  fn reads_and_normalizes_a_fraction() {
    let mut scanner = Scanner::new("  2/4");
    assert_eq!(read_fraction(&mut scanner), Ok(frac(1, 2)));
    let mut scanner = Scanner::new("-3 / -9");
    assert_eq!(read_fraction(&mut scanner), Ok(frac(1, 3)));
  }

  #[test]
  fn missing_separator_is_a_syntax_error() {
    let mut scanner = Scanner::new("1 2");
    assert!(matches!(
      read_fraction(&mut scanner),
      Err(ParseError::Syntax { .. })
    ));
  }

  #[test]
  fn zero_denominator_is_rejected() {
    let mut scanner = Scanner::new("5/0");
    assert_eq!(
      read_fraction(&mut scanner),
      Err(ParseError::Fraction(FractionError::InvalidDenominator))
    );
  }

  #[test]
  fn slash_is_both_separator_and_operator() {
    let mut scanner = Scanner::new("1/2 / 1/4");
    let record = read_record(&mut scanner).unwrap().unwrap();
    assert_eq!(record.left, frac(1, 2));
    assert_eq!(record.operator, '/');
    assert_eq!(record.right, frac(1, 4));
    assert_eq!(read_record(&mut scanner), Ok(None));
  }

  #[test]
  fn minus_is_both_sign_and_operator() {
    let mut scanner = Scanner::new("1/2 - -1/4");
    let record = read_record(&mut scanner).unwrap().unwrap();
    assert_eq!(record.operator, '-');
    assert_eq!(record.right, frac(-1, 4));
  }

  #[test]
  fn continues_after_invalid_denominator() {
    let records: Vec<_> = parse_records("1/0 + 1/1\n1/2 * 2/1\n").collect();
    assert_eq!(records.len(), 2);
    assert_eq!(
      records[0],
      (
        Location { record: 1, line: 1 },
        Err(ParseError::Fraction(FractionError::InvalidDenominator))
      )
    );
    let (location, record) = &records[1];
    assert_eq!(*location, Location { record: 2, line: 2 });
    assert_eq!(record.as_ref().unwrap().operator, '*');
  }

  #[test]
  fn bad_left_fraction_still_consumes_the_record() {
    let mut scanner = Scanner::new("3/0 * 1/2 1/2 - 1/4");
    assert_eq!(
      read_record(&mut scanner),
      Err(ParseError::Fraction(FractionError::InvalidDenominator))
    );
    let record = read_record(&mut scanner).unwrap().unwrap();
    assert_eq!(record.operator, '-');
  }

  #[test]
  fn stops_after_syntax_error() {
    let records: Vec<_> = parse_records("1/2 + x/3\n1/2 + 1/3").collect();
    assert_eq!(records.len(), 1);
    assert!(matches!(
      records[0].1,
      Err(ParseError::Syntax { line: 1, .. })
    ));
  }

  #[test]
  fn truncated_record_is_a_syntax_error() {
    let records: Vec<_> = parse_records("1/2 +").collect();
    assert_eq!(records.len(), 1);
    assert!(records[0].1.is_err());
  }

  #[test]
  fn blank_input_has_no_records() {
    assert_eq!(parse_records("  \n\t ").count(), 0);
  }
}
