use std::{iter::Peekable, str::Chars};

use crate::parser::ParseError;

/// Cursor over raw input. Reads one token at a time on demand, since `/`
/// and `-` mean different things depending on where they appear.
pub struct Scanner<'a> {
  char_iter: Peekable<Chars<'a>>,
  line: usize,
}

impl<'a> Scanner<'a> {
  pub fn new(text: &'a str) -> Self {
    Self {
      char_iter: text.chars().peekable(),
      line: 1,
    }
  }

  pub fn line(&self) -> usize {
    self.line
  }

  fn next_char(&mut self) -> Option<char> {
    let char = self.char_iter.next()?;
    if char == '\n' {
      self.line += 1;
    }
    Some(char)
  }

  pub fn skip_whitespace(&mut self) {
    while let Some(peeked) = self.char_iter.peek() {
      if !peeked.is_whitespace() {
        break;
      }
      self.next_char();
    }
  }

  pub fn is_at_end(&mut self) -> bool {
    self.char_iter.peek().is_none()
  }

  /// Optional sign followed by decimal digits, after leading whitespace.
  pub fn read_integer(&mut self) -> Result<i64, ParseError> {
    self.skip_whitespace();
    let mut number_chars = String::new();
    if let Some(sign @ ('+' | '-')) = self.char_iter.peek().copied() {
      number_chars.push(sign);
      self.next_char();
    }
    while let Some(digit @ '0'..='9') = self.char_iter.peek().copied() {
      number_chars.push(digit);
      self.next_char();
    }
    if !number_chars.ends_with(|c: char| c.is_ascii_digit()) {
      return Err(match self.char_iter.peek().copied() {
        Some(found) => self.syntax_error(&format!("expected an integer, found '{}'", found)),
        None => self.syntax_error("expected an integer, found end of input"),
      });
    }
    number_chars
      .parse::<i64>()
      .map_err(|_| self.syntax_error(&format!("integer '{}' is out of range", number_chars)))
  }

  /// Consumes `expected` exactly, without skipping whitespace first.
  pub fn expect(&mut self, expected: char) -> Result<(), ParseError> {
    match self.char_iter.peek().copied() {
      Some(found) if found == expected => {
        self.next_char();
        Ok(())
      }
      Some(found) => Err(self.syntax_error(&format!("expected '{}', found '{}'", expected, found))),
      None => Err(self.syntax_error(&format!("expected '{}', found end of input", expected))),
    }
  }

  /// The next non-whitespace character.
  pub fn read_char(&mut self) -> Result<char, ParseError> {
    self.skip_whitespace();
    match self.next_char() {
      Some(char) => Ok(char),
      None => Err(self.syntax_error("expected an operator, found end of input")),
    }
  }

  pub fn syntax_error(&self, message: &str) -> ParseError {
    ParseError::Syntax {
      line: self.line,
      message: message.to_string(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
  Add,
  Subtract,
  Multiply,
  Divide,
}

impl Operator {
  pub fn from_char(char: char) -> Option<Self> {
    match char {
      '+' => Some(Operator::Add),
      '-' => Some(Operator::Subtract),
      '*' => Some(Operator::Multiply),
      '/' => Some(Operator::Divide),
      _ => None,
    }
  }
}

impl std::fmt::Display for Operator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Operator::Add => write!(f, "+"),
      Operator::Subtract => write!(f, "-"),
      Operator::Multiply => write!(f, "*"),
      Operator::Divide => write!(f, "/"),
    }
  }
}
