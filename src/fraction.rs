use num::Integer;

/// A signed rational number, always kept in lowest terms with a positive
/// denominator. Zero is `0/1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
  numerator: i64,
  denominator: i64,
}

impl Fraction {
  pub fn new(numerator: i64, denominator: i64) -> Result<Self, FractionError> {
    if denominator == 0 {
      return Err(FractionError::InvalidDenominator);
    }
    normalize(numerator as i128, denominator as i128)
  }

  pub fn is_zero(&self) -> bool {
    self.numerator == 0
  }

  pub fn add(self, other: Fraction) -> Result<Fraction, FractionError> {
    add(self, other)
  }

  pub fn subtract(self, other: Fraction) -> Result<Fraction, FractionError> {
    subtract(self, other)
  }

  pub fn multiply(self, other: Fraction) -> Result<Fraction, FractionError> {
    multiply(self, other)
  }

  pub fn divide(self, other: Fraction) -> Result<Fraction, FractionError> {
    divide(self, other)
  }
}

impl std::fmt::Display for Fraction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}/{}", self.numerator, self.denominator)
  }
}

/// Euclidean algorithm. `gcd(a, 0) == a`, so `gcd(0, d) == d`.
pub fn gcd<T: Integer + Copy>(a: T, b: T) -> T {
  if b.is_zero() {
    a
  } else {
    gcd(b, a % b)
  }
}

/// `(x / gcd(x, y)) * y`, dividing first to keep the product small.
pub fn lcm<T: Integer + Copy>(x: T, y: T) -> T {
  (x / gcd(x, y)) * y
}

/// Reduces `numerator/denominator` to lowest terms with a positive
/// denominator. Intermediates are `i128` so callers can pass products of two
/// `i64` values; the reduced result must fit back into `i64`.
fn normalize(numerator: i128, denominator: i128) -> Result<Fraction, FractionError> {
  if denominator == 0 {
    return Err(FractionError::InvalidDenominator);
  }
  let common = gcd(numerator.abs(), denominator.abs());
  let mut numerator = numerator / common;
  let mut denominator = denominator / common;
  if denominator < 0 {
    numerator = -numerator;
    denominator = -denominator;
  }
  let numerator = i64::try_from(numerator).map_err(|_| FractionError::Overflow)?;
  let denominator = i64::try_from(denominator).map_err(|_| FractionError::Overflow)?;
  Ok(Fraction {
    numerator,
    denominator,
  })
}

fn scaled_numerators(a: Fraction, b: Fraction) -> (i128, i128, i128) {
  let common_denominator = lcm(a.denominator as i128, b.denominator as i128);
  let left = a.numerator as i128 * (common_denominator / a.denominator as i128);
  let right = b.numerator as i128 * (common_denominator / b.denominator as i128);
  (left, right, common_denominator)
}

pub fn add(a: Fraction, b: Fraction) -> Result<Fraction, FractionError> {
  let (left, right, common_denominator) = scaled_numerators(a, b);
  normalize(left + right, common_denominator)
}

pub fn subtract(a: Fraction, b: Fraction) -> Result<Fraction, FractionError> {
  let (left, right, common_denominator) = scaled_numerators(a, b);
  normalize(left - right, common_denominator)
}

pub fn multiply(a: Fraction, b: Fraction) -> Result<Fraction, FractionError> {
  normalize(
    a.numerator as i128 * b.numerator as i128,
    a.denominator as i128 * b.denominator as i128,
  )
}

pub fn divide(a: Fraction, b: Fraction) -> Result<Fraction, FractionError> {
  if b.is_zero() {
    return Err(FractionError::DivisionByZero);
  }
  normalize(
    a.numerator as i128 * b.denominator as i128,
    a.denominator as i128 * b.numerator as i128,
  )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionError {
  InvalidDenominator,
  DivisionByZero,
  Overflow,
}

impl std::fmt::Display for FractionError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FractionError::InvalidDenominator => write!(f, "denominator cannot be zero"),
      FractionError::DivisionByZero => write!(f, "cannot divide by zero"),
      FractionError::Overflow => write!(f, "result does not fit in a 64-bit fraction"),
    }
  }
}

impl std::error::Error for FractionError {}
