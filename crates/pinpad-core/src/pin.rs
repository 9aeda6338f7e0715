//! Digit and PIN value types.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::PinError;

/// Number of digits in a PIN.
pub const PIN_LENGTH: usize = 4;

/// A single decimal digit, `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// All ten digits in ascending order.
    pub const ALL: [Digit; 10] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    /// Create a digit from its numeric value.
    pub fn new(value: u8) -> Result<Self, PinError> {
        if value <= 9 { Ok(Self(value)) } else { Err(PinError::InvalidDigit(value)) }
    }

    /// Create a digit from an ASCII decimal character.
    pub fn from_char(c: char) -> Result<Self, PinError> {
        c.to_digit(10).map(|d| Self(d as u8)).ok_or(PinError::NotADigit(c))
    }

    /// Numeric value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Display character (`'0'..='9'`).
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<u8> for Digit {
    type Error = PinError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A complete PIN, exactly [`PIN_LENGTH`] digits.
///
/// `Debug` is redacted so a PIN never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PinCode([Digit; PIN_LENGTH]);

impl PinCode {
    /// Build a PIN from entered digits.
    pub fn from_digits(digits: &[Digit]) -> Result<Self, PinError> {
        let digits: [Digit; PIN_LENGTH] = digits.try_into().map_err(|_| {
            PinError::InvalidPinLength { expected: PIN_LENGTH, actual: digits.len() }
        })?;
        Ok(Self(digits))
    }

    /// The PIN digits in entry order.
    pub fn digits(&self) -> &[Digit; PIN_LENGTH] {
        &self.0
    }

    /// Compare against another PIN without short-circuiting on the first
    /// mismatching digit.
    pub fn matches(&self, other: &PinCode) -> bool {
        self.0.iter().zip(other.0.iter()).fold(0u8, |acc, (a, b)| acc | (a.0 ^ b.0)) == 0
    }
}

impl FromStr for PinCode {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.chars().map(Digit::from_char).collect::<Result<Vec<_>, _>>()?;
        Self::from_digits(&digits)
    }
}

impl fmt::Debug for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinCode(****)")
    }
}
