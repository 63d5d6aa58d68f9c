//! Likert rating value.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected rating input: not a whole number in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidChoice;

impl Display for InvalidChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Choice must be an integer between 1 and 5.")
    }
}

impl Error for InvalidChoice {}

/// Validated Likert rating in `1..=5`.
///
/// The only way to obtain a `Rating` is through the checked conversions below,
/// so holding one proves the value is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Every rating in ascending order.
    pub const ALL: [Rating; 5] = [Rating(1), Rating(2), Rating(3), Rating(4), Rating(5)];

    pub fn value(self) -> u8 {
        self.0
    }

    /// Zero-based histogram bucket (`1 -> 0`, `5 -> 4`).
    pub fn bucket(self) -> usize {
        usize::from(self.0 - Self::MIN)
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Rating {
    type Error = InvalidChoice;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(InvalidChoice)
        }
    }
}

impl TryFrom<i32> for Rating {
    type Error = InvalidChoice;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<u8> for Rating {
    type Error = InvalidChoice;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

/// Numeric input from loosely typed sources (JSON numbers, CLI text).
/// Fractional values such as `3.5` are rejected, not rounded.
impl TryFrom<f64> for Rating {
    type Error = InvalidChoice;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(InvalidChoice);
        }
        if value < f64::from(Self::MIN) || value > f64::from(Self::MAX) {
            return Err(InvalidChoice);
        }
        Ok(Self(value as u8))
    }
}

impl From<Rating> for i64 {
    fn from(value: Rating) -> Self {
        i64::from(value.0)
    }
}
