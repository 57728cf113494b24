use std::{
    fmt,
    ops::Neg,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{EngineError, ResultEngine};

/// Largest magnitude (in cents) that survives a round trip through `f64`.
const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_992.0;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** stored monetary values in the engine (item
/// prices, custom shares) to avoid floating-point drift. Per-participant
/// liabilities, which can be fractions of a cent, use
/// [`Liability`](crate::Liability).
///
/// Prices and shares are never negative once stored; the sign is kept so that
/// differences (e.g. what is left to assign on a custom split) stay
/// representable.
///
/// On the wire the amount is a JSON number in major units (`12.34`).
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<MoneyCents>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    #[must_use]
    pub const fn saturating_add(self, rhs: MoneyCents) -> MoneyCents {
        MoneyCents(self.0.saturating_add(rhs.0))
    }

    #[must_use]
    pub const fn saturating_sub(self, rhs: MoneyCents) -> MoneyCents {
        MoneyCents(self.0.saturating_sub(rhs.0))
    }

    /// Sums `amounts`, failing with [`EngineError::InvalidInput`] on overflow.
    pub fn total(amounts: impl IntoIterator<Item = MoneyCents>) -> ResultEngine<MoneyCents> {
        amounts
            .into_iter()
            .try_fold(MoneyCents::ZERO, |acc, amount| acc.checked_add(amount))
            .ok_or_else(|| EngineError::InvalidInput("amounts too large to add up".to_string()))
    }

    /// Sums `amounts`, clamping at the `i64` bounds.
    ///
    /// Stored amounts are never negative, so a clamped sum still compares
    /// unequal to any representable price.
    #[must_use]
    pub fn saturating_total(amounts: impl IntoIterator<Item = MoneyCents>) -> MoneyCents {
        amounts
            .into_iter()
            .fold(MoneyCents::ZERO, MoneyCents::saturating_add)
    }

    /// Converts a major-unit float (as produced by receipt extraction or sent
    /// by a client) into cents, rounding to the nearest cent.
    ///
    /// Rejects NaN, infinities and values that cannot be represented exactly.
    pub fn from_major(value: f64) -> ResultEngine<Self> {
        if !value.is_finite() {
            return Err(EngineError::InvalidInput(
                "amount must be a finite number".to_string(),
            ));
        }
        let cents = (value * 100.0).round();
        if cents.abs() > MAX_EXACT_CENTS {
            return Err(EngineError::InvalidInput("amount too large".to_string()));
        }
        Ok(MoneyCents(cents as i64))
    }

    /// Returns the amount in major units (`1234` cents -> `12.34`).
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Ensures the amount is `>= 0`, labelling the error with `label`.
    pub fn non_negative(self, label: &str) -> ResultEngine<Self> {
        if self.is_negative() {
            return Err(EngineError::InvalidInput(format!(
                "{label} must not be negative"
            )));
        }
        Ok(self)
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}

impl Serialize for MoneyCents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for MoneyCents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        MoneyCents::from_major(value).map_err(serde::de::Error::custom)
    }
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Parses a typed or recognized price (`12`, `12.5`, `12,50`, `-0.01`)
    /// into cents. At most two decimals are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidInput("empty amount".to_string());
        let invalid = || EngineError::InvalidInput("invalid amount".to_string());
        let overflow = || EngineError::InvalidInput("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let fraction_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let major: i64 = major_str.parse().map_err(|_| overflow())?;

        let fraction = fraction_str.unwrap_or_default();
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // "5" is fifty cents, "05" five.
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 | 2 => {
                let digits: i64 = fraction.parse().map_err(|_| invalid())?;
                if fraction.len() == 1 { digits * 10 } else { digits }
            }
            _ => return Err(EngineError::InvalidInput("too many decimals".to_string())),
        };

        let total = major
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(MoneyCents(signed))
    }
}
