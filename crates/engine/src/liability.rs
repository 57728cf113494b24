//! Exact per-participant amounts.
//!
//! An equal split divides an item price by the number of participants, which
//! rarely lands on a whole cent (`10.00 / 3`). [`Liability`] keeps that
//! quotient as an exact fraction of cents so totals can be summed across any
//! number of items without drift. Rounding only happens when a value leaves
//! the engine ([`Liability::round_cents`], [`Display`](std::fmt::Display)).
//!
//! Fractions are added over the least common multiple of their denominators.
//! Equal splits over many differently sized groups can still outgrow `i128`,
//! so additions are checked and surface as [`EngineError::InvalidInput`].

use std::{cmp::Ordering, fmt};

use crate::{EngineError, MoneyCents, ResultEngine};

/// A non-rounded amount of cents, stored as a reduced fraction.
///
/// The denominator is always positive and the fraction is always reduced, so
/// the derived equality is value equality.
///
/// ```rust
/// use engine::{Liability, MoneyCents};
///
/// let third = Liability::split(MoneyCents::new(10_00), 3);
/// assert_eq!(third.round_cents(), MoneyCents::new(3_33));
/// assert_eq!(
///     Liability::total([third, third, third]).unwrap(),
///     Liability::from_cents(MoneyCents::new(10_00))
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Liability {
    numer: i128,
    denom: i128,
}

impl Liability {
    pub const ZERO: Liability = Liability { numer: 0, denom: 1 };

    /// A whole amount of cents.
    #[must_use]
    pub const fn from_cents(amount: MoneyCents) -> Self {
        Self {
            numer: amount.cents() as i128,
            denom: 1,
        }
    }

    /// `price / parts`, or zero when `parts` is 0.
    #[must_use]
    pub fn split(price: MoneyCents, parts: usize) -> Self {
        if parts == 0 {
            return Self::ZERO;
        }
        Self::reduced(price.cents() as i128, parts as i128)
    }

    /// `denom` must be positive.
    fn reduced(numer: i128, denom: i128) -> Self {
        // Both magnitudes fit in i128, so their gcd does too.
        let divisor = gcd(numer.unsigned_abs(), denom.unsigned_abs()).max(1) as i128;
        Self {
            numer: numer / divisor,
            denom: denom / divisor,
        }
    }

    /// Exact sum, `None` when it does not fit.
    ///
    /// The result's whole-cent part must also fit in [`MoneyCents`].
    #[must_use]
    pub fn checked_add(self, rhs: Liability) -> Option<Liability> {
        let common = gcd(self.denom.unsigned_abs(), rhs.denom.unsigned_abs()) as i128;
        let lhs_factor = rhs.denom / common;
        let rhs_factor = self.denom / common;
        let denom = self.denom.checked_mul(lhs_factor)?;
        let numer = self
            .numer
            .checked_mul(lhs_factor)?
            .checked_add(rhs.numer.checked_mul(rhs_factor)?)?;
        let sum = Self::reduced(numer, denom);
        i64::try_from(sum.numer / sum.denom).ok()?;
        Some(sum)
    }

    /// Sums `values` exactly.
    pub fn total(values: impl IntoIterator<Item = Liability>) -> ResultEngine<Liability> {
        values.into_iter().try_fold(Liability::ZERO, |acc, value| {
            acc.checked_add(value).ok_or_else(|| {
                EngineError::InvalidInput("amounts too large to add up".to_string())
            })
        })
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.numer == 0
    }

    /// Returns `true` when the value is a whole number of cents.
    #[must_use]
    pub const fn is_whole_cents(self) -> bool {
        self.denom == 1
    }

    /// Rounds to the nearest cent, halves away from zero.
    #[must_use]
    pub fn round_cents(self) -> MoneyCents {
        let quotient = self.numer / self.denom;
        let remainder = (self.numer % self.denom).abs();
        let rounded = if remainder >= self.denom - remainder {
            quotient + self.numer.signum()
        } else {
            quotient
        };
        let saturated = if rounded < 0 { i64::MIN } else { i64::MAX };
        MoneyCents::new(i64::try_from(rounded).unwrap_or(saturated))
    }

    /// Returns the value in major units without rounding to cents.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.numer as f64 / self.denom as f64 / 100.0
    }
}

impl Default for Liability {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<MoneyCents> for Liability {
    fn from(value: MoneyCents) -> Self {
        Self::from_cents(value)
    }
}

impl PartialOrd for Liability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Liability {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_fractions(self.numer, self.denom, other.numer, other.denom)
    }
}

/// Compares `a / b` with `c / d` (`b`, `d` positive) without multiplying,
/// by walking their continued fractions.
fn compare_fractions(a: i128, b: i128, c: i128, d: i128) -> Ordering {
    let (whole_ab, rest_ab) = (a.div_euclid(b), a.rem_euclid(b));
    let (whole_cd, rest_cd) = (c.div_euclid(d), c.rem_euclid(d));
    match whole_ab.cmp(&whole_cd) {
        Ordering::Equal => {}
        unequal => return unequal,
    }
    match (rest_ab, rest_cd) {
        (0, 0) => Ordering::Equal,
        (0, _) => Ordering::Less,
        (_, 0) => Ordering::Greater,
        // rest_ab / b against rest_cd / d is the reverse of b / rest_ab against d / rest_cd.
        _ => compare_fractions(b, rest_ab, d, rest_cd).reverse(),
    }
}

impl fmt::Display for Liability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.round_cents().fmt(f)
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_by_zero_is_zero() {
        assert_eq!(Liability::split(MoneyCents::new(1000), 0), Liability::ZERO);
    }

    #[test]
    fn thirds_sum_back_exactly() {
        let third = Liability::split(MoneyCents::new(1000), 3);
        assert!(!third.is_whole_cents());
        let total = Liability::total(std::iter::repeat_n(third, 3)).unwrap();
        assert_eq!(total, Liability::from_cents(MoneyCents::new(1000)));
        assert!(total.is_whole_cents());
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(Liability::split(MoneyCents::new(1), 2).round_cents().cents(), 1);
        assert_eq!(Liability::split(MoneyCents::new(-1), 2).round_cents().cents(), -1);
        assert_eq!(Liability::split(MoneyCents::new(1000), 3).round_cents().cents(), 333);
        assert_eq!(Liability::split(MoneyCents::new(2000), 3).round_cents().cents(), 667);
    }

    #[test]
    fn mixed_denominators_add_up() {
        let half = Liability::split(MoneyCents::new(100), 2);
        let third = Liability::split(MoneyCents::new(100), 3);
        let sum = half.checked_add(third).unwrap();
        // 50 + 33.33.. = 83.33..
        assert_eq!(sum.round_cents().cents(), 83);
        assert!(sum > Liability::from_cents(MoneyCents::new(83)));
        assert!(sum < Liability::from_cents(MoneyCents::new(84)));
    }

    #[test]
    fn many_group_sizes_add_up_exactly() {
        // Denominators up to lcm(1..=60) stay within range.
        let parts: Vec<Liability> = (1..=60)
            .map(|n| Liability::split(MoneyCents::new(100), n))
            .collect();
        let total = Liability::total(parts.iter().copied()).unwrap();
        // 1.00 * H(60), H(60) = 4.6798...
        assert_eq!(total.round_cents().cents(), 468);
        let doubled = Liability::total(parts.iter().chain(parts.iter()).copied()).unwrap();
        assert_eq!(doubled.round_cents().cents(), 936);
    }

    #[test]
    fn overflowing_sums_are_errors() {
        let parts = (1..=120).map(|n| Liability::split(MoneyCents::new(100), n));
        assert!(matches!(
            Liability::total(parts),
            Err(EngineError::InvalidInput(_))
        ));

        let max = Liability::from_cents(MoneyCents::new(i64::MAX));
        let cent = Liability::from_cents(MoneyCents::new(1));
        assert_eq!(max.checked_add(cent), None);
    }

    #[test]
    fn ordering_handles_large_denominators() {
        let big = Liability::split(MoneyCents::new(i64::MAX), 7);
        let bigger = Liability::split(MoneyCents::new(i64::MAX), 6);
        assert!(big < bigger);
        assert!(Liability::split(MoneyCents::new(-1), 3) < Liability::ZERO);
        assert_eq!(
            Liability::split(MoneyCents::new(2), 4).cmp(&Liability::split(MoneyCents::new(1), 2)),
            Ordering::Equal
        );
    }

    #[test]
    fn display_rounds_for_presentation() {
        assert_eq!(Liability::split(MoneyCents::new(999), 3).to_string(), "3.33");
        assert_eq!(Liability::split(MoneyCents::new(1000), 3).to_string(), "3.33");
    }
}
