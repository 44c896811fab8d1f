//! Exact monetary amounts.
//!
//! Every price, payment, share and payout is an exact fraction. The engine is
//! generic over [`Amount`]; [`Money`] (an arbitrary-precision
//! [`BigRational`]) is the default and cannot overflow. Fixed-width ratios
//! such as `Ratio<i64>` also satisfy the trait; the engine only combines
//! amounts through [`CheckedAdd`] and [`CheckedDiv`], so an overflow surfaces
//! as an error instead of a panic or a wrapped value.

use std::fmt::{Debug, Display};
use std::ops::{Add, Div};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::{BigRational, Ratio};
use num_traits::{CheckedAdd, CheckedDiv, FromPrimitive, One, Zero};

use crate::error::AmountError;

/// Default amount type: an arbitrary-precision exact fraction.
pub type Money = BigRational;

/// Exact rational arithmetic required by the payout engine.
///
/// Construction from counts, checked addition and division, and ordering.
/// Division by zero is never attempted by the engine: the only divisor it
/// uses is the view denominator, which is positive by configuration.
pub trait Amount:
    Clone
    + Debug
    + Display
    + PartialOrd
    + Zero
    + One
    + Add<Output = Self>
    + Div<Output = Self>
    + CheckedAdd
    + CheckedDiv
    + Send
    + Sync
    + 'static
{
    /// The integer `n` as an amount, or `None` if the type cannot hold it.
    fn from_count(n: usize) -> Option<Self>;

    /// `1 / n`, or `None` for `n == 0` or an unrepresentable `n`.
    fn reciprocal_of(n: usize) -> Option<Self> {
        if n == 0 {
            return None;
        }
        Self::one().checked_div(&Self::from_count(n)?)
    }

    /// `self > 0`.
    fn is_strictly_positive(&self) -> bool {
        *self > Self::zero()
    }

    /// `self < 0`.
    fn is_below_zero(&self) -> bool {
        *self < Self::zero()
    }
}

impl<T> Amount for Ratio<T>
where
    T: Clone + Debug + Display + FromPrimitive + One + Send + Sync + 'static,
    Ratio<T>: PartialOrd
        + Zero
        + One
        + Add<Output = Ratio<T>>
        + Div<Output = Ratio<T>>
        + CheckedAdd
        + CheckedDiv
        + Display,
{
    fn from_count(n: usize) -> Option<Self> {
        T::from_usize(n).map(|numer| Ratio::new_raw(numer, T::one()))
    }
}

/// Build a [`Money`] value `numer / denom`.
///
/// Returns `None` when `denom` is zero.
pub fn money(numer: i64, denom: i64) -> Option<Money> {
    if denom == 0 {
        return None;
    }
    Some(Money::new(BigInt::from(numer), BigInt::from(denom)))
}

/// Whole-number [`Money`].
pub fn whole(n: i64) -> Money {
    Money::from_integer(BigInt::from(n))
}

/// Parse a [`Money`] value from text.
///
/// Accepts integers (`"3"`), fractions (`"3/2"`) and decimals (`"0.25"`),
/// each optionally signed. Decimals are converted exactly.
pub fn parse_money(input: &str) -> Result<Money, AmountError> {
    let trimmed = input.trim();
    let fail = |reason: &str| AmountError::Parse {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(fail("empty"));
    }

    if let Some((int_part, frac_part)) = trimmed.split_once('.') {
        let (negative, int_digits) = match int_part.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, int_part.strip_prefix('+').unwrap_or(int_part)),
        };
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if frac_part.is_empty() || !all_digits(int_digits) || !all_digits(frac_part) {
            return Err(fail("malformed decimal"));
        }
        let digits = format!("{int_digits}{frac_part}");
        let numer = BigInt::from_str(&digits).map_err(|e| fail(&e.to_string()))?;
        let numer = if negative { -numer } else { numer };
        let scale = num_traits::pow(BigInt::from(10u8), frac_part.len());
        return Ok(Money::new(numer, scale));
    }

    Money::from_str(trimmed).map_err(|e| fail(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Amount for Money ---

    #[test]
    fn from_count_is_exact() {
        assert_eq!(Money::from_count(0), Some(whole(0)));
        assert_eq!(Money::from_count(7), Some(whole(7)));
    }

    #[test]
    fn reciprocal_of_zero_is_none() {
        assert_eq!(Money::reciprocal_of(0), None);
    }

    #[test]
    fn reciprocal_of_is_one_over_n() {
        assert_eq!(Money::reciprocal_of(1), Some(whole(1)));
        assert_eq!(Money::reciprocal_of(4), money(1, 4));
    }

    #[test]
    fn sign_helpers() {
        assert!(whole(1).is_strictly_positive());
        assert!(!whole(0).is_strictly_positive());
        assert!(whole(-1).is_below_zero());
        assert!(!whole(0).is_below_zero());
    }

    // --- fixed-width ratios ---

    #[test]
    fn small_ratio_satisfies_amount() {
        type Small = Ratio<i64>;
        assert_eq!(Small::reciprocal_of(3), Some(Small::new(1, 3)));
    }

    #[test]
    fn small_ratio_addition_reports_overflow() {
        type Small = Ratio<i64>;
        let big = Small::new(i64::MAX, 1);
        assert_eq!(big.checked_add(&Small::new(1, 1)), None);
        assert_eq!(Small::new(1, 2).checked_add(&Small::new(1, 3)), Some(Small::new(5, 6)));
    }

    #[test]
    fn unsigned_ratio_rejects_unrepresentable_count() {
        type Tiny = Ratio<u8>;
        assert_eq!(Tiny::from_count(255), Some(Tiny::new(255, 1)));
        assert_eq!(Tiny::from_count(256), None);
        assert_eq!(Tiny::reciprocal_of(300), None);
    }

    // --- money / parse_money ---

    #[test]
    fn money_rejects_zero_denominator() {
        assert_eq!(money(1, 0), None);
    }

    #[test]
    fn money_is_reduced() {
        assert_eq!(money(2, 4), money(1, 2));
    }

    #[test]
    fn parse_integer() {
        assert_eq!(parse_money("3").unwrap(), whole(3));
        assert_eq!(parse_money(" -2 ").unwrap(), whole(-2));
    }

    #[test]
    fn parse_fraction() {
        assert_eq!(parse_money("3/2").unwrap(), money(3, 2).unwrap());
    }

    #[test]
    fn parse_decimal() {
        assert_eq!(parse_money("0.25").unwrap(), money(1, 4).unwrap());
        assert_eq!(parse_money("-1.5").unwrap(), money(-3, 2).unwrap());
        assert_eq!(parse_money("+2.0").unwrap(), whole(2));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_money("").is_err());
        assert!(parse_money("abc").is_err());
        assert!(parse_money("1/0").is_err());
        assert!(parse_money("1.").is_err());
        assert!(parse_money("1.2.3").is_err());
    }
}
