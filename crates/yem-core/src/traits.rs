//! Trait interfaces for the Yem engine.
//!
//! - [`ReciprocalSource`] — harmonic accumulator (yem-harmonic implements)

use crate::amount::Amount;
use crate::error::HarmonicError;
use crate::reciprocal::ReciprocalSum;

/// Supplier of reciprocal-sum records.
///
/// Implemented by the memoizing `HarmonicCache` (yem-harmonic). Hosts may
/// inject their own implementation; every implementation must return the
/// record whose `natural()` equals `n` and must be referentially transparent.
pub trait ReciprocalSource<A: Amount>: Send + Sync {
    /// The record for `1/1 … 1/n`. `n == 0` yields the identity record.
    fn reciprocals_to(&self, n: usize) -> Result<ReciprocalSum<A>, HarmonicError>;

    /// `Σ 1/i` for `i in 1..=n`.
    ///
    /// Default implementation delegates to [`reciprocals_to`](Self::reciprocals_to).
    fn harmonic_total(&self, n: usize) -> Result<A, HarmonicError> {
        Ok(self.reciprocals_to(n)?.total().clone())
    }
}
