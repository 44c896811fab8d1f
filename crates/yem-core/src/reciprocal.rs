//! Reciprocal-sum records: the harmonic-series terms `1/1 … 1/n` and their
//! running total.
//!
//! A record is immutable. [`ReciprocalSum::next`] produces the record for
//! `n + 1` and leaves `self` untouched. Records created by the same cache
//! share one term list through an [`Arc`]; each record only exposes the
//! first `natural()` terms of it.

use std::sync::Arc;

use crate::amount::Amount;
use crate::error::HarmonicError;

/// Harmonic terms `1/1 … 1/n` plus their exact sum.
///
/// # Invariants
///
/// * `reciprocals().len() == natural()`
/// * `reciprocals()[i] == 1 / (i + 1)`
/// * `total() == reciprocals().iter().sum()`
#[derive(Clone, Debug)]
pub struct ReciprocalSum<A> {
    natural: usize,
    /// Shared term storage; may be longer than `natural`.
    terms: Arc<Vec<A>>,
    total: A,
}

impl<A: Amount> ReciprocalSum<A> {
    /// The empty record `{0, [], 0}`.
    pub fn identity() -> Self {
        Self {
            natural: 0,
            terms: Arc::new(Vec::new()),
            total: A::zero(),
        }
    }

    /// Assemble a record over an existing term list.
    ///
    /// The caller guarantees that `terms[i] == 1/(i+1)` and that `total` is
    /// the sum of the first `natural` terms. Returns `None` when `terms` is
    /// shorter than `natural`.
    pub fn from_shared_terms(natural: usize, terms: Arc<Vec<A>>, total: A) -> Option<Self> {
        if terms.len() < natural {
            return None;
        }
        Some(Self {
            natural,
            terms,
            total,
        })
    }

    /// The record for `natural() + 1`.
    ///
    /// # Errors
    ///
    /// - [`HarmonicError::CountOutOfRange`] if `A` cannot hold `natural() + 1`
    /// - [`HarmonicError::Overflow`] if the new total does not fit in `A`
    pub fn next(&self) -> Result<Self, HarmonicError> {
        let natural = self.natural + 1;
        let term = A::reciprocal_of(natural).ok_or(HarmonicError::CountOutOfRange(natural))?;
        let total = self
            .total
            .checked_add(&term)
            .ok_or(HarmonicError::Overflow(natural))?;

        let terms = if self.terms.len() > self.natural {
            // The shared list already holds 1/natural at this position.
            Arc::clone(&self.terms)
        } else {
            let mut extended = Vec::with_capacity(natural);
            extended.extend_from_slice(&self.terms[..self.natural]);
            extended.push(term);
            Arc::new(extended)
        };

        Ok(Self {
            natural,
            terms,
            total,
        })
    }

    /// Number of terms, `n`.
    pub fn natural(&self) -> usize {
        self.natural
    }

    /// `[1/1, 1/2, …, 1/n]`.
    pub fn reciprocals(&self) -> &[A] {
        &self.terms[..self.natural]
    }

    /// `Σ 1/i` for `i in 1..=n`.
    pub fn total(&self) -> &A {
        &self.total
    }

    /// Weight of the upvoter at 1-based `rank`, i.e. `1/rank`.
    ///
    /// Returns `None` for rank 0 or a rank beyond `natural()`.
    pub fn weight(&self, rank: usize) -> Option<&A> {
        rank.checked_sub(1).and_then(|i| self.reciprocals().get(i))
    }
}

impl<A: Amount> Default for ReciprocalSum<A> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<A: Amount> PartialEq for ReciprocalSum<A> {
    fn eq(&self, other: &Self) -> bool {
        self.natural == other.natural
            && self.total == other.total
            && self.reciprocals() == other.reciprocals()
    }
}
