//! Harmonic cache implementing the [`ReciprocalSource`] trait.
//!
//! Holds one shared term list `[1/1, 1/2, …]` and the running totals for
//! every prefix of it. A lookup inside the cached range is an index plus an
//! `Arc` clone; a lookup beyond it appends the missing terms under the write
//! lock. The result is the same as applying [`ReciprocalSum::next`] from the
//! identity record until the requested count.

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use tracing::trace;
use yem_core::amount::{Amount, Money};
use yem_core::error::HarmonicError;
use yem_core::reciprocal::ReciprocalSum;
use yem_core::traits::ReciprocalSource;

/// Process-wide default cache for [`Money`].
static SHARED: LazyLock<Arc<HarmonicCache<Money>>> =
    LazyLock::new(|| Arc::new(HarmonicCache::new()));

/// Handle to the process-wide [`Money`] cache.
///
/// Hosts that want independent instances (tests, multiple platforms with
/// separate lifetimes) create their own [`HarmonicCache`] instead.
pub fn shared() -> Arc<HarmonicCache<Money>> {
    Arc::clone(&SHARED)
}

/// [`HarmonicCache::reciprocals_to`] on the process-wide cache.
pub fn reciprocals_to(n: usize) -> Result<ReciprocalSum<Money>, HarmonicError> {
    SHARED.reciprocals_to(n)
}

struct CacheInner<A> {
    /// `terms[i] == 1/(i+1)`.
    terms: Arc<Vec<A>>,
    /// `totals[n] == Σ terms[..n]`; `totals[0] == 0`, `totals.len() == terms.len() + 1`.
    totals: Vec<A>,
}

impl<A: Amount> CacheInner<A> {
    fn len(&self) -> usize {
        self.terms.len()
    }

    fn record(&self, n: usize) -> Option<ReciprocalSum<A>> {
        let total = self.totals.get(n)?.clone();
        ReciprocalSum::from_shared_terms(n, Arc::clone(&self.terms), total)
    }

    /// Append terms until `len() == n`.
    ///
    /// Terms and totals are pushed together, so a failure part-way leaves a
    /// consistent (shorter) cache.
    fn extend_to(&mut self, n: usize) -> Result<(), HarmonicError> {
        let start = self.terms.len();
        // If records handed out earlier still hold the list, make_mut clones
        // it first, so that extension is O(len) rather than O(n - len). The
        // held records keep the old list and stay valid.
        let terms = Arc::make_mut(&mut self.terms);
        terms.reserve(n.saturating_sub(start));

        let mut total = match self.totals.last() {
            Some(total) => total.clone(),
            None => A::zero(),
        };
        for natural in (start + 1)..=n {
            let term = A::reciprocal_of(natural).ok_or(HarmonicError::CountOutOfRange(natural))?;
            total = total
                .checked_add(&term)
                .ok_or(HarmonicError::Overflow(natural))?;
            terms.push(term);
            self.totals.push(total.clone());
        }
        Ok(())
    }
}

/// Grow-only memo of reciprocal-sum records.
pub struct HarmonicCache<A> {
    inner: RwLock<CacheInner<A>>,
}

impl<A: Amount> HarmonicCache<A> {
    /// An empty cache holding only the identity record.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CacheInner {
                terms: Arc::new(Vec::new()),
                totals: vec![A::zero()],
            }),
        }
    }

    /// Largest `n` currently answerable without extension.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether only the identity record is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The record for `1/1 … 1/n`, extending the cache if needed.
    pub fn reciprocals_to(&self, n: usize) -> Result<ReciprocalSum<A>, HarmonicError> {
        if let Some(record) = self.inner.read().record(n) {
            return Ok(record);
        }

        let mut inner = self.inner.write();
        // Another caller may have extended past `n` between the two locks.
        let cached = inner.len();
        if n > cached {
            trace!(from = cached, to = n, "extending harmonic cache");
            inner.extend_to(n)?;
        }
        inner.record(n).ok_or(HarmonicError::CountOutOfRange(n))
    }
}

impl<A: Amount> Default for HarmonicCache<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Amount> fmt::Debug for HarmonicCache<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarmonicCache")
            .field("len", &self.len())
            .finish()
    }
}

impl<A: Amount> ReciprocalSource<A> for HarmonicCache<A> {
    fn reciprocals_to(&self, n: usize) -> Result<ReciprocalSum<A>, HarmonicError> {
        HarmonicCache::reciprocals_to(self, n)
    }

    fn harmonic_total(&self, n: usize) -> Result<A, HarmonicError> {
        {
            let inner = self.inner.read();
            if let Some(total) = inner.totals.get(n) {
                return Ok(total.clone());
            }
        }
        Ok(HarmonicCache::reciprocals_to(self, n)?.total().clone())
    }
}
