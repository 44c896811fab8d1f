//! # yem-harmonic — Memoized harmonic accumulator.
//!
//! View payouts weight the upvoter at rank `i` by `1/i`, so every view needs
//! the terms `1/1 … 1/k` and their sum for the resource's upvote count `k`.
//! [`HarmonicCache`] computes these once and serves any smaller `k` from the
//! same storage:
//! - **Exact**: terms and totals are exact rationals.
//! - **Grow-only**: the cache extends by the missing suffix and never evicts.
//! - **Shared**: concurrent callers are serialized behind a `RwLock`; reads of
//!   the cached range never block each other.

pub mod cache;

pub use cache::{reciprocals_to, shared, HarmonicCache};
