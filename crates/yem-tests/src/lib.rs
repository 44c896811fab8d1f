//! Scenario and adversarial test suite for the Yem payout engine.
//!
//! Integration tests drive `yem-brain` through whole event sequences and
//! check the payout invariants across crates.

pub mod helpers;
