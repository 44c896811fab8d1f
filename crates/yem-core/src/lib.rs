//! # yem-core
//! Foundation types and traits for the Yem payout engine.
//!
//! Amounts are exact rationals throughout; nothing in the engine touches
//! floating point.

pub mod amount;
pub mod constants;
pub mod error;
pub mod payout;
pub mod reciprocal;
pub mod traits;
pub mod types;

pub use amount::{Amount, Money};
pub use payout::Payout;
pub use reciprocal::ReciprocalSum;
pub use traits::ReciprocalSource;
pub use types::{ResourceId, UserId};
