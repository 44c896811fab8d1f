//! Error types for the Yem payout engine.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("invalid amount {input:?}: {reason}")] Parse { input: String, reason: String },
    #[error("amount arithmetic overflowed")] Overflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarmonicError {
    #[error("count {0} is not representable by the amount type")] CountOutOfRange(usize),
    #[error("harmonic sum overflowed at term {0}")] Overflow(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("server share must be positive, got {0}")] NonPositiveServerShare(String),
    #[error("{which} price must not be negative, got {value}")]
    NegativePrice { which: &'static str, value: String },
    #[error("duplicate upvoter {user} on resource {resource}")]
    DuplicateUpvoter { user: String, resource: String },
}

/// Why a transition produced no new state.
///
/// The first four variants are the precondition failures of `upvote` and
/// `view`. [`TransitionError::Harmonic`] and [`TransitionError::Amount`] are
/// arithmetic failures (a fixed-width amount overflowed) and never happen
/// with [`Money`](crate::amount::Money).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("unknown user")] UnknownUser,
    #[error("unknown resource")] UnknownResource,
    #[error("insufficient payment: paid {paid}, price {price}")]
    InsufficientPayment { paid: String, price: String },
    #[error("user already upvoted this resource")] AlreadyUpvoted,
    #[error(transparent)] Harmonic(#[from] HarmonicError),
    #[error(transparent)] Amount(#[from] AmountError),
}

impl TransitionError {
    /// Whether this is an ordinary rejected transaction rather than an
    /// arithmetic failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, TransitionError::Harmonic(_) | TransitionError::Amount(_))
    }
}
