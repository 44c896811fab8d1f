//! Platform configuration: operator identity, prices, and operator share.
//!
//! Validated once when a [`PlatformState`](crate::PlatformState) is built so
//! that no transition can hit a zero denominator.

use yem_core::amount::{whole, Amount, Money};
use yem_core::constants::{DEFAULT_SERVER_SHARE, DEFAULT_UPVOTE_PRICE, DEFAULT_VIEW_PRICE};
use yem_core::error::ConfigError;

/// Prices and operator settings for a platform instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformConfig<U, A = Money> {
    /// Operator identity. Receives every upvote payment and its share of
    /// each view. Need not be a registered user.
    pub server: U,
    /// Minimum payment accepted for an upvote.
    pub upvote_price: A,
    /// Minimum payment accepted for a view.
    pub view_price: A,
    /// Operator weight in the view split, alongside the upvoters' `1/i`
    /// weights. Must be positive.
    pub server_share: A,
}

impl<U, A: Amount> PlatformConfig<U, A> {
    /// Build and validate a configuration.
    pub fn new(
        server: U,
        upvote_price: A,
        view_price: A,
        server_share: A,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            server,
            upvote_price,
            view_price,
            server_share,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NonPositiveServerShare`] if `server_share <= 0`; with
    ///   no upvoters the view denominator is the share alone
    /// - [`ConfigError::NegativePrice`] if either price is below zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server_share.is_strictly_positive() {
            return Err(ConfigError::NonPositiveServerShare(self.server_share.to_string()));
        }
        if self.upvote_price.is_below_zero() {
            return Err(ConfigError::NegativePrice {
                which: "upvote",
                value: self.upvote_price.to_string(),
            });
        }
        if self.view_price.is_below_zero() {
            return Err(ConfigError::NegativePrice {
                which: "view",
                value: self.view_price.to_string(),
            });
        }
        Ok(())
    }
}

impl<U> PlatformConfig<U, Money> {
    /// Whole-unit defaults: both prices and the server share are 1.
    pub fn with_defaults(server: U) -> Self {
        Self {
            server,
            upvote_price: whole(DEFAULT_UPVOTE_PRICE),
            view_price: whole(DEFAULT_VIEW_PRICE),
            server_share: whole(DEFAULT_SERVER_SHARE),
        }
    }
}
