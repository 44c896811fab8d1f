//! Engine defaults. Prices and shares are whole units unless configured.

/// Default price of one upvote.
pub const DEFAULT_UPVOTE_PRICE: i64 = 1;

/// Default price of one view.
pub const DEFAULT_VIEW_PRICE: i64 = 1;

/// Default operator share weight in the view split.
///
/// Compared against the harmonic total of the upvoters, so a share of 1 gives
/// the operator the same weight as the first upvoter.
pub const DEFAULT_SERVER_SHARE: i64 = 1;

/// Default operator identity used by the CLI.
pub const DEFAULT_SERVER_ID: &str = "server";
