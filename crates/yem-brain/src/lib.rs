//! # yem-brain — Platform state machine.
//!
//! Users pay to upvote or view a resource. An upvote appends the user to the
//! resource's upvoter list and pays the operator; a view splits a unit share
//! between the upvoters (the `i`-th upvoter weighted `1/i`) and the operator
//! (weighted by the configured server share).
//!
//! Every transition takes `&self` and returns a new [`PlatformState`] plus a
//! [`Payout`](yem_core::Payout); the old state stays valid and unchanged.
//! Registrations are shared between states through `Arc`; resource maps and
//! upvoter lists are persistent collections, so an upvote copies only the
//! path it touches.

pub mod config;
pub mod event;
pub mod platform;
pub mod upvoters;

pub use config::PlatformConfig;
pub use event::Event;
pub use platform::{Outcome, PlatformBuilder, PlatformState, Transition};
pub use upvoters::Upvoters;
