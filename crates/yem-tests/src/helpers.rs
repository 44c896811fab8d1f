//! Shared test helpers for scenario and adversarial tests.

use std::sync::Arc;

use yem_brain::{Event, PlatformConfig, PlatformState, Upvoters};
use yem_core::amount::{money, whole, Money};
use yem_core::types::{ResourceId, UserId};
use yem_harmonic::HarmonicCache;

pub type State = PlatformState<UserId, ResourceId>;

pub const SERVER: &str = "server";

pub fn user(id: &str) -> UserId {
    UserId::new(id)
}

pub fn resource(id: &str) -> ResourceId {
    ResourceId::new(id)
}

/// Exact fraction shorthand; panics on a zero denominator.
pub fn frac(numer: i64, denom: i64) -> Money {
    money(numer, denom).unwrap()
}

/// Users `u0..u{n}` in order.
pub fn numbered_users(n: usize) -> Vec<UserId> {
    (0..n).map(|i| user(&format!("u{i}"))).collect()
}

/// A platform with unit prices and share, the given users and resources,
/// and its own harmonic cache.
pub fn platform(users: &[UserId], resources: &[ResourceId]) -> State {
    platform_with(PlatformConfig::with_defaults(user(SERVER)), users, resources)
}

pub fn platform_with(
    config: PlatformConfig<UserId>,
    users: &[UserId],
    resources: &[ResourceId],
) -> State {
    PlatformState::builder(config)
        .users(users.iter().cloned())
        .resources(resources.iter().cloned())
        .harmonics(Arc::new(HarmonicCache::<Money>::new()))
        .build()
        .unwrap()
}

/// Upvoters of `r` in arrival order, or `None` if `r` is unregistered.
pub fn upvoters_of(state: &State, r: &ResourceId) -> Option<Vec<UserId>> {
    state.upvoters(r).map(Upvoters::to_vec)
}

pub fn upvote(u: &UserId, r: &ResourceId) -> Event<UserId, ResourceId> {
    Event::upvote(u.clone(), whole(1), r.clone())
}

pub fn view(u: &UserId, r: &ResourceId) -> Event<UserId, ResourceId> {
    Event::view(u.clone(), whole(1), r.clone())
}

/// Apply events in order, keeping the old state on rejection.
///
/// Returns the final state and the number of accepted events.
pub fn replay(state: &State, events: &[Event<UserId, ResourceId>]) -> (State, usize) {
    let mut current = state.clone();
    let mut accepted = 0;
    for event in events {
        if let Ok(t) = current.apply(event) {
            current = t.state;
            accepted += 1;
        }
    }
    (current, accepted)
}
