//! End-to-end payout scenarios.
//!
//! Each test threads one platform state through a sequence of upvotes and
//! views and checks the exact payouts and the state left behind.

use std::sync::Arc;

use yem_brain::{PlatformConfig, PlatformState};
use yem_core::amount::{whole, Money};
use yem_core::error::TransitionError;
use yem_core::payout::Payout;
use yem_core::traits::ReciprocalSource;
use yem_harmonic::HarmonicCache;
use yem_tests::helpers::*;

#[test]
fn two_upvotes_then_view() {
    let (a, b, c) = (user("A"), user("B"), user("C"));
    let r = resource("r");
    let server = user(SERVER);
    let p0 = platform(&[a.clone(), b.clone(), c.clone()], &[r.clone()]);

    let t1 = p0.upvote(&a, whole(1), &r).unwrap();
    assert_eq!(upvoters_of(&t1.state, &r), Some(vec![a.clone()]));
    assert_eq!(t1.payout, Payout::single(server.clone(), whole(1)));

    let t2 = t1.state.upvote(&b, whole(1), &r).unwrap();
    assert_eq!(upvoters_of(&t2.state, &r), Some(vec![a.clone(), b.clone()]));
    assert_eq!(t2.payout, Payout::single(server.clone(), whole(1)));

    let t3 = t2.state.view(&c, whole(1), &r).unwrap();
    assert_eq!(t3.payout.len(), 3);
    assert_eq!(t3.payout.get(&a), Some(&frac(2, 5)));
    assert_eq!(t3.payout.get(&b), Some(&frac(1, 5)));
    assert_eq!(t3.payout.get(&server), Some(&frac(2, 5)));
    assert_eq!(t3.payout.total(), whole(1));

    let err = t3.state.upvote(&a, whole(1), &r).unwrap_err();
    assert_eq!(err, TransitionError::AlreadyUpvoted);
    assert_eq!(upvoters_of(&t3.state, &r), Some(vec![a, b]));
}

#[test]
fn history_stays_valid() {
    let users = numbered_users(4);
    let r = resource("r");
    let p0 = platform(&users, &[r.clone()]);

    let mut history = vec![p0.clone()];
    for u in &users {
        let next = history.last().unwrap().upvote(u, whole(1), &r).unwrap().state;
        history.push(next);
    }

    for (len, state) in history.iter().enumerate() {
        assert_eq!(upvoters_of(state, &r).unwrap(), &users[..len]);
    }
}

#[test]
fn resources_are_independent() {
    let users = numbered_users(3);
    let (r, s) = (resource("r"), resource("s"));
    let p = platform(&users, &[r.clone(), s.clone()]);
    let events = [upvote(&users[0], &r), upvote(&users[1], &s), upvote(&users[2], &r)];
    let (p, _) = replay(&p, &events);

    assert_eq!(upvoters_of(&p, &r), Some(vec![users[0].clone(), users[2].clone()]));
    assert_eq!(upvoters_of(&p, &s), Some(vec![users[1].clone()]));

    let t = p.view(&users[0], whole(1), &s).unwrap();
    // s has one upvoter: total = 1 + 1 = 2.
    assert_eq!(t.payout.get(&users[1]), Some(&frac(1, 2)));
    assert!(!t.payout.contains(&users[0]));
}

#[test]
fn server_as_upvoter_gets_combined_entry() {
    let server = user(SERVER);
    let (a, b) = (user("a"), user("b"));
    let r = resource("r");
    let p = platform(&[server.clone(), a.clone(), b.clone()], &[r.clone()]);
    let (p, accepted) = replay(&p, &[upvote(&a, &r), upvote(&server, &r)]);
    assert_eq!(accepted, 2);

    let t = p.view(&b, whole(1), &r).unwrap();
    // Weights: a 1, server 1/2 + share 1; total 5/2.
    assert_eq!(t.payout.len(), 2);
    assert_eq!(t.payout.get(&a), Some(&frac(2, 5)));
    assert_eq!(t.payout.get(&server), Some(&frac(3, 5)));
}

#[test]
fn custom_prices_gate_payments() {
    let (a, b) = (user("a"), user("b"));
    let r = resource("r");
    let config = PlatformConfig::new(user(SERVER), frac(5, 2), frac(1, 10), whole(3)).unwrap();
    let p = platform_with(config, &[a.clone(), b.clone()], &[r.clone()]);

    assert!(matches!(
        p.upvote(&a, whole(2), &r),
        Err(TransitionError::InsufficientPayment { .. })
    ));
    let t = p.upvote(&a, frac(5, 2), &r).unwrap();
    assert_eq!(t.payout.get(&user(SERVER)), Some(&frac(5, 2)));

    assert!(t.state.view(&b, frac(1, 11), &r).is_err());
    let v = t.state.view(&b, frac(1, 10), &r).unwrap();
    // total = 1 + 3 = 4
    assert_eq!(v.payout.get(&a), Some(&frac(1, 4)));
    assert_eq!(v.payout.get(&user(SERVER)), Some(&frac(3, 4)));
}

#[test]
fn platforms_can_share_one_cache() {
    let cache = Arc::new(HarmonicCache::<Money>::new());
    let users = numbered_users(6);
    let r = resource("r");
    let build = || {
        PlatformState::builder(PlatformConfig::with_defaults(user(SERVER)))
            .users(users.iter().cloned())
            .resource(r.clone())
            .harmonics(cache.clone())
            .build()
            .unwrap()
    };

    let events: Vec<_> = users.iter().map(|u| upvote(u, &r)).collect();
    let (first, _) = replay(&build(), &events);
    let (second, _) = replay(&build(), &events[..3]);

    first.view(&users[0], whole(1), &r).unwrap();
    assert_eq!(cache.len(), 6);
    second.view(&users[0], whole(1), &r).unwrap();
    assert_eq!(cache.len(), 6);
    assert_eq!(cache.harmonic_total(3).unwrap(), frac(11, 6));
}

#[test]
fn global_cache_serves_default_amounts() {
    let record = yem_harmonic::reciprocals_to(4).unwrap();
    assert_eq!(*record.total(), frac(25, 12));
    assert!(yem_harmonic::shared().len() >= 4);
}
