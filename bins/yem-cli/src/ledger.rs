//! Running balances across a replay.
//!
//! Sums every accepted payout per recipient and keeps the rejected events
//! with their reasons, so a run can be summarised or emitted as JSON.

use std::collections::BTreeMap;

use serde::Serialize;
use yem_brain::Event;
use yem_core::amount::{whole, Money};
use yem_core::error::TransitionError;
use yem_core::payout::Payout;
use yem_core::types::{ResourceId, UserId};

/// A rejected event and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// 1-based position in the event stream.
    pub index: usize,
    pub kind: &'static str,
    pub user: UserId,
    pub resource: ResourceId,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct Ledger {
    balances: BTreeMap<UserId, Money>,
    accepted: usize,
    rejections: Vec<Rejection>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit every entry of an accepted payout.
    pub fn record_payout(&mut self, payout: &Payout<UserId, Money>) {
        self.accepted += 1;
        for (recipient, amount) in payout {
            let balance = self
                .balances
                .entry(recipient.clone())
                .or_insert_with(|| whole(0));
            *balance += amount.clone();
        }
    }

    pub fn record_rejection(
        &mut self,
        index: usize,
        event: &Event<UserId, ResourceId>,
        err: &TransitionError,
    ) {
        self.rejections.push(Rejection {
            index,
            kind: event.kind(),
            user: event.user().clone(),
            resource: event.resource().clone(),
            reason: err.to_string(),
        });
    }

    pub fn balances(&self) -> &BTreeMap<UserId, Money> {
        &self.balances
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// Sum of all balances. Each accepted upvote adds its payment and each
    /// accepted view adds exactly 1.
    pub fn total(&self) -> Money {
        self.balances
            .values()
            .fold(whole(0), |acc, amount| acc + amount)
    }

    /// Serializable summary with amounts rendered as exact fractions.
    pub fn report(&self, upvoters: BTreeMap<ResourceId, Vec<UserId>>) -> Report {
        Report {
            accepted: self.accepted,
            rejected: self.rejections.len(),
            balances: self
                .balances
                .iter()
                .map(|(user, amount)| (user.clone(), amount.to_string()))
                .collect(),
            upvoters,
            rejections: self.rejections.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub accepted: usize,
    pub rejected: usize,
    pub balances: BTreeMap<UserId, String>,
    pub upvoters: BTreeMap<ResourceId, Vec<UserId>>,
    pub rejections: Vec<Rejection>,
}
