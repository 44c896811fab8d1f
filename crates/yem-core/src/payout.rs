//! Payout mappings: who is owed what for one transaction.
//!
//! Insertion combines by addition. When the operator is also an upvoter of
//! the viewed resource, its rank weight and its operator share land in one
//! entry.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::amount::Amount;
use crate::error::AmountError;

/// Funds owed to each recipient for a single transaction.
///
/// Keys are unique; iteration is in key order so payouts print and compare
/// deterministically.
#[derive(Clone, Debug, PartialEq)]
pub struct Payout<U, A> {
    entries: BTreeMap<U, A>,
}

impl<U: Ord, A: Amount> Payout<U, A> {
    /// An empty payout.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// A payout with one recipient.
    pub fn single(recipient: U, amount: A) -> Self {
        let mut payout = Self::new();
        payout.credit(recipient, amount);
        payout
    }

    /// Add `amount` to `recipient`, creating the entry if needed.
    pub fn credit(&mut self, recipient: U, amount: A) {
        match self.entries.entry(recipient) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(amount);
            }
            btree_map::Entry::Occupied(mut slot) => {
                let combined = slot.get().clone() + amount;
                slot.insert(combined);
            }
        }
    }

    /// [`credit`](Self::credit) with overflow checking.
    ///
    /// On error the payout is left unchanged.
    pub fn try_credit(&mut self, recipient: U, amount: A) -> Result<(), AmountError> {
        match self.entries.entry(recipient) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(amount);
            }
            btree_map::Entry::Occupied(mut slot) => {
                let combined = slot.get().checked_add(&amount).ok_or(AmountError::Overflow)?;
                slot.insert(combined);
            }
        }
        Ok(())
    }

    /// Amount owed to `recipient`, if any.
    pub fn get(&self, recipient: &U) -> Option<&A> {
        self.entries.get(recipient)
    }

    pub fn contains(&self, recipient: &U) -> bool {
        self.entries.contains_key(recipient)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, U, A> {
        self.entries.iter()
    }

    /// Sum of all entries.
    pub fn total(&self) -> A {
        self.entries
            .values()
            .fold(A::zero(), |acc, amount| acc + amount.clone())
    }

}

impl<U: Ord, A: Amount> Default for Payout<U, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Ord, A: Amount> FromIterator<(U, A)> for Payout<U, A> {
    fn from_iter<I: IntoIterator<Item = (U, A)>>(iter: I) -> Self {
        let mut payout = Self::new();
        for (recipient, amount) in iter {
            payout.credit(recipient, amount);
        }
        payout
    }
}

impl<U, A> IntoIterator for Payout<U, A> {
    type Item = (U, A);
    type IntoIter = btree_map::IntoIter<U, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, U, A> IntoIterator for &'a Payout<U, A> {
    type Item = (&'a U, &'a A);
    type IntoIter = btree_map::Iter<'a, U, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
