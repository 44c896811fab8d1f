//! Per-resource upvoter lists.
//!
//! Each list is a persistent vector in arrival order plus a persistent set
//! for membership. Cloning is O(1) and an upvote shares everything but the
//! touched path with the list it came from, so states derived from one
//! another never copy whole lists.

use std::fmt;

use imbl::{OrdSet, Vector};

/// Users who upvoted one resource, in arrival order, without repeats.
pub struct Upvoters<U: Ord + Clone> {
    order: Vector<U>,
    members: OrdSet<U>,
}

impl<U: Ord + Clone> Upvoters<U> {
    pub fn new() -> Self {
        Self {
            order: Vector::new(),
            members: OrdSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, user: &U) -> bool {
        self.members.contains(user)
    }

    /// Upvoters in arrival order; the first yielded has rank 1.
    pub fn iter(&self) -> impl Iterator<Item = &U> {
        self.order.iter()
    }

    pub fn to_vec(&self) -> Vec<U> {
        self.order.iter().cloned().collect()
    }

    /// Append `user`. Returns `false` and leaves the list unchanged if
    /// `user` is already present.
    pub fn push(&mut self, user: U) -> bool {
        if self.members.insert(user.clone()).is_some() {
            return false;
        }
        self.order.push_back(user);
        true
    }

    /// A new list with `user` appended; `self` is untouched.
    pub(crate) fn with(&self, user: U) -> Self {
        let mut next = self.clone();
        next.push(user);
        next
    }
}

impl<U: Ord + Clone> Default for Upvoters<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Ord + Clone> Clone for Upvoters<U> {
    fn clone(&self) -> Self {
        Self {
            order: self.order.clone(),
            members: self.members.clone(),
        }
    }
}

impl<U: Ord + Clone> PartialEq for Upvoters<U> {
    /// Order-sensitive; membership follows from the order.
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl<U: Ord + Clone + fmt::Debug> fmt::Debug for Upvoters<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.order.iter()).finish()
    }
}
