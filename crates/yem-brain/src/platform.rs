//! Platform state and its two transitions, `upvote` and `view`.
//!
//! A [`PlatformState`] is a value. Transitions borrow it and return a new
//! one; registrations are fixed when the state is built and never change
//! through a transition. Users and configuration are shared by every state
//! derived from the same root. The resource map and the upvoter lists are
//! persistent collections, so an upvote shares all but the touched path with
//! the state it came from.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use imbl::OrdMap;
use tracing::debug;
use yem_core::amount::{Amount, Money};
use yem_core::error::{AmountError, ConfigError, HarmonicError, TransitionError};
use yem_core::payout::Payout;
use yem_core::traits::ReciprocalSource;
use yem_harmonic::HarmonicCache;

use crate::config::PlatformConfig;
use crate::event::Event;
use crate::upvoters::Upvoters;

/// The next state and the payout produced by an accepted transition.
pub struct Transition<U: Ord + Clone, R: Ord + Clone, A = Money> {
    pub state: PlatformState<U, R, A>,
    pub payout: Payout<U, A>,
}

/// Result of a transition.
///
/// `Ok` carries the new state and its payout. `Err` means the transition was
/// rejected; the caller keeps the state it called on.
pub type Outcome<U, R, A = Money> = Result<Transition<U, R, A>, TransitionError>;

/// Immutable platform state.
///
/// # Invariants
///
/// * `config` passed [`PlatformConfig::validate`]
/// * every upvoter list holds each user at most once, in arrival order
/// * the set of resources is fixed at construction
pub struct PlatformState<U: Ord + Clone, R: Ord + Clone, A = Money> {
    users: Arc<BTreeSet<U>>,
    upvotes: OrdMap<R, Upvoters<U>>,
    config: Arc<PlatformConfig<U, A>>,
    harmonics: Arc<dyn ReciprocalSource<A>>,
}

impl<U, R, A> PlatformState<U, R, A>
where
    U: Ord + Clone + fmt::Debug,
    R: Ord + Clone + fmt::Debug,
    A: Amount,
{
    /// Build a state with the given registrations and empty upvoter lists.
    ///
    /// Uses a fresh [`HarmonicCache`]; see [`PlatformBuilder::harmonics`] to
    /// share one.
    pub fn new(
        config: PlatformConfig<U, A>,
        users: impl IntoIterator<Item = U>,
        resources: impl IntoIterator<Item = R>,
    ) -> Result<Self, ConfigError> {
        PlatformBuilder::new(config)
            .users(users)
            .resources(resources)
            .build()
    }

    /// Start a [`PlatformBuilder`].
    pub fn builder(config: PlatformConfig<U, A>) -> PlatformBuilder<U, R, A> {
        PlatformBuilder::new(config)
    }

    // --- accessors ---

    pub fn config(&self) -> &PlatformConfig<U, A> {
        &self.config
    }

    /// Operator identity.
    pub fn server(&self) -> &U {
        &self.config.server
    }

    pub fn users(&self) -> &BTreeSet<U> {
        &self.users
    }

    pub fn is_user(&self, user: &U) -> bool {
        self.users.contains(user)
    }

    pub fn is_resource(&self, resource: &R) -> bool {
        self.upvotes.contains_key(resource)
    }

    /// Registered resources in key order.
    pub fn resources(&self) -> impl Iterator<Item = &R> {
        self.upvotes.keys()
    }

    /// Upvoters of `resource` in arrival order, or `None` if unregistered.
    pub fn upvoters(&self, resource: &R) -> Option<&Upvoters<U>> {
        self.upvotes.get(resource)
    }

    // --- transitions ---

    /// `user` pays `payment` to upvote `resource`.
    ///
    /// Preconditions, checked in this order:
    /// 1. `user` is registered ([`TransitionError::UnknownUser`])
    /// 2. `resource` is registered ([`TransitionError::UnknownResource`])
    /// 3. `payment >= upvote_price` ([`TransitionError::InsufficientPayment`])
    /// 4. `user` has not upvoted `resource` yet ([`TransitionError::AlreadyUpvoted`])
    ///
    /// On success `user` is appended to the upvoter list and the operator
    /// receives the whole payment.
    pub fn upvote(&self, user: &U, payment: A, resource: &R) -> Outcome<U, R, A> {
        let outcome = self.apply_upvote(user, payment, resource);
        match &outcome {
            Ok(t) => debug!(
                ?user,
                ?resource,
                rank = t.state.upvoters(resource).map_or(0, Upvoters::len),
                "upvote accepted"
            ),
            Err(err) => debug!(?user, ?resource, %err, "upvote rejected"),
        }
        outcome
    }

    /// `user` pays `payment` to view `resource`.
    ///
    /// Preconditions, checked in this order:
    /// 1. `user` is registered ([`TransitionError::UnknownUser`])
    /// 2. `resource` is registered ([`TransitionError::UnknownResource`])
    /// 3. `payment >= view_price` ([`TransitionError::InsufficientPayment`])
    ///
    /// Repeat views are allowed. The returned state has the same content.
    /// The payout splits a unit share: with `H` the sum of `1/1 … 1/k` over
    /// the `k` upvoters and `s` the server share, the upvoter at rank `i`
    /// receives `(1/i) / (H + s)` and the operator `s / (H + s)`. The payment
    /// amount does not scale the split.
    ///
    /// With a fixed-width amount type the split can overflow; that is
    /// reported as [`TransitionError::Harmonic`] or [`TransitionError::Amount`].
    pub fn view(&self, user: &U, payment: A, resource: &R) -> Outcome<U, R, A> {
        let outcome = self.apply_view(user, payment, resource);
        match &outcome {
            Ok(t) => debug!(?user, ?resource, recipients = t.payout.len(), "view accepted"),
            Err(err) => debug!(?user, ?resource, %err, "view rejected"),
        }
        outcome
    }

    /// Dispatch an [`Event`] to [`upvote`](Self::upvote) or [`view`](Self::view).
    pub fn apply(&self, event: &Event<U, R, A>) -> Outcome<U, R, A> {
        match event {
            Event::Upvote {
                user,
                payment,
                resource,
            } => self.upvote(user, payment.clone(), resource),
            Event::View {
                user,
                payment,
                resource,
            } => self.view(user, payment.clone(), resource),
        }
    }

    fn apply_upvote(&self, user: &U, payment: A, resource: &R) -> Outcome<U, R, A> {
        let upvoters = self.registered(user, resource)?;
        check_payment(&payment, &self.config.upvote_price)?;
        if upvoters.contains(user) {
            return Err(TransitionError::AlreadyUpvoted);
        }

        let mut upvotes = self.upvotes.clone();
        upvotes.insert(resource.clone(), upvoters.with(user.clone()));

        let state = Self {
            users: Arc::clone(&self.users),
            upvotes,
            config: Arc::clone(&self.config),
            harmonics: Arc::clone(&self.harmonics),
        };
        let payout = Payout::single(self.config.server.clone(), payment);
        Ok(Transition { state, payout })
    }

    fn apply_view(&self, user: &U, payment: A, resource: &R) -> Outcome<U, R, A> {
        let upvoters = self.registered(user, resource)?;
        check_payment(&payment, &self.config.view_price)?;

        let fractions = self.harmonics.reciprocals_to(upvoters.len())?;
        let share = &self.config.server_share;
        // Positive: share > 0 by construction and every harmonic term is positive.
        let total = fractions
            .total()
            .checked_add(share)
            .ok_or(AmountError::Overflow)?;

        let mut payout = Payout::new();
        for (i, upvoter) in upvoters.iter().enumerate() {
            let rank = i + 1;
            let weight = fractions
                .weight(rank)
                .ok_or(HarmonicError::CountOutOfRange(rank))?;
            let amount = weight.checked_div(&total).ok_or(AmountError::Overflow)?;
            payout.try_credit(upvoter.clone(), amount)?;
        }
        let amount = share.checked_div(&total).ok_or(AmountError::Overflow)?;
        payout.try_credit(self.config.server.clone(), amount)?;

        Ok(Transition {
            state: self.clone(),
            payout,
        })
    }

    /// Shared preconditions: registered user, then registered resource.
    fn registered(&self, user: &U, resource: &R) -> Result<&Upvoters<U>, TransitionError> {
        if !self.users.contains(user) {
            return Err(TransitionError::UnknownUser);
        }
        self.upvoters(resource).ok_or(TransitionError::UnknownResource)
    }
}

fn check_payment<A: Amount>(payment: &A, price: &A) -> Result<(), TransitionError> {
    if payment < price {
        return Err(TransitionError::InsufficientPayment {
            paid: payment.to_string(),
            price: price.to_string(),
        });
    }
    Ok(())
}

impl<U: Ord + Clone, R: Ord + Clone, A> Clone for PlatformState<U, R, A> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            upvotes: self.upvotes.clone(),
            config: Arc::clone(&self.config),
            harmonics: Arc::clone(&self.harmonics),
        }
    }
}

impl<U, R, A> PartialEq for PlatformState<U, R, A>
where
    U: Ord + Clone,
    R: Ord + Clone,
    A: PartialEq,
{
    /// Content equality; the reciprocal source is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.users == other.users && self.upvotes == other.upvotes && self.config == other.config
    }
}

impl<U, R, A> fmt::Debug for PlatformState<U, R, A>
where
    U: Ord + Clone + fmt::Debug,
    R: Ord + Clone + fmt::Debug,
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformState")
            .field("users", &self.users)
            .field("upvotes", &self.upvotes)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<U: Ord + Clone, R: Ord + Clone, A: Clone> Clone for Transition<U, R, A> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            payout: self.payout.clone(),
        }
    }
}

impl<U, R, A> fmt::Debug for Transition<U, R, A>
where
    U: Ord + Clone + fmt::Debug,
    R: Ord + Clone + fmt::Debug,
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("state", &self.state)
            .field("payout", &self.payout)
            .finish()
    }
}

/// Registers users and resources for a new [`PlatformState`].
///
/// Registration happens only here; the transitions never add users or
/// resources.
pub struct PlatformBuilder<U, R, A = Money> {
    config: PlatformConfig<U, A>,
    users: BTreeSet<U>,
    upvotes: BTreeMap<R, Vec<U>>,
    harmonics: Option<Arc<dyn ReciprocalSource<A>>>,
}

impl<U, R, A> PlatformBuilder<U, R, A>
where
    U: Ord + Clone + fmt::Debug,
    R: Ord + Clone + fmt::Debug,
    A: Amount,
{
    pub fn new(config: PlatformConfig<U, A>) -> Self {
        Self {
            config,
            users: BTreeSet::new(),
            upvotes: BTreeMap::new(),
            harmonics: None,
        }
    }

    pub fn user(mut self, user: U) -> Self {
        self.users.insert(user);
        self
    }

    pub fn users(mut self, users: impl IntoIterator<Item = U>) -> Self {
        self.users.extend(users);
        self
    }

    /// Register `resource` with no upvoters. Re-registering keeps its list.
    pub fn resource(mut self, resource: R) -> Self {
        self.upvotes.entry(resource).or_default();
        self
    }

    pub fn resources(mut self, resources: impl IntoIterator<Item = R>) -> Self {
        for resource in resources {
            self.upvotes.entry(resource).or_default();
        }
        self
    }

    /// Register `resource` with an existing upvoter list, e.g. when a host
    /// restores a persisted state. Order is taken as arrival order.
    pub fn resource_with_upvoters(
        mut self,
        resource: R,
        upvoters: impl IntoIterator<Item = U>,
    ) -> Self {
        self.upvotes.insert(resource, upvoters.into_iter().collect());
        self
    }

    /// Reciprocal source for `view`. Defaults to a fresh [`HarmonicCache`].
    pub fn harmonics(mut self, harmonics: Arc<dyn ReciprocalSource<A>>) -> Self {
        self.harmonics = Some(harmonics);
        self
    }

    /// Validate and assemble the state.
    ///
    /// # Errors
    ///
    /// - any [`PlatformConfig::validate`] error
    /// - [`ConfigError::DuplicateUpvoter`] if a restored upvoter list names
    ///   a user twice
    pub fn build(self) -> Result<PlatformState<U, R, A>, ConfigError> {
        self.config.validate()?;

        let mut upvotes = OrdMap::new();
        for (resource, restored) in self.upvotes {
            let mut upvoters = Upvoters::new();
            for user in restored {
                if !upvoters.push(user.clone()) {
                    return Err(ConfigError::DuplicateUpvoter {
                        user: format!("{user:?}"),
                        resource: format!("{resource:?}"),
                    });
                }
            }
            upvotes.insert(resource, upvoters);
        }

        let harmonics: Arc<dyn ReciprocalSource<A>> = match self.harmonics {
            Some(harmonics) => harmonics,
            None => Arc::new(HarmonicCache::<A>::new()),
        };

        Ok(PlatformState {
            users: Arc::new(self.users),
            upvotes,
            config: Arc::new(self.config),
            harmonics,
        })
    }
}
