//! Lock policies.
//!
//! A [`Policy`] is an immutable predicate over a candidate actor. Policies
//! compose with [`Policy::And`], [`Policy::Or`] and [`Policy::Not`]; the
//! leaves compare identities ([`Policy::Is`]) or possession
//! ([`Policy::Has`]).

use std::collections::HashMap;
use std::fmt;

use parley_foundation::{EntityId, Error, Result};
use tracing::warn;

use crate::authority::{Authority, current_authority, with_authority};

/// Read access to object locations, as needed by [`Policy::Has`].
///
/// The world store implements this so that locks can be evaluated without
/// depending on it.
pub trait Locatable {
    /// Where the given entity currently is, if anywhere.
    fn location_of(&self, id: EntityId) -> Option<EntityId>;
}

impl Locatable for HashMap<EntityId, EntityId> {
    fn location_of(&self, id: EntityId) -> Option<EntityId> {
        self.get(&id).copied()
    }
}

/// A rule deciding whether an actor may do something.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Policy {
    /// Passes only for the given entity.
    Is(EntityId),
    /// Passes iff the candidate is holding the given object.
    Has(EntityId),
    /// Passes iff every inner policy passes. Empty passes.
    And(Vec<Policy>),
    /// Passes iff any inner policy passes. Empty fails.
    Or(Vec<Policy>),
    /// Passes iff the inner policy fails.
    Not(Box<Policy>),
    /// Always passes; the only policy that may be evaluated with no
    /// authority in effect.
    Pass,
    /// Always fails.
    Fail,
}

impl Policy {
    /// Creates an [`Policy::Is`] lock.
    #[must_use]
    pub const fn is(trustee: EntityId) -> Self {
        Self::Is(trustee)
    }

    /// Creates a [`Policy::Has`] lock.
    #[must_use]
    pub const fn has(key: EntityId) -> Self {
        Self::Has(key)
    }

    /// Creates a [`Policy::And`] lock.
    #[must_use]
    pub fn and(policies: impl IntoIterator<Item = Policy>) -> Self {
        Self::And(policies.into_iter().collect())
    }

    /// Creates a [`Policy::Or`] lock.
    #[must_use]
    pub fn or(policies: impl IntoIterator<Item = Policy>) -> Self {
        Self::Or(policies.into_iter().collect())
    }

    /// Creates a [`Policy::Not`] lock.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(policy: Policy) -> Self {
        Self::Not(Box::new(policy))
    }

    /// Decides whether `candidate` passes this lock.
    ///
    /// `candidate` defaults to the current authority. With no authority in
    /// effect only [`Policy::Pass`] can be evaluated; anything else is a
    /// `MissingAuthority` error rather than a silent answer. Under the
    /// system authority every lock passes. Otherwise the lock's own check
    /// runs under the system authority, so a lock's internals are never
    /// themselves locked.
    ///
    /// # Errors
    ///
    /// Returns `MissingAuthority` if no authority is in effect and the
    /// policy is not [`Policy::Pass`].
    pub fn evaluate<L: Locatable + ?Sized>(
        &self,
        candidate: Option<Authority>,
        world: &L,
    ) -> Result<bool> {
        let Some(current) = current_authority() else {
            if matches!(self, Self::Pass) {
                return Ok(true);
            }
            warn!(policy = %self, "lock evaluated with no authority in effect");
            return Err(Error::missing_authority());
        };

        if current.is_system() {
            return Ok(true);
        }

        let Authority::Entity(player) = candidate.unwrap_or(current) else {
            return Ok(true);
        };

        Ok(with_authority(Authority::System, || self.check(player, world)))
    }

    /// Shorthand for evaluating against the current authority.
    ///
    /// # Errors
    ///
    /// See [`Policy::evaluate`].
    pub fn passes<L: Locatable + ?Sized>(&self, world: &L) -> Result<bool> {
        self.evaluate(None, world)
    }

    fn check<L: Locatable + ?Sized>(&self, player: EntityId, world: &L) -> bool {
        match self {
            Self::Is(trustee) => *trustee == player,
            Self::Has(key) => world.location_of(*key) == Some(player),
            Self::And(policies) => policies.iter().all(|p| p.check(player, world)),
            Self::Or(policies) => policies.iter().any(|p| p.check(player, world)),
            Self::Not(policy) => !policy.check(player, world),
            Self::Pass => true,
            Self::Fail => false,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, name: &str, policies: &[Policy]) -> fmt::Result {
            write!(f, "{name}(")?;
            for (i, p) in policies.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{p}")?;
            }
            write!(f, ")")
        }

        match self {
            Self::Is(id) => write!(f, "Is({id})"),
            Self::Has(id) => write!(f, "Has({id})"),
            Self::And(policies) => list(f, "And", policies),
            Self::Or(policies) => list(f, "Or", policies),
            Self::Not(policy) => write!(f, "Not({policy})"),
            Self::Pass => write!(f, "Pass"),
            Self::Fail => write!(f, "Fail"),
        }
    }
}
