//! The acting authority.
//!
//! One slot per thread holds the authority in effect. Commands for a single
//! player run to completion on one thread, so nested scopes never
//! interleave; other threads have their own slot and never observe it.

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

use parley_foundation::EntityId;

thread_local! {
    static CURRENT: Cell<Option<Authority>> = const { Cell::new(None) };
}

/// Who the running code acts for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Authority {
    /// The server itself. Passes every lock.
    System,
    /// An ordinary world entity, usually a player.
    Entity(EntityId),
}

impl Authority {
    /// Returns the entity, unless this is the system authority.
    #[must_use]
    pub const fn entity(self) -> Option<EntityId> {
        match self {
            Self::System => None,
            Self::Entity(id) => Some(id),
        }
    }

    /// Returns true for the system authority.
    #[must_use]
    pub const fn is_system(self) -> bool {
        matches!(self, Self::System)
    }
}

impl From<EntityId> for Authority {
    fn from(id: EntityId) -> Self {
        Self::Entity(id)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "SYSTEM"),
            Self::Entity(id) => write!(f, "{id}"),
        }
    }
}

/// Returns the authority currently in effect on this thread.
#[must_use]
pub fn current_authority() -> Option<Authority> {
    CURRENT.with(Cell::get)
}

/// Scoped entry into an authority.
///
/// The previous authority is restored when the guard drops, including
/// during unwinding. Guards must drop in reverse order of creation, which
/// holding them in locals guarantees; they are deliberately `!Send`.
#[must_use = "the authority is restored as soon as the guard is dropped"]
pub struct AuthorityGuard {
    previous: Option<Authority>,
    _not_send: PhantomData<*const ()>,
}

impl AuthorityGuard {
    /// Makes `actor` the current authority until the guard drops.
    pub fn enter(actor: Authority) -> Self {
        Self::replace(Some(actor))
    }

    /// Clears the current authority until the guard drops.
    pub fn clear() -> Self {
        Self::replace(None)
    }

    fn replace(next: Option<Authority>) -> Self {
        let previous = CURRENT.with(|slot| slot.replace(next));
        Self {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Drop for AuthorityGuard {
    fn drop(&mut self) {
        CURRENT.with(|slot| slot.set(self.previous));
    }
}

/// Runs `body` with `actor` as the current authority.
///
/// ```
/// use parley_foundation::EntityId;
/// use parley_lock::{Authority, current_authority, with_authority};
///
/// let alice = Authority::Entity(EntityId::new(1));
/// with_authority(alice, || {
///     assert_eq!(current_authority(), Some(alice));
///     with_authority(Authority::System, || {
///         assert_eq!(current_authority(), Some(Authority::System));
///     });
///     assert_eq!(current_authority(), Some(alice));
/// });
/// assert_eq!(current_authority(), None);
/// ```
pub fn with_authority<T>(actor: impl Into<Authority>, body: impl FnOnce() -> T) -> T {
    let _guard = AuthorityGuard::enter(actor.into());
    body()
}

/// Runs `body` with no authority in effect.
pub fn without_authority<T>(body: impl FnOnce() -> T) -> T {
    let _guard = AuthorityGuard::clear();
    body()
}
