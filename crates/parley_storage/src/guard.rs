//! Attribute guards.

use parley_foundation::EntityId;
use parley_lock::Policy;

/// Ownership and locks on one attribute of one entity.
///
/// Anyone can see that a guarded attribute exists; the read lock only
/// gates its value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Guard {
    /// Owner of the attribute. `None` for server-owned attributes.
    pub owner: Option<EntityId>,
    /// Lock that must pass to read the value.
    pub read: Policy,
    /// Lock that must pass to replace or remove the value.
    pub write: Policy,
    /// Side effect run after every successful write.
    pub hook: Option<WriteHook>,
}

impl Guard {
    /// A guard with the default locks: anyone reads, only the owner writes.
    ///
    /// Server-owned attributes can only be written by the system authority.
    #[must_use]
    pub fn owned_by(owner: Option<EntityId>) -> Self {
        Self {
            owner,
            read: Policy::Pass,
            write: owner.map_or(Policy::Fail, Policy::is),
            hook: None,
        }
    }

    /// Replaces the read lock.
    #[must_use]
    pub fn with_read(mut self, read: Policy) -> Self {
        self.read = read;
        self
    }

    /// Replaces the write lock.
    #[must_use]
    pub fn with_write(mut self, write: Policy) -> Self {
        self.write = write;
        self
    }

    /// Attaches a write hook.
    #[must_use]
    pub fn with_hook(mut self, hook: WriteHook) -> Self {
        self.hook = Some(hook);
        self
    }
}

/// Side effects attached to attribute writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WriteHook {
    /// Records the holder in `worn_by` when the flag becomes true and
    /// clears it when the flag becomes false.
    TrackWearer,
}
