//! World objects.

use im::OrdMap;
use parley_foundation::{EntityId, Value};

use crate::NAME;
use crate::guard::Guard;
use crate::script::EventHandler;

/// What sort of object an entity is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// A place. Rooms usually have no location.
    Room,
    /// A connected (or once-connected) player.
    Player,
    /// Any ordinary object.
    Thing,
    /// A passage, located in its source room.
    Exit {
        /// Where the exit leads.
        destination: EntityId,
    },
}

impl EntityKind {
    /// Short lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Player => "player",
            Self::Thing => "thing",
            Self::Exit { .. } => "exit",
        }
    }
}

/// A world object.
///
/// Entities are owned by the [`World`](crate::World); everything else
/// refers to them by [`EntityId`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    /// Stable identifier.
    pub id: EntityId,
    /// Kind of object.
    pub kind: EntityKind,
    /// Containing entity (room, player, or container).
    pub location: Option<EntityId>,
    /// Entity that created this one. `None` for server-created objects.
    pub owner: Option<EntityId>,
    pub(crate) attributes: OrdMap<String, Value>,
    pub(crate) guards: OrdMap<String, Guard>,
    pub(crate) handlers: OrdMap<String, EventHandler>,
}

impl Entity {
    pub(crate) fn new(
        id: EntityId,
        kind: EntityKind,
        name: &str,
        location: Option<EntityId>,
        owner: Option<EntityId>,
    ) -> Self {
        let mut attributes = OrdMap::new();
        attributes.insert(NAME.to_string(), Value::from(name));
        let mut guards = OrdMap::new();
        guards.insert(NAME.to_string(), Guard::owned_by(owner));
        Self {
            id,
            kind,
            location,
            owner,
            attributes,
            guards,
            handlers: OrdMap::new(),
        }
    }

    /// The display name. Names are public and never locked for reading.
    #[must_use]
    pub fn name(&self) -> &str {
        self.attributes
            .get(NAME)
            .and_then(Value::as_str)
            .unwrap_or("something")
    }

    /// Returns true if the attribute exists, whether or not it is readable.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Names of all attributes.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// The guard on an attribute, if it is protected.
    #[must_use]
    pub fn guard(&self, attribute: &str) -> Option<&Guard> {
        self.guards.get(attribute)
    }

    /// The event handler registered for an action, if any.
    #[must_use]
    pub fn handler(&self, action: &str) -> Option<&EventHandler> {
        self.handlers.get(action)
    }

    /// Actions this entity intercepts.
    pub fn handled_actions(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Returns true for exits.
    #[must_use]
    pub const fn is_exit(&self) -> bool {
        matches!(self.kind, EntityKind::Exit { .. })
    }

    /// Returns true for players.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player)
    }

    /// Where this exit leads, if it is one.
    #[must_use]
    pub const fn destination(&self) -> Option<EntityId> {
        match self.kind {
            EntityKind::Exit { destination } => Some(destination),
            _ => None,
        }
    }
}
