//! Scripted event definitions.
//!
//! Handlers are plain data stored on the entity that intercepts an action.
//! The engine's cascade interprets them.

use parley_foundation::{EntityId, Value};

/// What a handler does to the world when it fires.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// Only the notices.
    None,
    /// Destroys the intercepting entity. Always disruptive.
    SelfDestruct,
    /// Creates a thing at the triggering player's location, owned by them.
    CreateObject {
        /// Name of the new object.
        name: String,
    },
    /// Moves the triggering player.
    Relocate {
        /// Target room; `None` means the world's starting room.
        destination: Option<EntityId>,
    },
    /// Sets an attribute on the intercepting entity.
    SetAttribute {
        /// Attribute name.
        name: String,
        /// New value.
        value: Value,
    },
    /// Removes an attribute from the intercepting entity.
    RemoveAttribute {
        /// Attribute name.
        name: String,
    },
}

/// A scripted reaction to an action.
///
/// `emit` is shown to everyone else in the room, `send` to the player who
/// triggered the action. Both accept the placeholders `{obj}` (the
/// intercepting entity), `{player}` and `{created_obj}`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventHandler {
    /// World effect.
    pub effect: Effect,
    /// Notice for bystanders.
    pub emit: Option<String>,
    /// Notice for the triggering player.
    pub send: Option<String>,
    /// Whether firing cancels the triggering action.
    pub disruptive: bool,
    /// An entity that never triggers this handler.
    pub exempt: Option<EntityId>,
}

impl EventHandler {
    /// Creates a handler with the given effect and no notices.
    #[must_use]
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            emit: None,
            send: None,
            disruptive: false,
            exempt: None,
        }
    }

    /// Creates a handler that only shows notices.
    #[must_use]
    pub fn notice() -> Self {
        Self::new(Effect::None)
    }

    /// Sets the bystander notice.
    #[must_use]
    pub fn emitting(mut self, text: impl Into<String>) -> Self {
        self.emit = Some(text.into());
        self
    }

    /// Sets the triggering player's notice.
    #[must_use]
    pub fn sending(mut self, text: impl Into<String>) -> Self {
        self.send = Some(text.into());
        self
    }

    /// Makes the handler cancel whatever triggered it.
    #[must_use]
    pub fn disruptive(mut self) -> Self {
        self.disruptive = true;
        self
    }

    /// Exempts an entity from triggering the handler.
    #[must_use]
    pub fn exempting(mut self, entity: EntityId) -> Self {
        self.exempt = Some(entity);
        self
    }

    /// Whether firing this handler cancels the action.
    #[must_use]
    pub fn is_disruptive(&self) -> bool {
        self.disruptive || self.effect == Effect::SelfDestruct
    }

    /// Whether `player` triggers this handler.
    #[must_use]
    pub fn applies_to(&self, player: EntityId) -> bool {
        self.exempt != Some(player)
    }
}
