//! The authoritative world store.
//!
//! The `World` owns every entity. It uses persistent maps, so cloning a
//! world is O(1) with structural sharing; the runtime relies on this to
//! snapshot before a command and roll back if the command fails.
//!
//! All attribute access goes through one gateway
//! ([`World::read_attribute`] / [`World::write_attribute`]) which consults
//! the attribute's [`Guard`] against the current authority.

use im::OrdMap;
use parley_foundation::{Access, EntityId, Error, ErrorKind, Result, Value};
use parley_lock::{Authority, Locatable, Policy, current_authority, with_authority};
use tracing::debug;

use crate::entity::{Entity, EntityKind};
use crate::guard::{Guard, WriteHook};
use crate::script::EventHandler;
use crate::{EQUIPPED, NAME, WORN_BY};

/// The authoritative set of world objects.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    entities: OrdMap<EntityId, Entity>,
    next_id: EntityId,
    start: Option<EntityId>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl Locatable for World {
    fn location_of(&self, id: EntityId) -> Option<EntityId> {
        self.location(id)
    }
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: OrdMap::new(),
            next_id: EntityId::new(0),
            start: None,
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the world has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns true if the entity exists.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Looks up an entity by identifier.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if no such entity exists.
    pub fn get(&self, id: EntityId) -> Result<&Entity> {
        self.entities.get(&id).ok_or_else(|| Error::entity_not_found(id))
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entities
            .get_mut(&id)
            .ok_or_else(|| Error::entity_not_found(id))
    }

    /// Where an entity is, if it exists and is anywhere.
    #[must_use]
    pub fn location(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(&id).and_then(|e| e.location)
    }

    /// Display name of an entity, or `"something"` if it is gone.
    #[must_use]
    pub fn name(&self, id: EntityId) -> &str {
        self.entities.get(&id).map_or("something", Entity::name)
    }

    /// All entities, in identifier order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Identifiers of all entities matching a predicate, in identifier order.
    pub fn find_all(&self, predicate: impl Fn(&Entity) -> bool) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| predicate(e))
            .map(|e| e.id)
            .collect()
    }

    /// Everything located directly in `location`.
    #[must_use]
    pub fn contents(&self, location: EntityId) -> Vec<EntityId> {
        self.find_all(|e| e.location == Some(location))
    }

    /// Exits located in `location`.
    #[must_use]
    pub fn exits_at(&self, location: EntityId) -> Vec<EntityId> {
        self.find_all(|e| e.location == Some(location) && e.is_exit())
    }

    /// Players located in `location`.
    #[must_use]
    pub fn players_at(&self, location: EntityId) -> Vec<EntityId> {
        self.find_all(|e| e.location == Some(location) && e.is_player())
    }

    /// The room an entity is ultimately inside, following locations upward.
    ///
    /// A room is its own room.
    #[must_use]
    pub fn room_of(&self, id: EntityId) -> Option<EntityId> {
        let mut current = id;
        for _ in 0..=self.entities.len() {
            let entity = self.entities.get(&current)?;
            if entity.kind == EntityKind::Room {
                return Some(current);
            }
            current = entity.location?;
        }
        None
    }

    /// Where new and relocated-to-start players go.
    #[must_use]
    pub const fn start(&self) -> Option<EntityId> {
        self.start
    }

    /// Sets the starting room.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the room does not exist.
    pub fn set_start(&mut self, room: EntityId) -> Result<()> {
        self.get(room)?;
        self.start = Some(room);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Creates an entity and returns its identifier.
    ///
    /// The acting entity becomes the owner; objects created under the
    /// system authority (or with none) are server-owned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` for an unusable name and `EntityNotFound` if
    /// the location does not exist.
    pub fn spawn(
        &mut self,
        kind: EntityKind,
        name: &str,
        location: Option<EntityId>,
    ) -> Result<EntityId> {
        validate_name(name)?;
        if let Some(location) = location {
            self.get(location)?;
        }
        if let EntityKind::Exit { destination } = kind {
            self.get(destination)?;
        }

        let owner = current_authority().and_then(Authority::entity);
        let id = self.next_id;
        self.next_id = id.next();
        self.entities
            .insert(id, Entity::new(id, kind, name, location, owner));
        debug!(%id, name, kind = kind.as_str(), "spawned entity");
        Ok(id)
    }

    /// Removes an entity. Its contents fall into its location.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` unless the current authority owns the entity,
    /// and `EntityNotFound` if it does not exist.
    pub fn destroy(&mut self, id: EntityId) -> Result<()> {
        self.check_owner(id, NAME)?;
        let location = self.get(id)?.location;

        for item in self.contents(id) {
            with_authority(Authority::System, || self.relocate(item, location))?;
        }
        self.entities.remove(&id);
        if self.start == Some(id) {
            self.start = None;
        }
        debug!(%id, "destroyed entity");
        Ok(())
    }

    /// Moves an entity into `destination` (or nowhere).
    ///
    /// Worn equipment is taken off first. That write runs under the system
    /// authority: the `equipped` lock requires holding the item, which the
    /// mover may not.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` for missing entities and `Refused` when the
    /// move would put something inside itself.
    pub fn relocate(&mut self, id: EntityId, destination: Option<EntityId>) -> Result<()> {
        let current = self.get(id)?.location;
        if let Some(destination) = destination {
            self.get(destination)?;
            if self.encloses(id, destination) {
                return Err(Error::refused("You can't put something inside itself."));
            }
        }
        if current == destination {
            return Ok(());
        }

        if self.is_equipped(id) {
            with_authority(Authority::System, || {
                self.write_attribute(id, EQUIPPED, false)
            })?;
        }

        self.get_mut(id)?.location = destination;
        debug!(%id, ?destination, "relocated entity");
        Ok(())
    }

    /// Whether `outer` is `inner` or (transitively) contains it.
    fn encloses(&self, outer: EntityId, inner: EntityId) -> bool {
        let mut current = Some(inner);
        for _ in 0..=self.entities.len() {
            match current {
                Some(id) if id == outer => return true,
                Some(id) => current = self.location(id),
                None => return false,
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // Guarded attributes
    // ------------------------------------------------------------------

    /// Reads an attribute through its read lock.
    ///
    /// Unprotected attributes are readable by anyone.
    ///
    /// # Errors
    ///
    /// Returns `AttributeNotFound`, `AccessDenied`, or `MissingAuthority`.
    pub fn read_attribute(&self, id: EntityId, name: &str) -> Result<Value> {
        let entity = self.get(id)?;
        let value = entity
            .attributes
            .get(name)
            .ok_or_else(|| Error::attribute_not_found(id, name))?;
        if !self.can_read(id, name)? {
            debug!(%id, attribute = name, "read denied");
            return Err(Error::access_denied(id, name, Access::Read));
        }
        Ok(value.clone())
    }

    /// Whether the current authority passes an attribute's read lock.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` or `MissingAuthority`.
    pub fn can_read(&self, id: EntityId, name: &str) -> Result<bool> {
        match self.get(id)?.guards.get(name) {
            Some(guard) => guard.read.passes(self),
            None => Policy::Pass.passes(self),
        }
    }

    /// Whether the current authority passes an attribute's write lock.
    ///
    /// For an unprotected attribute this is true whenever some authority is
    /// in effect, since writing it would create a guard.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` or `MissingAuthority`.
    pub fn can_write(&self, id: EntityId, name: &str) -> Result<bool> {
        match self.get(id)?.guards.get(name) {
            Some(guard) => guard.write.passes(self),
            None if current_authority().is_some() => Ok(true),
            None => Err(Error::missing_authority()),
        }
    }

    /// Writes an attribute through its write lock, then runs its hook.
    ///
    /// Writing an unprotected attribute protects it with default locks,
    /// owned by the acting entity (or by the entity's owner under the
    /// system authority).
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied`, `MissingAuthority`, `InvalidName` when
    /// renaming badly, or `EntityNotFound`.
    pub fn write_attribute(
        &mut self,
        id: EntityId,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let value = value.into();
        let entity = self.get(id)?;
        let (new_guard, hook) = match entity.guards.get(name) {
            Some(guard) => {
                if !guard.write.passes(self)? {
                    debug!(%id, attribute = name, "write denied");
                    return Err(Error::access_denied(id, name, Access::Write));
                }
                (None, guard.hook)
            }
            None => {
                let owner = match current_authority() {
                    Some(Authority::Entity(actor)) => Some(actor),
                    Some(Authority::System) => entity.owner,
                    None => return Err(Error::missing_authority()),
                };
                (Some(Guard::owned_by(owner)), None)
            }
        };

        if name == NAME {
            let Some(text) = value.as_str() else {
                return Err(Error::new(ErrorKind::InvalidName(
                    "Names must be text.".to_string(),
                )));
            };
            validate_name(text)?;
        }

        let entity = self.get_mut(id)?;
        entity.attributes.insert(name.to_string(), value.clone());
        if let Some(guard) = new_guard {
            entity.guards.insert(name.to_string(), guard);
        }

        if let Some(hook) = hook {
            self.run_hook(id, hook, &value)?;
        }
        Ok(())
    }

    /// Removes an attribute and its guard, returning the old value.
    ///
    /// # Errors
    ///
    /// Returns `AttributeNotFound`, `AccessDenied`, or `MissingAuthority`.
    /// The name attribute can never be removed.
    pub fn remove_attribute(&mut self, id: EntityId, name: &str) -> Result<Value> {
        if !self.get(id)?.attributes.contains_key(name) {
            return Err(Error::attribute_not_found(id, name));
        }
        if name == NAME || !self.can_write(id, name)? {
            return Err(Error::access_denied(id, name, Access::Write));
        }
        let entity = self.get_mut(id)?;
        entity.guards.remove(name);
        entity
            .attributes
            .remove(name)
            .ok_or_else(|| Error::attribute_not_found(id, name))
    }

    /// Protects an attribute with an explicit guard, creating the
    /// attribute as nil if it does not exist.
    ///
    /// An existing guard's write lock must pass before it can be replaced;
    /// an unprotected attribute may be protected by the entity's owner.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` or `MissingAuthority`.
    pub fn protect(&mut self, id: EntityId, name: &str, guard: Guard) -> Result<()> {
        let permitted = match self.get(id)?.guards.get(name) {
            Some(existing) => existing.write.passes(self)?,
            None => self.owner_policy(id)?.passes(self)?,
        };
        if !permitted {
            return Err(Error::access_denied(id, name, Access::Write));
        }
        let entity = self.get_mut(id)?;
        if !entity.attributes.contains_key(name) {
            entity.attributes.insert(name.to_string(), Value::Nil);
        }
        entity.guards.insert(name.to_string(), guard);
        Ok(())
    }

    /// Renames an entity through the guarded name attribute.
    ///
    /// # Errors
    ///
    /// See [`World::write_attribute`].
    pub fn rename(&mut self, id: EntityId, name: &str) -> Result<()> {
        self.write_attribute(id, NAME, name)
    }

    /// Current value of an attribute without consulting its lock.
    pub(crate) fn raw_attribute(&self, id: EntityId, name: &str) -> Option<&Value> {
        self.entities.get(&id).and_then(|e| e.attributes.get(name))
    }

    fn run_hook(&mut self, id: EntityId, hook: WriteHook, value: &Value) -> Result<()> {
        match hook {
            WriteHook::TrackWearer => {
                let holder = self.get(id)?.location;
                let entity = self.get_mut(id)?;
                let wearer = match holder {
                    Some(holder) if value.is_truthy() => Value::EntityRef(holder),
                    _ => Value::Nil,
                };
                entity.attributes.insert(WORN_BY.to_string(), wearer);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Event handlers
    // ------------------------------------------------------------------

    /// Registers a scripted handler for an action on an entity.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` unless the current authority owns the entity.
    pub fn set_handler(
        &mut self,
        id: EntityId,
        action: &str,
        handler: EventHandler,
    ) -> Result<()> {
        self.check_owner(id, "handlers")?;
        self.get_mut(id)?
            .handlers
            .insert(action.to_string(), handler);
        Ok(())
    }

    /// Removes the handler for an action, returning it.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` unless the current authority owns the entity.
    pub fn remove_handler(&mut self, id: EntityId, action: &str) -> Result<Option<EventHandler>> {
        self.check_owner(id, "handlers")?;
        Ok(self.get_mut(id)?.handlers.remove(action))
    }

    fn owner_policy(&self, id: EntityId) -> Result<Policy> {
        Ok(self.get(id)?.owner.map_or(Policy::Fail, Policy::is))
    }

    pub(crate) fn check_owner(&self, id: EntityId, what: &str) -> Result<()> {
        if self.owner_policy(id)?.passes(self)? {
            Ok(())
        } else {
            Err(Error::access_denied(id, what, Access::Write))
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = |message: &str| -> Result<()> {
        Err(Error::new(ErrorKind::InvalidName(message.to_string())))
    };
    if name.trim().is_empty() {
        return invalid("Names can't be empty.");
    }
    if name.starts_with('#') {
        return invalid("Names can't begin with a #.");
    }
    Ok(())
}
