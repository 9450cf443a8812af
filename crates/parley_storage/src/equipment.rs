//! Wearable objects.
//!
//! Equipment carries an `equipped` flag whose write lock is `Has(item)`:
//! only whoever holds the item can put it on or take it off. A write hook
//! keeps `worn_by` in step with the flag, and [`World::relocate`] takes
//! equipment off before it moves.

use parley_foundation::{EntityId, Error, ErrorKind, Result, Value};
use parley_lock::Policy;

use crate::guard::{Guard, WriteHook};
use crate::world::World;
use crate::{EQUIPPED, WORN_BY};

impl World {
    /// Turns an object into equipment. Doing so twice changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` unless the current authority owns the object.
    pub fn make_equipment(&mut self, id: EntityId) -> Result<()> {
        self.check_owner(id, EQUIPPED)?;
        if self.is_equipment(id) {
            return Ok(());
        }
        let owner = self.get(id)?.owner;
        let entity = self.get_mut(id)?;
        entity
            .attributes
            .insert(EQUIPPED.to_string(), Value::Bool(false));
        entity.guards.insert(
            EQUIPPED.to_string(),
            Guard::owned_by(owner)
                .with_write(Policy::has(id))
                .with_hook(WriteHook::TrackWearer),
        );
        entity.attributes.insert(WORN_BY.to_string(), Value::Nil);
        entity
            .guards
            .insert(WORN_BY.to_string(), Guard::owned_by(None));
        Ok(())
    }

    /// Returns true if the object can be worn.
    #[must_use]
    pub fn is_equipment(&self, id: EntityId) -> bool {
        self.get(id)
            .ok()
            .and_then(|e| e.guard(EQUIPPED))
            .is_some_and(|g| g.hook == Some(WriteHook::TrackWearer))
    }

    /// Returns true if the object is currently worn.
    #[must_use]
    pub fn is_equipped(&self, id: EntityId) -> bool {
        self.raw_attribute(id, EQUIPPED)
            .is_some_and(Value::is_truthy)
    }

    /// Who is wearing the object, if anyone.
    #[must_use]
    pub fn wearer(&self, id: EntityId) -> Option<EntityId> {
        self.raw_attribute(id, WORN_BY).and_then(Value::as_entity)
    }

    /// Puts on a piece of equipment held by the current authority.
    ///
    /// # Errors
    ///
    /// Returns `Refused` if the object is not equipment or is already worn,
    /// and `AccessDenied` if the actor is not holding it.
    pub fn equip(&mut self, id: EntityId) -> Result<()> {
        if !self.is_equipment(id) {
            return Err(Error::refused("That is not equipment!"));
        }
        if self.is_equipped(id) {
            return Err(Error::refused("That is already equipped!"));
        }
        self.write_attribute(id, EQUIPPED, true)
    }

    /// Takes off a piece of equipment held by the current authority.
    ///
    /// A denied write is forgiven if the item already ended up unequipped.
    ///
    /// # Errors
    ///
    /// Returns `Refused` if the object is not equipment, is not worn, or is
    /// worn by someone other than the actor.
    pub fn unequip(&mut self, id: EntityId) -> Result<()> {
        if !self.is_equipment(id) {
            return Err(Error::refused("That is not equipment!"));
        }
        if !self.is_equipped(id) {
            return Err(Error::refused("That isn't equipped!"));
        }
        match self.write_attribute(id, EQUIPPED, false) {
            Err(e) if matches!(e.kind, ErrorKind::AccessDenied { .. }) => {
                if self.is_equipped(id) {
                    Err(Error::refused("You can't, it's equipped."))
                } else {
                    Ok(())
                }
            }
            other => other,
        }
    }
}
