//! World store, entities, and guarded attributes for Parley.
//!
//! This crate provides:
//! - [`Entity`] - A world object: room, player, thing or exit
//! - [`Guard`] - The owner and read/write locks on one attribute
//! - [`World`] - The authoritative store, with a single read/write gateway
//!   for guarded attributes and equipment-aware relocation
//! - [`EventHandler`] - Scripted event definitions stored on entities

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod equipment;
pub mod guard;
pub mod script;
pub mod world;

pub use entity::{Entity, EntityKind};
pub use guard::{Guard, WriteHook};
pub use script::{Effect, EventHandler};
pub use world::World;

/// Attribute holding every entity's display name.
pub const NAME: &str = "name";
/// Attribute holding an entity's description.
pub const DESCRIPTION: &str = "description";
/// Attribute marking equipment as worn.
pub const EQUIPPED: &str = "equipped";
/// Attribute recording who wears a piece of equipment.
pub const WORN_BY: &str = "worn_by";
