//! The standard world commands.
//!
//! - [`items`] - take, drop, give, equip and unequip
//! - [`movement`] - travel through exits
//! - [`perception`] - look and inventory
//! - [`social`] - say, emote and semipose
//! - [`building`] - sudo, create, set, unset, open and destroy

pub mod building;
pub mod items;
pub mod movement;
pub mod perception;
pub mod social;

use parley_foundation::{EntityId, Error, Result};
use parley_parser::{Arguments, Grammar};
use parley_storage::World;

use crate::command::Command;

/// Every standard command.
#[must_use]
pub fn catalog() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(items::Take),
        Box::new(items::Drop),
        Box::new(items::Give),
        Box::new(items::Equip),
        Box::new(items::Unequip),
        Box::new(movement::Go),
        Box::new(perception::Look),
        Box::new(perception::Inventory),
        Box::new(social::Say),
        Box::new(social::Emote),
        Box::new(social::Semipose),
        Box::new(building::Sudo),
        Box::new(building::Create),
        Box::new(building::Set),
        Box::new(building::Unset),
        Box::new(building::Open),
        Box::new(building::Destroy),
    ]
}

/// A grammar for commands that take no arguments.
fn no_arguments(_: &World, _: EntityId) -> Grammar {
    Grammar::empty()
}

/// The object in `slot`; the grammar guarantees it is there.
fn object(args: &Arguments, slot: &str) -> Result<EntityId> {
    args.object(slot)
        .ok_or_else(|| Error::internal(format!("missing argument '{slot}'")))
}

/// The text in `slot`; the grammar guarantees it is there.
fn text<'a>(args: &'a Arguments, slot: &str) -> Result<&'a str> {
    args.text(slot)
        .ok_or_else(|| Error::internal(format!("missing argument '{slot}'")))
}

/// `"a, b, c"` from entity names.
fn list(world: &World, ids: &[EntityId]) -> String {
    ids.iter()
        .map(|&id| world.name(id))
        .collect::<Vec<_>>()
        .join(", ")
}
