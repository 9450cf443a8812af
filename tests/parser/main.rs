//! Integration tests for Layer 3: Parser
//!
//! Tests for object references, argument grammars, and command resolution.

mod grammars;
mod references;
mod resolution;

use parley_foundation::EntityId;
use parley_lock::{Authority, with_authority};
use parley_storage::{EntityKind, World};

/// A parlor with a cat on the rug and another in the player's arms.
pub struct Parlor {
    pub world: World,
    pub parlor: EntityId,
    pub player: EntityId,
    pub room_cat: EntityId,
    pub held_cat: EntityId,
    pub lamp: EntityId,
    pub west: EntityId,
}

pub fn parlor() -> Parlor {
    let mut world = World::new();
    with_authority(Authority::System, || {
        let parlor = world.spawn(EntityKind::Room, "Parlor", None).unwrap();
        let study = world.spawn(EntityKind::Room, "Study", None).unwrap();
        let player = world.spawn(EntityKind::Player, "Ada", Some(parlor)).unwrap();
        let room_cat = world.spawn(EntityKind::Thing, "cat", Some(parlor)).unwrap();
        let held_cat = world.spawn(EntityKind::Thing, "cat", Some(player)).unwrap();
        let lamp = world.spawn(EntityKind::Thing, "brass lamp", Some(parlor)).unwrap();
        let west = world
            .spawn(EntityKind::Exit { destination: study }, "west", Some(parlor))
            .unwrap();
        Parlor {
            world,
            parlor,
            player,
            room_cat,
            held_cat,
            lamp,
            west,
        }
    })
}
