//! Integration tests for Layer 4: Engine
//!
//! Tests for the standard commands and the event cascade, driven through
//! command dispatch against a small world.

mod cascades;
mod commands;

use parley_engine::{CommandSet, Outbox};
use parley_foundation::{EntityId, Result};
use parley_lock::{Authority, with_authority};
use parley_storage::{EntityKind, World};

/// Two connected rooms, two players, and a few things lying around.
pub struct Town {
    pub world: World,
    pub commands: CommandSet,
    pub outbox: Outbox,
    pub square: EntityId,
    pub market: EntityId,
    pub east: EntityId,
    pub ada: EntityId,
    pub bob: EntityId,
    pub apple: EntityId,
}

impl Town {
    pub fn new() -> Self {
        let mut world = World::new();
        let (square, market, east, ada, bob, apple) = with_authority(Authority::System, || {
            let square = world.spawn(EntityKind::Room, "Square", None).unwrap();
            let market = world.spawn(EntityKind::Room, "Market", None).unwrap();
            world.set_start(square).unwrap();
            let east = world
                .spawn(EntityKind::Exit { destination: market }, "east", Some(square))
                .unwrap();
            world
                .spawn(EntityKind::Exit { destination: square }, "west", Some(market))
                .unwrap();
            let ada = world.spawn(EntityKind::Player, "Ada", Some(square)).unwrap();
            let bob = world.spawn(EntityKind::Player, "Bob", Some(square)).unwrap();
            let apple = world.spawn(EntityKind::Thing, "apple", Some(square)).unwrap();
            (square, market, east, ada, bob, apple)
        });
        Self {
            world,
            commands: CommandSet::standard().unwrap(),
            outbox: Outbox::new(),
            square,
            market,
            east,
            ada,
            bob,
            apple,
        }
    }

    /// Runs a line as `who`, under their authority.
    pub fn run_as(&mut self, who: EntityId, line: &str) -> Result<()> {
        let Self {
            world,
            commands,
            outbox,
            ..
        } = self;
        with_authority(who, || commands.dispatch(world, outbox, who, line))
    }

    /// Runs a line as Ada.
    pub fn run(&mut self, line: &str) -> Result<()> {
        self.run_as(self.ada, line)
    }

    /// Installs a handler as the server.
    pub fn script(&mut self, on: EntityId, action: &str, handler: parley_storage::EventHandler) {
        with_authority(Authority::System, || self.world.set_handler(on, action, handler)).unwrap();
    }

    pub fn heard_by(&self, who: EntityId) -> Vec<&str> {
        self.outbox.messages_for(who)
    }
}
