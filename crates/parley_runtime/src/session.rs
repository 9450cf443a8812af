//! Session state for a running world.
//!
//! The session owns the world, the command set and the outgoing messages,
//! and runs each input line as one all-or-nothing step.

use parley_engine::{CommandSet, Outbox, Transport, player_message};
use parley_foundation::{EntityId, Result};
use parley_lock::with_authority;
use parley_storage::World;
use tracing::{debug, error};

/// A running world and everything needed to play in it.
pub struct Session {
    /// The current world.
    world: World,

    /// Commands players can type.
    commands: CommandSet,

    /// Messages waiting to be delivered.
    outbox: Outbox,
}

impl Session {
    /// Creates a session over `world` with the standard commands.
    ///
    /// # Errors
    ///
    /// Returns an error if the standard command catalog is inconsistent.
    pub fn new(world: World) -> Result<Self> {
        Ok(Self::with_commands(world, CommandSet::standard()?))
    }

    /// Creates a session with a custom command set.
    #[must_use]
    pub fn with_commands(world: World, commands: CommandSet) -> Self {
        Self {
            world,
            commands,
            outbox: Outbox::new(),
        }
    }

    /// Returns the current world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Returns the current world mutably.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Replaces the world.
    pub fn set_world(&mut self, world: World) {
        self.world = world;
    }

    /// Returns the command set.
    #[must_use]
    pub const fn commands(&self) -> &CommandSet {
        &self.commands
    }

    /// Messages not yet delivered.
    #[must_use]
    pub const fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    /// Removes and returns every pending message.
    pub fn drain(&mut self) -> Vec<(EntityId, String)> {
        self.outbox.take()
    }

    /// Runs one line typed by `player`, under the player's authority.
    ///
    /// The world is snapshotted first and restored if the command fails,
    /// except when an event vetoed it: effects of handlers that already
    /// fired stand. The player is told why the command failed.
    ///
    /// # Errors
    ///
    /// Only programming and host errors (missing authority, internal
    /// failures) are returned; everything else goes to the player.
    pub fn handle_line(&mut self, player: EntityId, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        let snapshot = self.world.clone();
        let result = with_authority(player, || {
            self.commands
                .dispatch(&mut self.world, &mut self.outbox, player, line)
        });
        let Err(err) = result else {
            return Ok(());
        };

        if !err.is_cancelled() {
            self.world = snapshot;
        }
        let message = player_message(&self.world, &err);
        self.outbox.send(player, &message);

        if err.is_recoverable() {
            debug!(%player, line, error = %err, "command failed");
            Ok(())
        } else {
            error!(%player, line, error = %err, context = ?err.context, "command failed");
            Err(err)
        }
    }
}
