//! Commands and their dispatch.
//!
//! A [`Command`] pairs a [`CommandDescriptor`] (how players find it) with a
//! body that runs against a [`CommandContext`]. A [`CommandSet`] owns the
//! commands and the resolver registry built from their descriptors.

use std::collections::HashMap;

use parley_foundation::{EntityId, Error, ErrorContext, ErrorKind, Result};
use parley_parser::{Arguments, CommandDescriptor, CommandRegistry, CommandResolver};
use parley_storage::World;
use tracing::debug;

use crate::transport::Transport;

/// A player command.
pub trait Command: Send + Sync {
    /// How the resolver finds this command.
    fn descriptor(&self) -> CommandDescriptor;

    /// One-line usage shown when the arguments don't fit.
    fn usage(&self) -> &'static str;

    /// Runs the command with parsed arguments.
    ///
    /// Runs under the authority of whoever dispatched the line.
    ///
    /// # Errors
    ///
    /// Any error is reported to the player; the session decides whether
    /// the world is rolled back.
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()>;
}

/// Everything a running command can touch.
pub struct CommandContext<'a> {
    /// The world.
    pub world: &'a mut World,
    /// Where messages go.
    pub transport: &'a mut dyn Transport,
    /// The player who typed the line.
    pub player: EntityId,
    /// The commands in effect, for commands that dispatch other lines.
    pub commands: &'a CommandSet,
}

impl CommandContext<'_> {
    /// Sends a line to the acting player.
    pub fn send(&mut self, text: impl AsRef<str>) {
        self.transport.send(self.player, text.as_ref());
    }

    /// Sends a line to some other entity.
    pub fn send_to(&mut self, to: EntityId, text: impl AsRef<str>) {
        self.transport.send(to, text.as_ref());
    }

    /// Sends a line to everyone in the acting player's room except
    /// `except`.
    pub fn emit(&mut self, text: impl AsRef<str>, except: &[EntityId]) {
        if let Some(room) = self.world.room_of(self.player) {
            self.emit_in(room, text, except);
        }
    }

    /// Sends a line to everyone in `location` except `except`.
    pub fn emit_in(&mut self, location: EntityId, text: impl AsRef<str>, except: &[EntityId]) {
        self.transport
            .broadcast(&*self.world, location, text.as_ref(), except);
    }

    /// Display name of an entity.
    #[must_use]
    pub fn name(&self, id: EntityId) -> String {
        self.world.name(id).to_string()
    }

    /// Where the acting player is.
    ///
    /// # Errors
    ///
    /// Returns a refusal if the player is nowhere.
    pub fn location(&self) -> Result<EntityId> {
        self.world
            .location(self.player)
            .ok_or_else(|| Error::refused("You are nowhere."))
    }
}

/// The commands available to players.
#[derive(Default)]
pub struct CommandSet {
    commands: HashMap<String, Box<dyn Command>>,
    registry: CommandRegistry,
}

impl CommandSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard world commands, with `go` handling typed exit names.
    ///
    /// # Errors
    ///
    /// Only fails if the catalog itself is inconsistent.
    pub fn standard() -> Result<Self> {
        let mut set = Self::new();
        for command in crate::commands::catalog() {
            set.register(command)?;
        }
        set.set_exit_command("go")?;
        Ok(set)
    }

    /// Adds a command.
    ///
    /// # Errors
    ///
    /// Returns an internal error if its key is already taken.
    pub fn register(&mut self, command: Box<dyn Command>) -> Result<()> {
        let descriptor = command.descriptor();
        let key = descriptor.key.clone();
        self.registry.register(descriptor)?;
        self.commands.insert(key, command);
        Ok(())
    }

    /// Chooses the command typed exit names resolve to.
    ///
    /// # Errors
    ///
    /// Returns an internal error if no such command is registered.
    pub fn set_exit_command(&mut self, key: &str) -> Result<()> {
        self.registry.set_exit_command(key)
    }

    /// The resolver registry.
    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Looks up a command by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn Command> {
        self.commands.get(key).map(Box::as_ref)
    }

    /// Resolves and runs one line for `player` under the current authority.
    ///
    /// # Errors
    ///
    /// Resolution, argument and command failures, tagged with the command
    /// that was running.
    pub fn dispatch(
        &self,
        world: &mut World,
        transport: &mut dyn Transport,
        player: EntityId,
        line: &str,
    ) -> Result<()> {
        let candidate = CommandResolver::new(&self.registry)
            .resolve_line(world, line, player)
            .into_result()?;
        let (Some(command), Some(descriptor)) = (
            self.get(&candidate.command),
            self.registry.get(&candidate.command),
        ) else {
            return Err(Error::internal(format!(
                "resolved unknown command '{}'",
                candidate.command
            )));
        };

        let arguments = (descriptor.grammar)(world, player)
            .parse(world, player, &candidate.arguments)
            .map_err(|e| e.into_error(world, &format!("Usage: {}", command.usage())))?;
        debug!(%player, command = %candidate.command, "dispatching command");

        let mut ctx = CommandContext {
            world,
            transport,
            player,
            commands: self,
        };
        command.execute(&mut ctx, &arguments).map_err(|e| {
            if e.context.is_some() {
                e
            } else {
                e.with_context(ErrorContext::new().with_source(candidate.command.clone()))
            }
        })
    }
}

/// The text shown to a player for an error, naming entities where the
/// bare error can only give identifiers.
#[must_use]
pub fn player_message(world: &World, error: &Error) -> String {
    match &error.kind {
        ErrorKind::AccessDenied {
            entity,
            attribute,
            access,
        } => format!(
            "You don't have permission to {access} {attribute} on {}.",
            world.name(*entity)
        ),
        ErrorKind::AttributeNotFound { entity, attribute } => {
            format!("{} doesn't have an attribute '{attribute}'.", world.name(*entity))
        }
        _ => error.user_message(),
    }
}
